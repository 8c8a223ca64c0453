/// A single rewrite applied by the expansion engine.
///
/// Collected through a [`StepCollector`](crate::step_collector::StepCollector)
/// when the caller wants to trace how an expression reached its normal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a*(b + c) = a*b + a*c`
    Distribute,

    /// `2*x + 3*x = 5*x`
    CombineLikeTerms,

    /// `(a/b)*c = (a*c)/b`
    CombineFractions,

    /// `(a/b)/c = a/(b*c)` or `a/(b/c) = (a*c)/b`
    FlattenDivision,

    /// `(a + b)/c = a/c + b/c`
    DistributeDivision,

    /// `a/2 = 0.5*a`
    DivideByConstant,
}
