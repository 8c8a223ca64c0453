//! Expansion rules related to the distributive property.

use crate::expr::Expr;
use crate::step_collector::StepCollector;
use super::super::step::Step;
use super::do_mul;

/// `a*(b + c) = a*b + a*c`
pub fn distributive_property(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let opt = do_mul(expr, |factors| {
        // find the first sum, and distribute every other factor over it
        let mut rest = factors.to_vec();
        let idx = rest.iter().position(|factor| matches!(factor, Expr::Add(_)))?;
        let Expr::Add(terms) = rest.swap_remove(idx) else {
            unreachable!()
        };

        let new_terms = terms
            .into_iter()
            .map(|term| {
                let mut factors = rest.clone();
                factors.push(term);
                Expr::product(factors)
            })
            .collect::<Vec<_>>();
        Some(Expr::sum(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it
    // implement `Fn`
    step_collector.push(Step::Distribute);
    Some(opt)
}

/// Applies all distribution rules.
///
/// Distribution does not reduce the operation count of the expression; it
/// establishes the sum-of-products form the factoring and hoisting passes
/// work on.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    distributive_property(expr, step_collector)
}
