//! Expansion rules for fractions.
//!
//! Division is the one operation the sum-of-products form cannot always
//! clear: a denominator whose value is only known per element (a Jacobian
//! determinant, say) has to stay a fraction. These rules normalise what can
//! be normalised: nested fractions flatten, a sum numerator distributes, and
//! a literal denominator folds into a reciprocal coefficient.

use crate::expr::Expr;
use crate::step_collector::StepCollector;
use super::super::step::Step;
use super::do_div;

/// `(a/b)/c = a/(b*c)`
/// `a/(b/c) = (a*c)/b`
pub fn flatten_division(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let opt = do_div(expr, |numerator, denominator| match (numerator, denominator) {
        (Expr::Div(inner_num, inner_den), _) => Some(Expr::div(
            (**inner_num).clone(),
            Expr::product(vec![(**inner_den).clone(), denominator.clone()]),
        )),
        (_, Expr::Div(inner_num, inner_den)) => Some(Expr::div(
            Expr::product(vec![numerator.clone(), (**inner_den).clone()]),
            (**inner_num).clone(),
        )),
        _ => None,
    })?;

    step_collector.push(Step::FlattenDivision);
    Some(opt)
}

/// `(a + b)/c = a/c + b/c`
pub fn distribute_division(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let opt = do_div(expr, |numerator, denominator| {
        if let Expr::Add(terms) = numerator {
            Some(Expr::sum(
                terms
                    .iter()
                    .map(|term| Expr::div(term.clone(), denominator.clone()))
                    .collect(),
            ))
        } else {
            None
        }
    })?;

    step_collector.push(Step::DistributeDivision);
    Some(opt)
}

/// `a/2 = 0.5*a` for a nonzero literal denominator.
///
/// A literal zero denominator is deliberately not folded; it surfaces as a
/// division-by-zero error at evaluation time instead of becoming an
/// infinity at compile time.
pub fn divide_by_constant(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let opt = do_div(expr, |numerator, denominator| {
        let value = denominator.as_float()?;
        if value == 0.0 {
            return None;
        }
        Some(Expr::product(vec![Expr::float(value.recip()), numerator.clone()]))
    })?;

    step_collector.push(Step::DivideByConstant);
    Some(opt)
}

/// Applies all fraction rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    flatten_division(expr, step_collector)
        .or_else(|| distribute_division(expr, step_collector))
        .or_else(|| divide_by_constant(expr, step_collector))
}
