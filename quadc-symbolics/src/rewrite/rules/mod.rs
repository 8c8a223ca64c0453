//! Implementation of the expansion rules.
//!
//! Each rule in this module is a function that takes the expression to
//! rewrite as an argument, and returns `Some(expr)` with the rewritten
//! expression if the rule applies, or `None` if the rule does not apply.

pub mod add;
pub mod distribute;
pub mod fraction;
pub mod multiply;

use crate::expr::Expr;
use crate::step_collector::StepCollector;
use super::step::Step;

/// If the expression is a sum, calls the given transformation function with
/// the terms.
///
/// Returns `Some(expr)` with the transformed expression if a transformation
/// was applied.
pub(crate) fn do_add(expr: &Expr, f: impl Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Add(terms) = expr {
        f(terms)
    } else {
        None
    }
}

/// If the expression is a product, calls the given transformation function
/// with the factors.
///
/// Returns `Some(expr)` with the transformed expression if a transformation
/// was applied.
pub(crate) fn do_mul(expr: &Expr, f: impl Fn(&[Expr]) -> Option<Expr>) -> Option<Expr> {
    if let Expr::Mul(factors) = expr {
        f(factors)
    } else {
        None
    }
}

/// If the expression is a fraction, calls the given transformation function
/// with the numerator and denominator.
///
/// Returns `Some(expr)` with the transformed expression if a transformation
/// was applied.
pub(crate) fn do_div(
    expr: &Expr,
    f: impl Fn(&Expr, &Expr) -> Option<Expr>,
) -> Option<Expr> {
    if let Expr::Div(numerator, denominator) = expr {
        f(numerator, denominator)
    } else {
        None
    }
}

/// Applies all rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    distribute::all(expr, step_collector)
        .or_else(|| multiply::all(expr, step_collector))
        .or_else(|| fraction::all(expr, step_collector))
        .or_else(|| add::all(expr, step_collector))
}
