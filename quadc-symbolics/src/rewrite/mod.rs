//! Expansion of expressions into a sum-of-products normal form.
//!
//! [`expand`] rewrites an expression by exhaustively applying the
//! distributive law together with literal folding and like-term collection,
//! until no product contains a sum and no two terms share the same
//! non-numeric part. The result is numerically equal to the input for every
//! valuation of its symbols.
//!
//! Expansion is a *normal form*, not an optimisation: distributing products
//! over sums usually raises the operation count. Its purpose is to expose
//! the term structure that [`reduce_ops`](crate::factor::reduce_ops) and the
//! code generator's hoisting pass work on.
//!
//! Rewriting is done by applying a set of rules to the expression in
//! multiple passes. Each rule is a function that accepts an expression and
//! returns `Option<Expr>`; if the rule is applicable, the rewritten
//! expression is returned. The current set of rules is defined in
//! [`rules`]. Callers interested in which rules fired can pass a
//! [`StepCollector`] to [`expand_with`].

pub mod rules;
pub mod step;

use crate::expr::Expr;
use crate::step_collector::StepCollector;
use log::trace;
use step::Step;

/// Expands the expression into sum-of-products form.
pub fn expand(expr: &Expr) -> Expr {
    let expanded = expand_with(expr, &mut ());
    trace!("expanded {} ops into {} ops", expr.ops(), expanded.ops());
    expanded
}

/// Expands the expression, recording every applied rule in the given
/// collector.
pub fn expand_with(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Expr {
    // rebuild bottom-up so each rule only ever sees fully expanded operands
    let rebuilt = match expr {
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => Expr::sum(
            terms.iter().map(|term| expand_with(term, step_collector)).collect(),
        ),
        Expr::Mul(factors) => Expr::product(
            factors.iter().map(|factor| expand_with(factor, step_collector)).collect(),
        ),
        Expr::Div(numerator, denominator) => Expr::div(
            expand_with(numerator, step_collector),
            expand_with(denominator, step_collector),
        ),
    };

    match rules::all(&rebuilt, step_collector) {
        Some(next) => expand_with(&next, step_collector),
        None => rebuilt,
    }
}
