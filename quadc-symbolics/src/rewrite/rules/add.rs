//! Expansion rules for sums, including combining like terms.

use crate::expr::{Expr, Primary};
use crate::step_collector::StepCollector;
use super::super::step::Step;
use super::do_add;

/// Splits a term into its numeric coefficient and the remaining factors.
///
/// - `5` -> `(5, 1)`
/// - `3*a` -> `(3, a)`
/// - `a*b` -> `(1, a*b)`
/// - `a/b` -> `(1, a/b)`
///
/// The constructors fold literals into a single leading factor, so checking
/// the first factor of a product is enough.
fn split_coefficient(term: &Expr) -> (f64, Expr) {
    match term {
        Expr::Primary(Primary::Float(value)) => (*value, Expr::float(1.0)),
        Expr::Mul(factors) => match factors.first() {
            Some(Expr::Primary(Primary::Float(value))) => {
                (*value, Expr::product(factors[1..].to_vec()))
            },
            _ => (1.0, term.clone()),
        },
        _ => (1.0, term.clone()),
    }
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// etc.
pub fn combine_like_terms(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let opt = do_add(expr, |terms| {
        // this is O(n^2) worst case, due to scanning the merged list for
        // each term
        let mut merged: Vec<(f64, Expr)> = Vec::new();
        for term in terms {
            let (coefficient, factors) = split_coefficient(term);
            match merged.iter_mut().find(|(_, existing)| *existing == factors) {
                Some(entry) => entry.0 += coefficient,
                None => merged.push((coefficient, factors)),
            }
        }

        if merged.len() == terms.len() {
            return None;
        }
        Some(Expr::sum(
            merged
                .into_iter()
                .map(|(coefficient, factors)| {
                    Expr::product(vec![Expr::float(coefficient), factors])
                })
                .collect(),
        ))
    })?;

    // keep the step collection logic outside of the closure to make it
    // implement `Fn`
    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    combine_like_terms(expr, step_collector)
}
