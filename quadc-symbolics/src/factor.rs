//! Factoring of expanded expressions to reduce their operation count.
//!
//! [`reduce_ops`] applies the distributive law in reverse: it scans the
//! terms of a sum for symbols shared between several terms and pulls the
//! most common one out, `a*b + a*c = a*(b + c)`, recursing into both the
//! extracted sum and whatever terms remain. Extraction candidates are
//! atomic symbols; numeric coefficients and compound factors are never
//! candidates themselves, but the sums created by grouping are reduced
//! recursively, so shared compound structure still collapses level by
//! level.
//!
//! The search is greedy and therefore not globally optimal: it commits to
//! the locally best extraction at every step. Ties between equally common
//! symbols break towards the lexicographically smallest name, which keeps
//! the output reproducible. The result is guaranteed to cost no more
//! operations than the input; when the expression has repeated subterms it
//! usually costs considerably fewer.

use crate::expr::{Expr, Primary};
use crate::level::Level;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// The default bound on factor extractions per sum.
///
/// Every extraction consumes at least two terms, so the loop in
/// [`reduce_ops`] terminates on its own; the explicit bound caps the work
/// spent on adversarial inputs. Hitting it yields the partially factored
/// expression, which is still numerically equivalent and no more expensive
/// than the input.
pub const MAX_FACTOR_PASSES: usize = 64;

/// Factors the expression to reduce its operation count, using the default
/// pass bound.
pub fn reduce_ops(expr: &Expr) -> Expr {
    reduce_ops_with(expr, MAX_FACTOR_PASSES)
}

/// Factors the expression with an explicit bound on extractions per sum.
///
/// Guarantees `reduce_ops_with(e, n).ops() <= e.ops()` for every `e` and
/// `n`; numerical equivalence is preserved.
pub fn reduce_ops_with(expr: &Expr, max_passes: usize) -> Expr {
    let reduced = reduce(expr, max_passes);
    if reduced.ops() <= expr.ops() {
        debug!("factored {} ops into {} ops", expr.ops(), reduced.ops());
        reduced
    } else {
        expr.clone()
    }
}

fn reduce(expr: &Expr, max_passes: usize) -> Expr {
    match expr {
        Expr::Primary(_) => expr.clone(),
        Expr::Add(terms) => reduce_sum(terms, max_passes),
        Expr::Mul(factors) => Expr::product(
            factors.iter().map(|factor| reduce(factor, max_passes)).collect(),
        ),
        Expr::Div(numerator, denominator) => Expr::div(
            reduce(numerator, max_passes),
            reduce(denominator, max_passes),
        ),
    }
}

fn reduce_sum(terms: &[Expr], max_passes: usize) -> Expr {
    let mut remaining = terms.to_vec();
    let mut grouped = Vec::new();

    for _ in 0..max_passes {
        let Some(factor) = most_common_symbol(&remaining) else {
            break;
        };

        let (extracted, rest): (Vec<_>, Vec<_>) = remaining
            .into_iter()
            .partition(|term| contains_factor(term, &factor));
        let divided = extracted
            .iter()
            .map(|term| remove_factor(term, &factor))
            .collect();
        let inner = reduce(&Expr::sum(divided), max_passes);
        grouped.push(Expr::product(vec![factor, inner]));
        remaining = rest;
    }

    grouped.extend(remaining.iter().map(|term| reduce(term, max_passes)));
    Expr::sum(grouped)
}

/// Finds the symbol occurring as a factor in the most terms, requiring at
/// least two occurrences. Ties break towards the lexicographically smallest
/// name.
fn most_common_symbol(terms: &[Expr]) -> Option<Expr> {
    let mut counts: BTreeMap<(&str, Level), usize> = BTreeMap::new();
    for term in terms {
        match term {
            Expr::Primary(Primary::Symbol(name, level)) => {
                *counts.entry((name.as_str(), *level)).or_default() += 1;
            },
            Expr::Mul(factors) => {
                // a symbol counts once per term, however often it repeats
                // inside the product
                let mut seen = BTreeSet::new();
                for factor in factors {
                    if let Expr::Primary(Primary::Symbol(name, level)) = factor {
                        seen.insert((name.as_str(), *level));
                    }
                }
                for key in seen {
                    *counts.entry(key).or_default() += 1;
                }
            },
            _ => {},
        }
    }

    let mut best: Option<((&str, Level), usize)> = None;
    for (key, count) in counts {
        if count >= 2 && best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((key, count));
        }
    }
    best.map(|((name, level), _)| Expr::symbol(name, level))
}

fn contains_factor(term: &Expr, factor: &Expr) -> bool {
    match term {
        Expr::Mul(factors) => factors.contains(factor),
        other => other == factor,
    }
}

/// Divides one occurrence of `factor` out of `term`. The caller only passes
/// terms `contains_factor` accepted.
fn remove_factor(term: &Expr, factor: &Expr) -> Expr {
    match term {
        Expr::Mul(factors) => {
            let mut rest = factors.to_vec();
            if let Some(idx) = rest.iter().position(|f| f == factor) {
                rest.remove(idx);
            }
            Expr::product(rest)
        },
        _ => Expr::float(1.0),
    }
}
