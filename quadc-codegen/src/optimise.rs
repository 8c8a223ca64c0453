//! Hoisting of subexpressions into precomputation tiers.
//!
//! [`optimise_code`] is the terminal optimisation pass. It takes an
//! integrand expression and splits its cost across the quadrature loop
//! nest: everything computable from geometry alone moves into the per-element
//! `G` table, every combination of quadrature weight and geometry moves
//! into the per-integration-point `Gip` table, and what returns to the
//! caller is the residual expression that must still run in the innermost
//! loop: a short product of basis values and temporaries.
//!
//! Evaluating the `G` table in insertion order, then the `Gip` table, then
//! the residual reproduces the value of the original expression for every
//! valuation of its symbols.

use crate::context::OptimiseContext;
use crate::Options;
use indexmap::IndexMap;
use log::debug;
use quadc_symbolics::{expand, reduce_ops_with, Expr, Level, Primary};

/// Splits a sum-of-products term into the factors at exactly `level` and
/// the factors below it.
fn partition_factors(term: Expr, level: Level) -> (Vec<Expr>, Vec<Expr>) {
    match term {
        Expr::Mul(factors) => factors.into_iter().partition(|factor| factor.level() == level),
        other => {
            if other.level() == level {
                (vec![other], Vec::new())
            } else {
                (Vec::new(), vec![other])
            }
        },
    }
}

/// Hoists the shared residue of one basis group into the constant tables
/// and returns the (cheap) expression that stands in for it.
fn hoist_group(residues: Vec<Expr>, ctx: &mut OptimiseContext, options: &Options) -> Expr {
    // sub-group the residue by its integration-point part, so each distinct
    // weight combination shares one geometry sum
    let mut by_ip: IndexMap<Expr, Vec<Expr>> = IndexMap::new();
    for residue in residues {
        let (ip_factors, geo_factors) = partition_factors(residue, Level::Ip);
        by_ip
            .entry(Expr::product(ip_factors))
            .or_insert_with(Vec::new)
            .push(Expr::product(geo_factors));
    }

    let mut terms = Vec::with_capacity(by_ip.len());
    for (ip_part, geo_parts) in by_ip {
        let geo_sum = reduce_ops_with(&Expr::sum(geo_parts), options.max_factor_passes);
        let geo_part = if geo_sum.ops() >= options.min_hoist_ops {
            Expr::symbol(ctx.geo_consts.intern(geo_sum), Level::Geo)
        } else {
            geo_sum
        };
        terms.push(Expr::product(vec![ip_part, geo_part]));
    }

    let ip_sum = Expr::sum(terms);
    if ip_sum.level() == Level::Ip && ip_sum.ops() >= options.min_hoist_ops {
        Expr::symbol(ctx.ip_consts.intern(ip_sum), Level::Ip)
    } else {
        ip_sum
    }
}

/// Hoists every `geo`- and `ip`-level subexpression of the integrand into
/// the context's constant tables and returns the residual expression.
///
/// The input is typically already factored via
/// [`reduce_ops`](quadc_symbolics::reduce_ops), but any expression is
/// accepted; the pass re-expands it to recover the term structure it groups
/// by. Temporaries are deduplicated against everything already in the
/// context, so identical subexpressions across the integrands of one
/// compilation unit share one name.
pub fn optimise_code(expr: &Expr, ctx: &mut OptimiseContext, options: &Options) -> Expr {
    // every geo symbol referenced anywhere must be provided upstream,
    // whether or not it ends up inside a hoisted temporary
    for node in expr.post_order_iter() {
        if let Expr::Primary(Primary::Symbol(name, Level::Geo)) = node {
            ctx.trans_set.insert(name.clone());
        }
    }

    let expanded = expand(expr);
    let terms = match expanded {
        Expr::Add(terms) => terms,
        other => vec![other],
    };

    // group the terms by their basis-level part; each group's residue is
    // what can be hoisted out of the innermost loop
    let mut groups: IndexMap<Expr, Vec<Expr>> = IndexMap::new();
    for term in terms {
        let (basis_factors, residue) = partition_factors(term, Level::Basis);
        groups
            .entry(Expr::product(basis_factors))
            .or_insert_with(Vec::new)
            .push(Expr::product(residue));
    }

    let mut residual_terms = Vec::with_capacity(groups.len());
    for (basis_part, residues) in groups {
        let hoisted = hoist_group(residues, ctx, options);
        residual_terms.push(Expr::product(vec![basis_part, hoisted]));
    }
    let residual = Expr::sum(residual_terms);

    debug!(
        "hoisted integrand into {} geo + {} ip temporaries, {} ops residual",
        ctx.geo_consts.len(),
        ctx.ip_consts.len(),
        residual.ops(),
    );
    residual
}

/// Runs the full optimisation pipeline for one integrand: expansion,
/// factoring, then hoisting into the given context.
///
/// Returns the residual expression for the innermost loop. The operation
/// counts logged at each stage are the ones to watch when tuning a form:
/// expansion raises the count, factoring lowers it below the original, and
/// hoisting moves almost everything left into the outer loops.
pub fn optimise_integrand(expr: &Expr, ctx: &mut OptimiseContext, options: &Options) -> Expr {
    let expanded = expand(expr);
    debug!("expanded: {} ops (from {})", expanded.ops(), expr.ops());

    let reduced = reduce_ops_with(&expanded, options.max_factor_passes);
    debug!("factored: {} ops", reduced.ops());

    optimise_code(&reduced, ctx, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn geo(name: &str) -> Expr {
        Expr::symbol(name, Level::Geo)
    }

    /// The elasticity-weighted reference integrand.
    fn elasticity_integrand() -> Expr {
        let w4 = || Expr::symbol("W4", Level::Ip);
        let bj = || Expr::symbol("FE0_C1_D01_ip_j", Level::Basis);
        let bk = || Expr::symbol("FE0_C1_D01_ip_k", Level::Basis);

        let unscaled = || {
            vec![
                Expr::product(vec![bj(), bk(), geo("Jinv_00"), geo("w1")]),
                Expr::product(vec![
                    bj(),
                    geo("Jinv_01"),
                    Expr::sum(vec![
                        Expr::product(vec![bk(), geo("w0")]),
                        Expr::product(vec![bk(), geo("w1")]),
                    ]),
                ]),
            ]
        };

        let mut terms = unscaled();
        terms.push(Expr::product(vec![geo("w2"), Expr::sum(unscaled())]));
        Expr::product(vec![w4(), Expr::sum(terms)])
    }

    fn elasticity_valuation() -> HashMap<String, f64> {
        [
            ("W4", 0.123),
            ("w0", 1.123),
            ("w1", 2.123),
            ("w2", 3.123),
            ("Jinv_00", 4.123),
            ("Jinv_01", 5.123),
            ("FE0_C1_D01_ip_j", 9.123),
            ("FE0_C1_D01_ip_k", 10.123),
        ]
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
    }

    /// Evaluates the residual the way the generated kernel would: every
    /// temporary in table insertion order at its level, then the residual.
    fn eval_with_tables(
        ctx: &OptimiseContext,
        residual: &Expr,
        vars: &HashMap<String, f64>,
    ) -> f64 {
        let mut vars = vars.clone();
        for (name, expr) in ctx.geo_consts.iter() {
            let value = expr.eval(&vars).unwrap();
            vars.insert(name, value);
        }
        for (name, expr) in ctx.ip_consts.iter() {
            let value = expr.eval(&vars).unwrap();
            vars.insert(name, value);
        }
        residual.eval(&vars).unwrap()
    }

    #[test]
    fn hoists_reference_integrand_into_both_tiers() {
        let expr = elasticity_integrand();
        let mut ctx = OptimiseContext::new();
        let residual = optimise_code(&expr, &mut ctx, &Options::default());

        assert!(!ctx.geo_consts.is_empty());
        assert!(!ctx.ip_consts.is_empty());

        // the residual is a plain product of the two basis values and one
        // ip-level temporary
        assert_eq!(residual, Expr::product(vec![
            Expr::symbol("FE0_C1_D01_ip_j", Level::Basis),
            Expr::symbol("FE0_C1_D01_ip_k", Level::Basis),
            Expr::symbol("Gip0", Level::Ip),
        ]));

        let vars = elasticity_valuation();
        assert_float_absolute_eq!(
            expr.eval(&vars).unwrap(),
            eval_with_tables(&ctx, &residual, &vars),
            1e-9
        );
    }

    #[test]
    fn records_transformation_symbols() {
        let expr = elasticity_integrand();
        let mut ctx = OptimiseContext::new();
        optimise_code(&expr, &mut ctx, &Options::default());

        let names: Vec<_> = ctx.trans_set.iter().map(String::as_str).collect();
        assert_eq!(names, ["Jinv_00", "Jinv_01", "w0", "w1", "w2"]);
    }

    #[test]
    fn tiers_are_sound() {
        let expr = elasticity_integrand();
        let mut ctx = OptimiseContext::new();
        let residual = optimise_code(&expr, &mut ctx, &Options::default());

        for (_, entry) in ctx.geo_consts.iter() {
            assert!(entry.level() <= Level::Geo, "geo entry at {}", entry.level());
        }
        for (_, entry) in ctx.ip_consts.iter() {
            assert!(entry.level() <= Level::Ip, "ip entry at {}", entry.level());
        }
        // nothing geo- or ip-level beyond temporaries survives in the
        // residual except bare symbols below the hoisting threshold
        assert!(residual.ops() <= 2);
    }

    #[test]
    fn temporaries_are_shared_across_integrands() {
        let shared = || {
            Expr::product(vec![
                Expr::symbol("W4", Level::Ip),
                Expr::sum(vec![
                    Expr::product(vec![geo("Jinv_00"), geo("w0")]),
                    Expr::product(vec![geo("Jinv_01"), geo("w1")]),
                ]),
            ])
        };
        let first = Expr::product(vec![Expr::symbol("phi_j", Level::Basis), shared()]);
        let second = Expr::product(vec![Expr::symbol("phi_k", Level::Basis), shared()]);

        let mut ctx = OptimiseContext::new();
        let options = Options::default();
        let first_residual = optimise_code(&first, &mut ctx, &options);
        let second_residual = optimise_code(&second, &mut ctx, &options);

        // both integrands reference the same geo and ip temporaries
        assert_eq!(ctx.geo_consts.len(), 1);
        assert_eq!(ctx.ip_consts.len(), 1);
        assert_eq!(first_residual, Expr::product(vec![
            Expr::symbol("phi_j", Level::Basis),
            Expr::symbol("Gip0", Level::Ip),
        ]));
        assert_eq!(second_residual, Expr::product(vec![
            Expr::symbol("phi_k", Level::Basis),
            Expr::symbol("Gip0", Level::Ip),
        ]));
    }

    #[test]
    fn repeated_runs_are_deterministic() {
        let expr = elasticity_integrand();

        let mut first_ctx = OptimiseContext::new();
        let first = optimise_code(&expr, &mut first_ctx, &Options::default());
        let mut second_ctx = OptimiseContext::new();
        let second = optimise_code(&expr, &mut second_ctx, &Options::default());

        assert_eq!(first.to_string(), second.to_string());
        let entries = |ctx: &OptimiseContext| {
            ctx.geo_consts
                .iter()
                .chain(ctx.ip_consts.iter())
                .map(|(name, expr)| format!("{} = {}", name, expr))
                .collect::<Vec<_>>()
        };
        assert_eq!(entries(&first_ctx), entries(&second_ctx));
    }

    #[test]
    fn trivial_subexpressions_stay_inline() {
        // w0 alone is not worth a table entry
        let expr = Expr::product(vec![
            Expr::symbol("phi_j", Level::Basis),
            geo("w0"),
        ]);
        let mut ctx = OptimiseContext::new();
        let residual = optimise_code(&expr, &mut ctx, &Options::default());

        assert!(ctx.geo_consts.is_empty());
        assert!(ctx.ip_consts.is_empty());
        assert_eq!(residual, expr);
        assert_eq!(ctx.trans_set.len(), 1);
    }

    #[test]
    fn pure_geo_expression_reduces_to_one_temporary() {
        let expr = Expr::sum(vec![
            Expr::product(vec![geo("Jinv_00"), geo("w0")]),
            Expr::product(vec![geo("Jinv_11"), geo("w1")]),
        ]);
        let mut ctx = OptimiseContext::new();
        let residual = optimise_code(&expr, &mut ctx, &Options::default());

        assert_eq!(ctx.geo_consts.len(), 1);
        assert!(ctx.ip_consts.is_empty());
        assert_eq!(residual, Expr::symbol("G0", Level::Geo));
    }

    #[test]
    fn pipeline_matches_direct_hoisting() {
        let expr = elasticity_integrand();
        let vars = elasticity_valuation();

        let mut ctx = OptimiseContext::new();
        let residual = optimise_integrand(&expr, &mut ctx, &Options::default());
        assert_float_absolute_eq!(
            expr.eval(&vars).unwrap(),
            eval_with_tables(&ctx, &residual, &vars),
            1e-9
        );
    }
}
