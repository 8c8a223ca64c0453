//! Expansion rules for products.

use crate::expr::Expr;
use crate::step_collector::StepCollector;
use super::super::step::Step;
use super::do_mul;

/// `(a/b)*c = (a*c)/b`
///
/// Pulls every fraction factor up into a single fraction over the product,
/// so that distribution and like-term collection see plain products.
pub fn combine_fractions(
    expr: &Expr,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<Expr> {
    let opt = do_mul(expr, |factors| {
        if !factors.iter().any(|factor| matches!(factor, Expr::Div(..))) {
            return None;
        }

        let mut numerators = Vec::with_capacity(factors.len());
        let mut denominators = Vec::new();
        for factor in factors {
            match factor {
                Expr::Div(numerator, denominator) => {
                    numerators.push((**numerator).clone());
                    denominators.push((**denominator).clone());
                },
                other => numerators.push(other.clone()),
            }
        }
        Some(Expr::div(
            Expr::product(numerators),
            Expr::product(denominators),
        ))
    })?;

    step_collector.push(Step::CombineFractions);
    Some(opt)
}

/// Applies all multiplication rules.
pub fn all(expr: &Expr, step_collector: &mut dyn StepCollector<Step>) -> Option<Expr> {
    combine_fractions(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use pretty_assertions::assert_eq;

    fn geo(name: &str) -> Expr {
        Expr::symbol(name, Level::Geo)
    }

    #[test]
    fn lifts_fraction_out_of_product() {
        let expr = Expr::Mul(vec![geo("a"), Expr::div(geo("b"), geo("c"))]);
        assert_eq!(
            combine_fractions(&expr, &mut ()),
            Some(Expr::div(Expr::product(vec![geo("a"), geo("b")]), geo("c"))),
        );
    }

    #[test]
    fn merges_multiple_denominators() {
        let expr = Expr::Mul(vec![
            Expr::div(geo("a"), geo("b")),
            Expr::div(geo("c"), geo("d")),
        ]);
        assert_eq!(
            combine_fractions(&expr, &mut ()),
            Some(Expr::div(
                Expr::product(vec![geo("a"), geo("c")]),
                Expr::product(vec![geo("b"), geo("d")]),
            )),
        );
    }

    #[test]
    fn plain_product_is_untouched() {
        let expr = Expr::product(vec![geo("a"), geo("b")]);
        assert_eq!(combine_fractions(&expr, &mut ()), None);
    }
}
