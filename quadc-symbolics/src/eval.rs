//! Direct numerical evaluation of expression trees.
//!
//! The optimiser's correctness contract is numerical: every rewrite must
//! preserve the value of the expression for all valuations of its symbols.
//! This module provides the typed evaluator the equivalence tests (and
//! collaborator test harnesses) check that contract with. The tree is walked
//! directly against a name-to-value mapping; no source text is ever
//! reconstructed and re-interpreted.

use crate::error::EvalError;
use crate::expr::{Expr, Primary};
use std::collections::HashMap;

impl Expr {
    /// Evaluates the expression against the given valuation.
    ///
    /// An empty sum evaluates to `0` and an empty product to `1`, matching
    /// the constructors' identity elements.
    pub fn eval(&self, vars: &HashMap<String, f64>) -> Result<f64, EvalError> {
        match self {
            Expr::Primary(Primary::Float(value)) => Ok(*value),
            Expr::Primary(Primary::Symbol(name, _)) => vars
                .get(name)
                .copied()
                .ok_or_else(|| EvalError::UnboundSymbol(name.clone())),
            Expr::Add(terms) => {
                let mut total = 0.0;
                for term in terms {
                    total += term.eval(vars)?;
                }
                Ok(total)
            },
            Expr::Mul(factors) => {
                let mut total = 1.0;
                for factor in factors {
                    total *= factor.eval(vars)?;
                }
                Ok(total)
            },
            Expr::Div(numerator, denominator) => {
                let denominator = denominator.eval(vars)?;
                if denominator == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(numerator.eval(vars)? / denominator)
            },
        }
    }
}
