//! The arithmetic operation count of an expression.
//!
//! This is the objective every optimisation pass in this crate is judged
//! against: the number of floating-point operations an expression implies
//! when evaluated inside the quadrature loop nest. A sum of `k` terms costs
//! `k - 1` additions plus the cost of its terms, a product of `k` factors
//! `k - 1` multiplications plus the cost of its factors, a fraction one
//! division plus the cost of both sides, and a leaf nothing.

use crate::expr::Expr;

impl Expr {
    /// Returns the number of arithmetic operations this expression performs
    /// when evaluated. Pure and linear in the size of the tree.
    pub fn ops(&self) -> usize {
        self.post_order_iter()
            .map(|node| match node {
                Expr::Primary(_) => 0,
                Expr::Add(terms) => terms.len().saturating_sub(1),
                Expr::Mul(factors) => factors.len().saturating_sub(1),
                Expr::Div(..) => 1,
            })
            .sum()
    }
}

/// Free-function form of [`Expr::ops`], convenient as a comparison key.
pub fn ops(expr: &Expr) -> usize {
    expr.ops()
}
