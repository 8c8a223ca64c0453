//! Evaluation levels of symbols inside the generated quadrature loops.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The loop-nesting tier at which a value becomes known during numerical
/// evaluation of an element integral.
///
/// The variants are declared from outermost to innermost, so the derived
/// [`Ord`] implementation orders levels by how deep inside the loop nest a
/// value lives. The level of a compound expression is the *maximum* level of
/// its operands (see [`Expr::level`](crate::expr::Expr::level)): an
/// expression can never be hoisted to a loop outer than one of the symbols it
/// depends on. Levels are always derived from the leaves, never supplied for
/// compound nodes, which makes that invariant structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    /// Known before any per-element loop (numeric literals).
    Constant,

    /// Known once per mesh element: Jacobian entries, the element volume,
    /// coefficient values.
    Geo,

    /// Known once per integration point within an element: quadrature
    /// weights, basis values independent of the test/trial index.
    Ip,

    /// Varies with the test/trial function index being assembled; can never
    /// be hoisted out of the innermost loop.
    Basis,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Constant => write!(f, "constant"),
            Level::Geo => write!(f, "geo"),
            Level::Ip => write!(f, "ip"),
            Level::Basis => write!(f, "basis"),
        }
    }
}
