//! The per-compilation-unit state accumulated while hoisting integrands.
//!
//! All mutable state of the code generator lives in [`OptimiseContext`],
//! created by the caller and passed by mutable reference into every
//! [`optimise_code`](crate::optimise::optimise_code) call. One context
//! spans one compilation unit: feeding several integrands of the same form
//! through the same context is what lets structurally identical
//! subexpressions in different integrands share a single temporary.
//!
//! The tables are check-then-insert and not synchronised; concurrent
//! optimisation of independent integrands needs one context per worker.

use indexmap::IndexMap;
use quadc_symbolics::Expr;
use std::collections::BTreeSet;

/// An insertion-ordered table of named, precomputed subexpressions.
///
/// Keys are full expression trees compared structurally, so looking up a
/// candidate subexpression deduplicates it against everything the table
/// already holds. Temporary names are the table's prefix followed by the
/// insertion index: `G0`, `G1`, ... for the geometry tier and `Gip0`,
/// `Gip1`, ... for the integration-point tier.
#[derive(Debug, Clone)]
pub struct ConstTable {
    prefix: &'static str,
    entries: IndexMap<Expr, usize>,
}

impl ConstTable {
    pub(crate) fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            entries: IndexMap::new(),
        }
    }

    /// Returns the temporary name for the given subexpression, allocating
    /// the next name if the expression has not been seen before.
    pub fn intern(&mut self, expr: Expr) -> String {
        let index = match self.entries.get(&expr) {
            Some(index) => *index,
            None => {
                let index = self.entries.len();
                self.entries.insert(expr, index);
                index
            },
        };
        format!("{}{}", self.prefix, index)
    }

    /// Iterates over `(name, expression)` pairs in insertion order, which
    /// is also a valid evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (String, &Expr)> + '_ {
        self.entries
            .iter()
            .map(|(expr, index)| (format!("{}{}", self.prefix, index), expr))
    }

    /// The name prefix of this tier.
    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// The number of temporaries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no temporaries have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The output collections of the hoisting pass for one compilation unit.
#[derive(Debug, Clone)]
pub struct OptimiseContext {
    /// Subexpressions computable once per mesh element.
    pub geo_consts: ConstTable,

    /// Subexpressions computable once per integration point.
    pub ip_consts: ConstTable,

    /// Names of every geo-level symbol referenced by the processed
    /// integrands, so the emission layer knows which geometry quantities
    /// must be computed upstream of the generated code.
    pub trans_set: BTreeSet<String>,
}

impl OptimiseContext {
    /// Creates an empty context for a new compilation unit.
    pub fn new() -> Self {
        Self {
            geo_consts: ConstTable::new("G"),
            ip_consts: ConstTable::new("Gip"),
            trans_set: BTreeSet::new(),
        }
    }
}

impl Default for OptimiseContext {
    fn default() -> Self {
        Self::new()
    }
}
