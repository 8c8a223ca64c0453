//! Rendering of hoisted tables as source-text declarations.
//!
//! The core's output to the build-and-cache collaborator is plain text.
//! Everything here is deterministic: temporary names come from insertion
//! order, table iteration follows insertion order, and float literals use
//! Rust's shortest-roundtrip formatting, so identical input yields
//! byte-identical text. The cache layer relies on that to content-hash
//! generated kernels.

use crate::context::{ConstTable, OptimiseContext};

/// Renders one tier of temporaries as ordered `const double` declarations.
pub fn declarations(table: &ConstTable) -> String {
    let mut out = String::new();
    for (name, expr) in table.iter() {
        out.push_str(&format!("const double {} = {};\n", name, expr));
    }
    out
}

/// Renders both tiers, geometry first: the `G` table is valid before the
/// integration-point loop opens, the `Gip` table inside it.
pub fn tables(ctx: &OptimiseContext) -> String {
    let mut out = declarations(&ctx.geo_consts);
    out.push_str(&declarations(&ctx.ip_consts));
    out
}
