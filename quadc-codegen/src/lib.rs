#![doc = include_str!("../README.md")]

pub mod context;
pub mod element;
pub mod emit;
pub mod error;
pub mod optimise;
pub mod snippets;

pub use context::{ConstTable, OptimiseContext};
pub use element::{ElementMetadata, IntegralKind};
pub use error::CodegenError;
pub use optimise::{optimise_code, optimise_integrand};
pub use snippets::{EmitInput, SnippetKind, SnippetRegistry};

use quadc_symbolics::factor::MAX_FACTOR_PASSES;

/// Tuning parameters for one compilation unit.
///
/// Threaded explicitly into every pipeline call; there is no ambient
/// configuration state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Bound on factor extractions per sum in the reduction pass. Hitting
    /// it produces a best-effort (partially factored) result, never an
    /// error.
    pub max_factor_passes: usize,

    /// Minimum operation count a subexpression must carry before it is
    /// named as a temporary. The default of `1` means bare symbols and
    /// literals stay inline: naming them would trade nothing for a table
    /// entry.
    pub min_hoist_ops: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_factor_passes: MAX_FACTOR_PASSES,
            min_hoist_ops: 1,
        }
    }
}
