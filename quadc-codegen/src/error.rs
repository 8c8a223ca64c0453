//! Errors raised while assembling generated code.

use crate::snippets::SnippetKind;

/// An error raised by the emission boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodegenError {
    /// A snippet kind has no registered handler.
    MissingSnippet(SnippetKind),

    /// A handler was registered twice for the same snippet kind.
    DuplicateSnippet(SnippetKind),
}

impl std::fmt::Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodegenError::MissingSnippet(kind) => {
                write!(f, "no handler registered for snippet kind `{}`", kind)
            },
            CodegenError::DuplicateSnippet(kind) => {
                write!(f, "handler registered twice for snippet kind `{}`", kind)
            },
        }
    }
}

impl std::error::Error for CodegenError {}
