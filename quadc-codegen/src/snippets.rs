//! The snippet interface between the optimiser and the emission layer.
//!
//! The emission layer assembles a kernel from a fixed template with one
//! placeholder per well-known fragment. Rather than resolving placeholders
//! by name at render time, the set of fragments is a closed enumeration,
//! [`SnippetKind`], and a [`SnippetRegistry`] maps each kind to a handler.
//! Whether a registry covers every kind is checked once, when the registry
//! is assembled, not on every kernel rendered; a handler for an undeclared
//! kind cannot be expressed at all.

use crate::context::OptimiseContext;
use crate::element::{ElementMetadata, IntegralKind};
use crate::emit;
use crate::error::CodegenError;
use once_cell::sync::Lazy;
use quadc_symbolics::Expr;
use std::collections::HashMap;

/// Everything a snippet handler may draw on when rendering its fragment.
#[derive(Debug, Clone, Copy)]
pub struct EmitInput<'a> {
    /// The tables accumulated over the compilation unit.
    pub context: &'a OptimiseContext,

    /// The residual expression of the integrand being emitted.
    pub residual: &'a Expr,

    /// Geometry of the element the kernel is generated for.
    pub element: ElementMetadata,

    /// The domain class of the integral.
    pub integral: IntegralKind,
}

/// The closed set of kernel template placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnippetKind {
    /// Declares which geometry quantities the kernel expects upstream.
    GeometrySetup,

    /// The per-element constant table.
    GeometryConstants,

    /// The per-integration-point constant table.
    IpConstants,

    /// The residual expression evaluated in the innermost loop.
    Residual,
}

impl SnippetKind {
    /// Every snippet kind, in emission order.
    pub const ALL: [SnippetKind; 4] = [
        SnippetKind::GeometrySetup,
        SnippetKind::GeometryConstants,
        SnippetKind::IpConstants,
        SnippetKind::Residual,
    ];

    /// The placeholder keyword this kind fills in the kernel template.
    pub fn keyword(self) -> &'static str {
        match self {
            SnippetKind::GeometrySetup => "geometry_setup",
            SnippetKind::GeometryConstants => "geometry_constants",
            SnippetKind::IpConstants => "ip_constants",
            SnippetKind::Residual => "residual",
        }
    }
}

impl std::fmt::Display for SnippetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A snippet handler: renders one fragment from the emit input.
pub type SnippetFn = fn(&EmitInput<'_>) -> String;

/// A mapping from snippet kinds to handlers.
#[derive(Debug, Clone, Default)]
pub struct SnippetRegistry {
    handlers: HashMap<SnippetKind, SnippetFn>,
}

impl SnippetRegistry {
    /// Creates an empty registry. Callers assembling a custom registry
    /// should finish with [`SnippetRegistry::validate`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the default handler for every kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.handlers.insert(SnippetKind::GeometrySetup, geometry_setup);
        registry.handlers.insert(SnippetKind::GeometryConstants, geometry_constants);
        registry.handlers.insert(SnippetKind::IpConstants, ip_constants);
        registry.handlers.insert(SnippetKind::Residual, residual);
        registry
    }

    /// Registers a handler for the given kind.
    pub fn register(&mut self, kind: SnippetKind, handler: SnippetFn) -> Result<(), CodegenError> {
        if self.handlers.contains_key(&kind) {
            return Err(CodegenError::DuplicateSnippet(kind));
        }
        self.handlers.insert(kind, handler);
        Ok(())
    }

    /// Checks that every declared kind has a handler. Run once when the
    /// registry is assembled.
    pub fn validate(&self) -> Result<(), CodegenError> {
        for kind in SnippetKind::ALL {
            if !self.handlers.contains_key(&kind) {
                return Err(CodegenError::MissingSnippet(kind));
            }
        }
        Ok(())
    }

    /// Renders one fragment.
    pub fn render(&self, kind: SnippetKind, input: &EmitInput<'_>) -> Result<String, CodegenError> {
        let handler = self
            .handlers
            .get(&kind)
            .ok_or(CodegenError::MissingSnippet(kind))?;
        Ok(handler(input))
    }
}

/// The default registry used when the emission layer does not override any
/// fragment.
pub static DEFAULT_REGISTRY: Lazy<SnippetRegistry> = Lazy::new(SnippetRegistry::with_defaults);

fn geometry_setup(input: &EmitInput<'_>) -> String {
    let mut out = String::new();
    for name in &input.context.trans_set {
        out.push_str(&format!("// requires geometry quantity {}\n", name));
    }
    out
}

fn geometry_constants(input: &EmitInput<'_>) -> String {
    emit::declarations(&input.context.geo_consts)
}

fn ip_constants(input: &EmitInput<'_>) -> String {
    emit::declarations(&input.context.ip_consts)
}

fn residual(input: &EmitInput<'_>) -> String {
    format!("{}\n", input.residual)
}

/// Renders the kernel-body fragments for one integrand, in emission order,
/// prefixed with a header describing the integral.
///
/// The surrounding scaffolding (class layout, loop headers, the ABI) is
/// the emission layer's business; this is the complete, ordered payload it
/// splices into its template.
pub fn emit_kernel(
    input: &EmitInput<'_>,
    registry: &SnippetRegistry,
) -> Result<String, CodegenError> {
    let mut out = format!(
        "// {} integral, gdim {}, tdim {}, {} quadrature points\n",
        input.integral,
        input.element.geometric_dimension,
        input.element.topological_dimension,
        input.element.num_quadrature_points,
    );
    for kind in SnippetKind::ALL {
        out.push_str(&registry.render(kind, input)?);
    }
    Ok(out)
}
