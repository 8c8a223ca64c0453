//! Element and integral metadata handed over by the form-analysis front
//! end.
//!
//! The core does not interpret any of this beyond passing it through to the
//! emitted kernel header; it exists so a compilation request is
//! self-describing.

/// The domain an integral is taken over. A closed set: the emission layer's
/// ABI defines exactly these five integral classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegralKind {
    /// An integral over a cell.
    Cell,

    /// An integral over an exterior facet.
    ExteriorFacet,

    /// An integral over an interior facet.
    InteriorFacet,

    /// A point evaluation at a vertex.
    Vertex,

    /// An integral over a custom domain with runtime quadrature.
    Custom,
}

impl IntegralKind {
    /// Every integral kind, in declaration order.
    pub const ALL: [IntegralKind; 5] = [
        IntegralKind::Cell,
        IntegralKind::ExteriorFacet,
        IntegralKind::InteriorFacet,
        IntegralKind::Vertex,
        IntegralKind::Custom,
    ];

    /// The identifier the emission layer uses for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            IntegralKind::Cell => "cell",
            IntegralKind::ExteriorFacet => "exterior_facet",
            IntegralKind::InteriorFacet => "interior_facet",
            IntegralKind::Vertex => "vertex",
            IntegralKind::Custom => "custom",
        }
    }
}

impl std::fmt::Display for IntegralKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-element geometry handed over together with each integrand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementMetadata {
    /// Dimension of the coordinate space the mesh is embedded in.
    pub geometric_dimension: usize,

    /// Dimension of the reference cell.
    pub topological_dimension: usize,

    /// Number of points in the quadrature scheme.
    pub num_quadrature_points: usize,
}
