//! Error and warning types for geometric analysis.

use thiserror::Error;

/// Result type for geometric operations.
pub type GeomResult<T> = Result<T, GeomError>;

/// Errors raised when an input has no sensible numeric answer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// A vector had to be normalized but its length is within tolerance of zero.
    #[error("cannot normalize a vector of length {magnitude:e}")]
    DegenerateVector {
        /// Length of the offending vector.
        magnitude: f64,
    },

    /// No three non-collinear points were found while fitting a plane.
    #[error("no three non-collinear points among {count} points")]
    CollinearPoints {
        /// Number of points that were searched.
        count: usize,
    },

    /// A strict polygon result was requested for a polygon of near-zero area.
    #[error("polygon is degenerate (area {area:e})")]
    DegeneratePolygon {
        /// Signed area of the polygon.
        area: f64,
    },

    /// An edge is not shared by exactly two faces.
    #[error("edge ({a}, {b}) is adjacent to {faces} faces")]
    NonManifold {
        /// Smaller vertex index of the edge.
        a: usize,
        /// Larger vertex index of the edge.
        b: usize,
        /// Number of faces that use the edge.
        faces: usize,
    },

    /// A volume-weighted quantity was requested for a flat solid.
    #[error("polyhedron volume {volume:e} is too close to zero")]
    ZeroVolume {
        /// Signed volume that was computed.
        volume: f64,
    },

    /// Not enough vertices to form the requested shape.
    #[error("need at least {required} vertices, got {actual}")]
    TooFewVertices {
        /// Minimum number of vertices.
        required: usize,
        /// Number of vertices provided.
        actual: usize,
    },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (polyhedron has {vertex_count} vertices)")]
    InvalidIndex {
        /// Face holding the index.
        face: usize,
        /// The out-of-range index.
        index: usize,
        /// Number of vertices in the polyhedron.
        vertex_count: usize,
    },

    /// A face has fewer than three vertices.
    #[error("face {face} has only {vertices} vertices")]
    DegenerateFace {
        /// Index of the face.
        face: usize,
        /// Number of vertices in the face.
        vertices: usize,
    },

    /// Ear clipping could not find a valid ear within its search bound.
    #[error("ear clipping stalled with {remaining} vertices left")]
    TriangulationStalled {
        /// Vertices still unclipped when the search gave up.
        remaining: usize,
    },

    /// A construction parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The catalog has no solid with the requested name.
    #[error("unknown solid '{0}'")]
    UnknownSolid(String),
}

impl GeomError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(details: impl Into<String>) -> Self {
        Self::InvalidParameter(details.into())
    }
}

/// Conditions under which a best-effort result was returned.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    /// The polygon's area is within tolerance of zero; the centroid is the
    /// plain vertex average.
    DegeneratePolygon {
        /// Signed area of the polygon.
        area: f64,
    },
}

/// A value paired with an optional warning about how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flagged<T> {
    /// The computed value.
    pub value: T,
    /// Set when the value comes from a fallback computation.
    pub warning: Option<Warning>,
}

impl<T> Flagged<T> {
    /// Wraps a value computed without any fallback.
    pub fn exact(value: T) -> Self {
        Self {
            value,
            warning: None,
        }
    }

    /// Wraps a fallback value together with the reason for it.
    pub fn warned(value: T, warning: Warning) -> Self {
        Self {
            value,
            warning: Some(warning),
        }
    }

    /// Returns `true` if no fallback was needed.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.warning.is_none()
    }

    /// Applies `f` to the value, keeping the warning.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Flagged<U> {
        Flagged {
            value: f(self.value),
            warning: self.warning,
        }
    }
}
