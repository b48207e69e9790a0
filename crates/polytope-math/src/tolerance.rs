//! Numeric tolerance threaded through every geometric predicate.

use nalgebra::{Point2, Point3};

/// Absolute floor for the linear tolerance.
pub const EPSILON_FLOOR: f64 = 1e-9;

/// Linear tolerance per unit of bounding-box diagonal.
pub const EPSILON_SCALE: f64 = 1e-9;

/// Default tolerance for angle comparisons, in radians.
pub const ANGULAR_EPSILON: f64 = 1e-9;

/// Tolerances used when comparing computed quantities against zero.
///
/// `epsilon` is a length: points closer than this are considered coincident,
/// and a point within `epsilon` of an edge lies on it. Areas and volumes are
/// compared against thresholds of matching dimension, scaled by the extent
/// of the shape being measured (see [`Tolerance::area_epsilon`] and
/// [`Tolerance::volume_epsilon`]). `angular` bounds angle sums and dihedral
/// comparisons.
///
/// A `Tolerance` is a plain value. Callers pick one per analysis and pass it
/// into each call, so analyses are reproducible and safe to run in parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerance {
    epsilon: f64,
    angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: EPSILON_FLOOR,
            angular: ANGULAR_EPSILON,
        }
    }
}

impl Tolerance {
    /// Creates a tolerance with an explicit linear epsilon.
    ///
    /// Negative or non-finite values fall back to the absolute floor.
    pub fn new(epsilon: f64) -> Self {
        let epsilon = if epsilon.is_finite() && epsilon >= 0.0 {
            epsilon
        } else {
            EPSILON_FLOOR
        };
        Self {
            epsilon,
            angular: ANGULAR_EPSILON,
        }
    }

    /// Creates a tolerance scaled to a model whose bounding box has the given
    /// diagonal length.
    pub fn scaled(diagonal: f64) -> Self {
        let scaled = if diagonal.is_finite() {
            EPSILON_SCALE * diagonal.abs()
        } else {
            0.0
        };
        Self::new(EPSILON_FLOOR.max(scaled))
    }

    /// Tolerance scaled to the extent of a 2D point set.
    pub fn for_points2(points: &[Point2<f64>]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (min, max) = points.iter().fold((*first, *first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        });
        Self::scaled((max - min).norm())
    }

    /// Tolerance scaled to the extent of a 3D point set.
    pub fn for_points3(points: &[Point3<f64>]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (min, max) = points.iter().fold((*first, *first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        });
        Self::scaled((max - min).norm())
    }

    /// Returns a copy with a different angular tolerance.
    #[must_use]
    pub fn with_angular(mut self, angular: f64) -> Self {
        if angular.is_finite() && angular >= 0.0 {
            self.angular = angular;
        }
        self
    }

    /// Linear tolerance.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Angular tolerance in radians.
    #[inline]
    pub fn angular(&self) -> f64 {
        self.angular
    }

    /// Threshold below which the area of a shape with the given extent
    /// (bounding-box diagonal) counts as zero.
    #[inline]
    pub fn area_epsilon(&self, extent: f64) -> f64 {
        self.epsilon * extent.abs()
    }

    /// Threshold below which the volume of a solid with the given extent
    /// counts as zero.
    #[inline]
    pub fn volume_epsilon(&self, extent: f64) -> f64 {
        self.epsilon * extent * extent
    }

    /// Returns `true` if `value` is within epsilon of zero.
    #[inline]
    pub fn is_zero(&self, value: f64) -> bool {
        value.abs() <= self.epsilon
    }
}
