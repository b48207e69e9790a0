//! Planar polygon analysis.

use std::f64::consts::PI;

use nalgebra::{Point2, Vector2};

use crate::containment::{Containment, PointLocator, edges, locate};
use crate::vector::{cross2, distance2, signed_angle2};
use crate::{Flagged, GeomError, GeomResult, Tolerance, Warning};

/// Rotational direction of a vertex loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winding {
    /// Negative signed area.
    Clockwise,
    /// Positive signed area.
    CounterClockwise,
    /// Signed area within tolerance of zero.
    Degenerate,
}

/// A polygon in the plane, defined by an ordered list of vertices.
///
/// Edge `i` joins vertex `i` to vertex `(i + 1) % n`. The loop may be convex
/// or not; self-intersecting loops are accepted but only some queries give
/// meaningful answers for them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon2D {
    vertices: Vec<Point2<f64>>,
}

impl Polygon2D {
    /// Creates a new polygon from a list of vertices.
    ///
    /// Fails with [`GeomError::TooFewVertices`] if fewer than 3 are provided.
    pub fn new(vertices: Vec<Point2<f64>>) -> GeomResult<Self> {
        if vertices.len() < 3 {
            return Err(GeomError::TooFewVertices {
                required: 3,
                actual: vertices.len(),
            });
        }
        Ok(Self { vertices })
    }

    /// Builds a polygon from a vertex list already known to hold three or
    /// more points.
    pub(crate) fn from_vertices_unchecked(vertices: Vec<Point2<f64>>) -> Self {
        debug_assert!(vertices.len() >= 3);
        Self { vertices }
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false: a polygon holds at least three vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The same loop traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }

    /// Shoelace area. Positive for counter-clockwise loops.
    pub fn signed_area(&self) -> f64 {
        // Relative to the first vertex to limit cancellation far from the origin.
        let origin = self.vertices[0];
        let twice: f64 = edges(&self.vertices)
            .map(|(a, b)| cross2(&(a - origin), &(b - origin)))
            .sum();
        twice / 2.0
    }

    /// Unsigned area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Sum of edge lengths, including the closing edge.
    pub fn perimeter(&self) -> f64 {
        edges(&self.vertices).map(|(a, b)| distance2(a, b)).sum()
    }

    /// Average of the vertex positions.
    pub fn vertex_average(&self) -> Point2<f64> {
        let sum: Vector2<f64> = self.vertices.iter().map(|p| p.coords).sum();
        Point2::from(sum / self.vertices.len() as f64)
    }

    /// Diagonal of the bounding box.
    fn extent(&self) -> f64 {
        let first = self.vertices[0];
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
        (max - min).norm()
    }

    /// Area-weighted centroid.
    ///
    /// When the area is within tolerance of zero the vertex average is
    /// returned instead, flagged with [`Warning::DegeneratePolygon`].
    pub fn centroid(&self, tol: Tolerance) -> Flagged<Point2<f64>> {
        let origin = self.vertices[0];
        let mut twice_area = 0.0;
        let mut moment = Vector2::zeros();
        for (a, b) in edges(&self.vertices) {
            let (a, b) = (a - origin, b - origin);
            let cross = cross2(&a, &b);
            twice_area += cross;
            moment += (a + b) * cross;
        }

        let area = twice_area / 2.0;
        if area.abs() <= tol.area_epsilon(self.extent()) {
            return Flagged::warned(self.vertex_average(), Warning::DegeneratePolygon { area });
        }
        Flagged::exact(origin + moment / (3.0 * twice_area))
    }

    /// Area-weighted centroid, failing with [`GeomError::DegeneratePolygon`]
    /// instead of falling back to the vertex average.
    pub fn try_centroid(&self, tol: Tolerance) -> GeomResult<Point2<f64>> {
        match self.centroid(tol) {
            Flagged {
                warning: Some(Warning::DegeneratePolygon { area }),
                ..
            } => Err(GeomError::DegeneratePolygon { area }),
            Flagged { value, .. } => Ok(value),
        }
    }

    /// Winding direction from the sign of the signed area.
    ///
    /// The area is compared against a threshold scaled by the polygon's own
    /// extent, so the answer does not depend on the model's units.
    pub fn winding(&self, tol: Tolerance) -> Winding {
        let area = self.signed_area();
        let threshold = tol.area_epsilon(self.extent());
        if area > threshold {
            Winding::CounterClockwise
        } else if area < -threshold {
            Winding::Clockwise
        } else {
            Winding::Degenerate
        }
    }

    /// Returns `true` if every corner turns the same way.
    ///
    /// Corners whose vertex lies within epsilon of the line through its
    /// neighbours are ignored. Zero-length edges, zero-area loops, backtracking
    /// spikes and loops that wind more than once (star polygons) are not
    /// convex.
    pub fn is_convex(&self, tol: Tolerance) -> bool {
        let n = self.vertices.len();
        let mut sign = 0.0;
        let mut turning = 0.0;

        for i in 0..n {
            let prev = self.vertices[(i + n - 1) % n];
            let cur = self.vertices[i];
            let next = self.vertices[(i + 1) % n];
            let incoming = cur - prev;
            let outgoing = next - cur;

            let longest = incoming.norm().max(outgoing.norm());
            if incoming.norm() <= tol.epsilon() || outgoing.norm() <= tol.epsilon() {
                return false;
            }

            turning += signed_angle2(&incoming, &outgoing);
            let cross = cross2(&incoming, &outgoing);
            if cross.abs() <= tol.epsilon() * longest {
                if incoming.dot(&outgoing) < 0.0 {
                    return false;
                }
                continue;
            }

            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }

        // A simple convex loop turns exactly once; a star turns twice or more.
        sign != 0.0 && turning.abs() < 3.0 * PI
    }

    /// Classifies a point against the polygon with the given strategy.
    ///
    /// See [`crate::AngleSum`] and [`crate::WindingNumber`].
    pub fn contains<L: PointLocator + ?Sized>(
        &self,
        point: &Point2<f64>,
        locator: &L,
        tol: Tolerance,
    ) -> Containment {
        locate(&self.vertices, point, locator, tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AngleSum, WindingNumber};
    use approx::assert_relative_eq;

    fn poly(points: &[[f64; 2]]) -> Polygon2D {
        Polygon2D::new(points.iter().map(|p| Point2::new(p[0], p[1])).collect()).unwrap()
    }

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    #[test]
    fn too_few_vertices() {
        let err = Polygon2D::new(vec![Point2::origin(), Point2::new(1.0, 0.0)]).unwrap_err();
        assert_eq!(err, GeomError::TooFewVertices { required: 3, actual: 2 });
    }

    #[test]
    fn square_area_sign_follows_winding() {
        let sq = poly(&[[0.0, 0.0], [3.0, 0.0], [3.0, 3.0], [0.0, 3.0]]);
        assert_relative_eq!(sq.signed_area(), 9.0);
        assert_relative_eq!(sq.reversed().signed_area(), -9.0);
        assert_relative_eq!(sq.reversed().area(), 9.0);
    }

    #[test]
    fn unit_triangle_winding() {
        let tri = poly(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        assert_eq!(tri.winding(tol()), Winding::CounterClockwise);
        assert_eq!(tri.reversed().winding(tol()), Winding::Clockwise);

        let flat = poly(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        assert_eq!(flat.winding(tol()), Winding::Degenerate);
    }

    #[test]
    fn perimeter_of_rectangle() {
        let rect = poly(&[[0.0, 0.0], [4.0, 0.0], [4.0, 1.0], [0.0, 1.0]]);
        assert_relative_eq!(rect.perimeter(), 10.0);
    }

    #[test]
    fn centroid_of_l_shape() {
        // Two unit squares side by side plus one on top of the left one.
        let l = poly(&[
            [0.0, 0.0],
            [2.0, 0.0],
            [2.0, 1.0],
            [1.0, 1.0],
            [1.0, 2.0],
            [0.0, 2.0],
        ]);
        let c = l.centroid(tol());
        assert!(c.is_exact());
        assert_relative_eq!(c.value, Point2::new(5.0 / 6.0, 5.0 / 6.0), epsilon = 1e-12);
        assert_relative_eq!(l.try_centroid(tol()).unwrap(), c.value);
    }

    #[test]
    fn centroid_far_from_origin() {
        let sq = poly(&[[1e8, 1e8], [1e8 + 2.0, 1e8], [1e8 + 2.0, 1e8 + 2.0], [1e8, 1e8 + 2.0]]);
        let c = sq.centroid(tol()).value;
        assert_relative_eq!(c, Point2::new(1e8 + 1.0, 1e8 + 1.0), epsilon = 1e-6);
    }

    #[test]
    fn degenerate_centroid_falls_back() {
        let flat = poly(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        let c = flat.centroid(tol());
        assert_eq!(c.warning, Some(Warning::DegeneratePolygon { area: 0.0 }));
        assert_relative_eq!(c.value, Point2::new(1.0, 0.0));

        let err = flat.try_centroid(tol()).unwrap_err();
        assert!(matches!(err, GeomError::DegeneratePolygon { .. }));
    }

    #[test]
    fn tiny_polygons_keep_their_winding() {
        let scale = 1e-5;
        let dart = poly(&[[0.0, 0.0], [0.5, 1.0], [0.0, 2.0], [2.0, 1.0]]);
        let small = Polygon2D::new(dart.vertices().iter().map(|p| p * scale).collect()).unwrap();
        let tol = Tolerance::for_points2(small.vertices());
        assert!(small.area() < tol.epsilon());
        assert_eq!(small.winding(tol), Winding::Clockwise);
        assert_eq!(small.reversed().winding(tol), Winding::CounterClockwise);

        let c = small.centroid(tol);
        assert!(c.is_exact());
        assert_relative_eq!(
            c.value,
            Point2::from(dart.centroid(tol).value.coords * scale),
            epsilon = 1e-15
        );
    }

    #[test]
    fn convexity() {
        let sq = poly(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert!(sq.is_convex(tol()));
        assert!(sq.reversed().is_convex(tol()));

        let with_midpoint = poly(&[[0.0, 0.0], [0.5, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert!(with_midpoint.is_convex(tol()));

        let dart = poly(&[[0.0, 0.0], [2.0, 1.0], [0.0, 2.0], [0.5, 1.0]]);
        assert!(!dart.is_convex(tol()));

        let repeated = poly(&[[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
        assert!(!repeated.is_convex(tol()));

        let flat = poly(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        assert!(!flat.is_convex(tol()));
    }

    #[test]
    fn pentagram_is_not_convex() {
        let star: Vec<Point2<f64>> = (0_i32..5)
            .map(|i| {
                let angle = f64::from(i) * 4.0 * PI / 5.0;
                Point2::new(angle.cos(), angle.sin())
            })
            .collect();
        assert!(!Polygon2D::new(star).unwrap().is_convex(tol()));
    }

    #[test]
    fn contains_dart_notch() {
        let dart = poly(&[[0.0, 0.0], [2.0, 1.0], [0.0, 2.0], [0.5, 1.0]]);
        let notch = Point2::new(0.25, 1.0);
        let body = Point2::new(1.0, 1.0);
        for locator in [&AngleSum as &dyn PointLocator, &WindingNumber] {
            assert_eq!(dart.contains(&notch, locator, tol()), Containment::Outside);
            assert_eq!(dart.contains(&body, locator, tol()), Containment::Inside);
            assert_eq!(
                dart.contains(&Point2::new(0.5, 1.0), locator, tol()),
                Containment::OnBoundary
            );
        }
    }
}
