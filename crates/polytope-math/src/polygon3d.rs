//! Spatial polygon analysis.
//!
//! A [`Polygon3D`] is assumed to be planar. Every measurement projects the
//! loop into the 2D basis of its fitted plane and reuses the planar
//! [`Polygon2D`] routines.

use nalgebra::{Point3, Vector3};

use crate::containment::{Containment, PointLocator};
use crate::vector::distance;
use crate::{Flagged, GeomError, GeomResult, Plane3D, Polygon2D, Tolerance, Warning, Winding};

/// A polygon in 3D space, defined by an ordered list of vertices.
///
/// Vertices should be coplanar. The front side is the one from which the
/// loop appears counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon3D {
    vertices: Vec<Point3<f64>>,
}

impl Polygon3D {
    /// Creates a new polygon from a list of vertices.
    ///
    /// Fails with [`GeomError::TooFewVertices`] if fewer than 3 are provided.
    pub fn new(vertices: Vec<Point3<f64>>) -> GeomResult<Self> {
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
    pub(crate) fn from_vertices_unchecked(vertices: Vec<Point3<f64>>) -> Self {
        debug_assert!(vertices.len() >= 3);
        Self { vertices }
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
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

    /// Area vector of the loop (Newell's method): its direction is the
    /// front-facing normal and its length is twice the area.
    ///
    /// Unlike the cross product of the first two edges, this is correct for
    /// non-convex loops.
    pub fn newell_normal(&self) -> Vector3<f64> {
        let origin = self.vertices[0];
        let n = self.vertices.len();
        (1..n - 1)
            .map(|i| (self.vertices[i] - origin).cross(&(self.vertices[i + 1] - origin)))
            .sum()
    }

    /// Unit front-facing normal.
    ///
    /// Fails with [`GeomError::DegenerateVector`] for zero-area loops.
    pub fn unit_normal(&self, tol: Tolerance) -> GeomResult<Vector3<f64>> {
        let newell = self.newell_normal();
        let magnitude = newell.norm();
        if magnitude <= 2.0 * tol.area_epsilon(self.extent()) || !magnitude.is_finite() {
            return Err(GeomError::DegenerateVector { magnitude });
        }
        Ok(newell / magnitude)
    }

    /// The plane the polygon lies on, fitted through its first three
    /// non-collinear vertices and oriented to face the polygon's front.
    pub fn plane(&self, tol: Tolerance) -> GeomResult<Plane3D> {
        let plane = Plane3D::fit(&self.vertices, tol)?;
        if plane.normal().dot(&self.newell_normal()) < 0.0 {
            Ok(plane.flipped())
        } else {
            Ok(plane)
        }
    }

    /// The polygon expressed in the 2D basis of `plane`.
    pub fn to_planar(&self, plane: &Plane3D) -> Polygon2D {
        Polygon2D::from_vertices_unchecked(self.vertices.iter().map(|p| plane.to_local(p)).collect())
    }

    /// Unsigned area. Zero when all vertices are collinear.
    pub fn area(&self, tol: Tolerance) -> f64 {
        match self.plane(tol) {
            Ok(plane) => self.to_planar(&plane).area(),
            Err(_) => 0.0,
        }
    }

    /// Area signed by orientation: positive when the loop is
    /// counter-clockwise seen from the side `reference` points to.
    pub fn area_oriented(&self, reference: &Vector3<f64>, tol: Tolerance) -> f64 {
        let Ok(plane) = self.plane(tol) else {
            return 0.0;
        };
        let signed = self.to_planar(&plane).signed_area();
        if plane.normal().dot(reference) < 0.0 {
            -signed
        } else {
            signed
        }
    }

    /// Winding as seen from the side `reference` points to.
    pub fn winding_about(&self, reference: &Vector3<f64>, tol: Tolerance) -> Winding {
        let area = self.area_oriented(reference, tol);
        let threshold = tol.area_epsilon(self.extent());
        if area > threshold {
            Winding::CounterClockwise
        } else if area < -threshold {
            Winding::Clockwise
        } else {
            Winding::Degenerate
        }
    }

    fn extent(&self) -> f64 {
        let first = self.vertices[0];
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
        (max - min).norm()
    }

    /// Sum of edge lengths, including the closing edge.
    pub fn perimeter(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| distance(&self.vertices[i], &self.vertices[(i + 1) % n]))
            .sum()
    }

    /// Average of the vertex positions.
    pub fn vertex_average(&self) -> Point3<f64> {
        let sum: Vector3<f64> = self.vertices.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Area-weighted centroid, lying on the fitted plane.
    ///
    /// Degenerate loops fall back to the vertex average, flagged with
    /// [`Warning::DegeneratePolygon`].
    pub fn centroid(&self, tol: Tolerance) -> Flagged<Point3<f64>> {
        match self.plane(tol) {
            Ok(plane) => self
                .to_planar(&plane)
                .centroid(tol)
                .map(|c| plane.from_local(&c)),
            Err(_) => Flagged::warned(
                self.vertex_average(),
                Warning::DegeneratePolygon { area: 0.0 },
            ),
        }
    }

    /// Returns `true` if the loop is convex within its plane.
    pub fn is_convex(&self, tol: Tolerance) -> bool {
        self.plane(tol)
            .map(|plane| self.to_planar(&plane).is_convex(tol))
            .unwrap_or(false)
    }

    /// Classifies a point against the polygon.
    ///
    /// Points farther than epsilon from the polygon's plane are outside.
    /// For collinear loops only points on one of the edges count, as
    /// [`Containment::OnBoundary`].
    pub fn contains<L: PointLocator + ?Sized>(
        &self,
        point: &Point3<f64>,
        locator: &L,
        tol: Tolerance,
    ) -> Containment {
        let Ok(plane) = self.plane(tol) else {
            return if self.on_any_edge(point, tol) {
                Containment::OnBoundary
            } else {
                Containment::Outside
            };
        };
        if plane.signed_distance(point).abs() > tol.epsilon() {
            return Containment::Outside;
        }
        self.to_planar(&plane)
            .contains(&plane.to_local(point), locator, tol)
    }

    fn on_any_edge(&self, point: &Point3<f64>, tol: Tolerance) -> bool {
        let n = self.vertices.len();
        (0..n).any(|i| {
            let a = self.vertices[i];
            let ab = self.vertices[(i + 1) % n] - a;
            let len_sq = ab.norm_squared();
            let t = if len_sq == 0.0 {
                0.0
            } else {
                ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0)
            };
            distance(point, &(a + ab * t)) <= tol.epsilon()
        })
    }
}

impl From<Polygon2D> for Polygon3D {
    /// Embeds a planar polygon in the z = 0 plane.
    fn from(polygon: Polygon2D) -> Self {
        Self {
            vertices: polygon.vertices().iter().map(crate::vector::lift).collect(),
        }
    }
}
