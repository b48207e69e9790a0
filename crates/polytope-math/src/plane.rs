//! Plane representation, fitting and 2D projection.

use nalgebra::{Point2, Point3, Vector3};

use crate::vector::normalize;
use crate::{GeomError, GeomResult, Tolerance};

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within tolerance)
    OnPlane,
}

/// A plane in 3D space, represented as `normal · point = offset`.
///
/// The plane also carries an orthonormal in-plane basis `(u, v)` with
/// `u × v = normal`, used to flatten coplanar points into 2D and back.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane3D {
    normal: Vector3<f64>,
    offset: f64,
    u: Vector3<f64>,
    v: Vector3<f64>,
}

impl Plane3D {
    /// Creates a new plane from a normal vector and offset.
    ///
    /// Both are rescaled so the stored normal has unit length.
    pub fn new(normal: Vector3<f64>, offset: f64, tol: Tolerance) -> GeomResult<Self> {
        let norm = normal.norm();
        let unit_normal = normalize(&normal, tol)?;
        Ok(Self::from_unit(unit_normal, offset / norm))
    }

    /// Creates a plane from a point on the plane and a normal vector.
    pub fn from_point_and_normal(
        point: Point3<f64>,
        normal: Vector3<f64>,
        tol: Tolerance,
    ) -> GeomResult<Self> {
        let unit_normal = normalize(&normal, tol)?;
        let offset = unit_normal.dot(&point.coords);
        Ok(Self::from_unit(unit_normal, offset))
    }

    /// Creates a plane from three points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Fails with [`GeomError::CollinearPoints`] if the points are collinear
    /// within tolerance. The test is scale-free: tiny triangles still span a
    /// plane.
    pub fn from_three_points(
        a: Point3<f64>,
        b: Point3<f64>,
        c: Point3<f64>,
        tol: Tolerance,
    ) -> GeomResult<Self> {
        let (ab, ac) = (b - a, c - a);
        let normal = ab.cross(&ac);
        // |ab × ac| is an area: compare it against the triangle's own extent.
        let magnitude = normal.norm();
        if magnitude <= tol.area_epsilon(ab.norm().max(ac.norm())) || !magnitude.is_finite() {
            return Err(GeomError::CollinearPoints { count: 3 });
        }
        let unit_normal = normal / magnitude;
        Ok(Self::from_unit(unit_normal, unit_normal.dot(&a.coords)))
    }

    /// Fits a plane through a point set.
    ///
    /// Uses the first point, the first later point farther than epsilon from
    /// it, and the first point after that lying more than epsilon off the
    /// line through both. Each point is examined at most once.
    ///
    /// Fails with [`GeomError::CollinearPoints`] when fewer than three points
    /// are given or no such triple exists.
    pub fn fit(points: &[Point3<f64>], tol: Tolerance) -> GeomResult<Self> {
        let collinear = GeomError::CollinearPoints {
            count: points.len(),
        };
        let Some((&a, rest)) = points.split_first() else {
            return Err(collinear);
        };

        let Some(b_pos) = rest.iter().position(|p| (p - a).norm() > tol.epsilon()) else {
            return Err(collinear);
        };
        let b = rest[b_pos];
        let ab = b - a;
        let ab_len = ab.norm();

        let c = rest[b_pos + 1..]
            .iter()
            .find(|p| ab.cross(&(*p - a)).norm() / ab_len > tol.epsilon());

        match c {
            Some(&c) => Self::from_three_points(a, b, c, tol).map_err(|_| collinear),
            None => Err(collinear),
        }
    }

    fn from_unit(normal: Vector3<f64>, offset: f64) -> Self {
        let (u, v) = orthonormal_basis(&normal);
        Self {
            normal,
            offset,
            u,
            v,
        }
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The point of the plane closest to the origin.
    #[inline]
    pub fn origin(&self) -> Point3<f64> {
        Point3::from(self.normal * self.offset)
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.offset
    }

    /// Classifies which side of the plane a point lies on.
    pub fn classify_point(&self, point: &Point3<f64>, tol: Tolerance) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > tol.epsilon() {
            PlaneSide::Front
        } else if dist < -tol.epsilon() {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
            u: self.v,
            v: self.u,
        }
    }

    /// Projects a point onto the plane (finds the closest point on the plane).
    #[inline]
    pub fn project_point(&self, point: &Point3<f64>) -> Point3<f64> {
        point - self.normal * self.signed_distance(point)
    }

    /// Coordinates of a point's projection in the plane's `(u, v)` basis.
    ///
    /// Counter-clockwise loops seen from the front map to counter-clockwise
    /// loops in 2D.
    #[inline]
    pub fn to_local(&self, point: &Point3<f64>) -> Point2<f64> {
        let rel = point - self.origin();
        Point2::new(rel.dot(&self.u), rel.dot(&self.v))
    }

    /// Inverse of [`to_local`](Self::to_local) for points on the plane.
    #[inline]
    pub fn from_local(&self, point: &Point2<f64>) -> Point3<f64> {
        self.origin() + self.u * point.x + self.v * point.y
    }
}

/// Two unit vectors spanning the plane orthogonal to `normal`, ordered so
/// that `u × v = normal`.
fn orthonormal_basis(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    // Cross with the axis least aligned to the normal.
    let axis = if normal.x.abs() <= normal.y.abs() && normal.x.abs() <= normal.z.abs() {
        Vector3::x()
    } else if normal.y.abs() <= normal.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let u = axis.cross(normal).normalize();
    let v = normal.cross(&u);
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    #[test]
    fn from_three_points_follows_right_hand_rule() {
        let plane = Plane3D::from_three_points(
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 1.0, 2.0),
            tol(),
        )
        .unwrap();
        assert_relative_eq!(plane.normal(), Vector3::z());
        assert_relative_eq!(plane.offset(), 2.0);
    }

    #[test]
    fn collinear_points_are_rejected() {
        let err = Plane3D::from_three_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
            tol(),
        )
        .unwrap_err();
        assert!(matches!(err, GeomError::CollinearPoints { .. }));
    }

    #[test]
    fn tiny_triangle_spans_a_plane() {
        // |ab × ac| = 1e-10, below the linear epsilon.
        let plane = Plane3D::from_three_points(
            Point3::new(0.0, 0.0, 1e-5),
            Point3::new(1e-5, 0.0, 1e-5),
            Point3::new(0.0, 1e-5, 1e-5),
            tol(),
        )
        .unwrap();
        assert_relative_eq!(plane.normal(), Vector3::z());
        assert_relative_eq!(plane.offset(), 1e-5);
    }

    #[test]
    fn fit_skips_duplicates_and_collinear_points() {
        let points = [
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(2.0, 3.0, 1.0),
        ];
        let plane = Plane3D::fit(&points, tol()).unwrap();
        assert_relative_eq!(plane.normal(), Vector3::z());
        assert_relative_eq!(plane.offset(), 1.0);
    }

    #[test]
    fn fit_fails_on_a_line() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let err = Plane3D::fit(&points, tol()).unwrap_err();
        assert_eq!(err, GeomError::CollinearPoints { count: 3 });
        assert!(Plane3D::fit(&points[..1], tol()).is_err());
        assert!(Plane3D::fit(&[], tol()).is_err());
    }

    #[test]
    fn classify_and_project() {
        let plane = Plane3D::new(Vector3::new(0.0, 2.0, 0.0), 2.0, tol()).unwrap();
        assert_relative_eq!(plane.offset(), 1.0);
        assert_eq!(plane.classify_point(&Point3::new(0.0, 3.0, 0.0), tol()), PlaneSide::Front);
        assert_eq!(plane.classify_point(&Point3::new(5.0, 0.0, 1.0), tol()), PlaneSide::Back);
        assert_eq!(plane.classify_point(&Point3::new(5.0, 1.0, 1.0), tol()), PlaneSide::OnPlane);
        assert_relative_eq!(
            plane.project_point(&Point3::new(3.0, 7.0, 4.0)),
            Point3::new(3.0, 1.0, 4.0)
        );
    }

    #[test]
    fn local_round_trip_preserves_orientation() {
        let plane = Plane3D::from_point_and_normal(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(1.0, 1.0, 1.0),
            tol(),
        )
        .unwrap();
        let p = plane.project_point(&Point3::new(4.0, -1.0, 0.5));
        assert_relative_eq!(plane.from_local(&plane.to_local(&p)), p, epsilon = 1e-12);

        // u × v must equal the normal so windings carry over to 2D.
        let flipped = plane.flipped();
        for pl in [&plane, &flipped] {
            assert_relative_eq!(pl.u.cross(&pl.v), pl.normal(), epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_normal_is_degenerate() {
        let err = Plane3D::new(Vector3::zeros(), 1.0, tol()).unwrap_err();
        assert!(matches!(err, GeomError::DegenerateVector { .. }));
    }
}
