//! Vector helpers layered over nalgebra.
//!
//! Arithmetic, dot and cross products come straight from nalgebra's
//! operators. This module adds the tolerance-aware pieces: normalization that
//! refuses near-zero vectors, angles between vectors, and embedding of 2D
//! points into 3D.

use nalgebra::{Point2, Point3, Vector2, Vector3};

use crate::{GeomError, GeomResult, Tolerance};

/// Euclidean distance between two 3D points.
#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (b - a).norm()
}

/// Euclidean distance between two 2D points.
#[inline]
pub fn distance2(a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    (b - a).norm()
}

/// Normalizes a 3D vector.
///
/// Fails with [`GeomError::DegenerateVector`] when the length is within
/// tolerance of zero.
pub fn normalize(v: &Vector3<f64>, tol: Tolerance) -> GeomResult<Vector3<f64>> {
    let magnitude = v.norm();
    if magnitude <= tol.epsilon() || !magnitude.is_finite() {
        return Err(GeomError::DegenerateVector { magnitude });
    }
    Ok(v / magnitude)
}

/// Normalizes a 2D vector.
pub fn normalize2(v: &Vector2<f64>, tol: Tolerance) -> GeomResult<Vector2<f64>> {
    let magnitude = v.norm();
    if magnitude <= tol.epsilon() || !magnitude.is_finite() {
        return Err(GeomError::DegenerateVector { magnitude });
    }
    Ok(v / magnitude)
}

/// Unsigned angle between two vectors, in radians (`0..=PI`).
pub fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>, tol: Tolerance) -> GeomResult<f64> {
    let u = normalize(u, tol)?;
    let v = normalize(v, tol)?;
    Ok(u.dot(&v).clamp(-1.0, 1.0).acos())
}

/// Signed angle from `u` to `v` in the plane, in radians (`-PI..=PI`).
///
/// Positive when turning counter-clockwise.
#[inline]
pub fn signed_angle2(u: &Vector2<f64>, v: &Vector2<f64>) -> f64 {
    cross2(u, v).atan2(u.dot(v))
}

/// Z component of the cross product of two 2D vectors.
#[inline]
pub fn cross2(u: &Vector2<f64>, v: &Vector2<f64>) -> f64 {
    u.x * v.y - u.y * v.x
}

/// Embeds a 2D point in the z = 0 plane.
#[inline]
pub fn lift(p: &Point2<f64>) -> Point3<f64> {
    Point3::new(p.x, p.y, 0.0)
}

/// Distance from `p` to the segment `a`-`b` in the plane.
pub fn segment_distance2(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return distance2(p, a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    distance2(p, &(a + ab * t))
}
