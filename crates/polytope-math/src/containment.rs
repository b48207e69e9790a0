//! Point-in-polygon strategies.
//!
//! Two independent algorithms are provided. They agree on every point of a
//! simple polygon that is not on its boundary. On self-intersecting polygons
//! they differ: [`AngleSum`] only accepts a total turn of exactly one
//! revolution, so regions wound twice (the core of a pentagram) are
//! `Outside`, while [`WindingNumber`] reports any non-zero winding as
//! `Inside`.

use std::f64::consts::TAU;

use nalgebra::Point2;

use crate::Tolerance;
use crate::vector::{cross2, segment_distance2, signed_angle2};

/// Where a point lies relative to a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Containment {
    /// Strictly inside.
    Inside,
    /// Strictly outside.
    Outside,
    /// Within tolerance of an edge.
    OnBoundary,
}

impl Containment {
    /// Returns `true` for [`Containment::Inside`].
    #[inline]
    pub fn is_inside(self) -> bool {
        self == Self::Inside
    }
}

/// Strategy for deciding whether a point lies inside a closed loop.
///
/// Implementations only see points farther than epsilon from every edge;
/// boundary points are filtered out by [`locate`] first.
pub trait PointLocator {
    /// Returns `true` if `point` is inside the loop described by `vertices`.
    fn is_inside(&self, vertices: &[Point2<f64>], point: &Point2<f64>, tol: Tolerance) -> bool;
}

/// Sums the signed angles each edge subtends at the point.
///
/// Inside when the sum is within the angular tolerance of ±2π.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleSum;

impl PointLocator for AngleSum {
    fn is_inside(&self, vertices: &[Point2<f64>], point: &Point2<f64>, tol: Tolerance) -> bool {
        let sum: f64 = edges(vertices)
            .map(|(a, b)| signed_angle2(&(a - point), &(b - point)))
            .sum();
        // Accumulated rounding grows with the number of edges.
        let slack = tol.angular().max(f64::EPSILON * vertices.len() as f64 * TAU);
        (sum.abs() - TAU).abs() <= slack
    }
}

/// Counts signed crossings of a ray cast in the +x direction.
///
/// Inside when the winding number is non-zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindingNumber;

impl WindingNumber {
    /// Winding number of the loop around `point`.
    pub fn winding(vertices: &[Point2<f64>], point: &Point2<f64>) -> i32 {
        let mut winding = 0;
        for (a, b) in edges(vertices) {
            let side = cross2(&(b - a), &(point - a));
            if a.y <= point.y {
                if b.y > point.y && side > 0.0 {
                    winding += 1;
                }
            } else if b.y <= point.y && side < 0.0 {
                winding -= 1;
            }
        }
        winding
    }
}

impl PointLocator for WindingNumber {
    fn is_inside(&self, vertices: &[Point2<f64>], point: &Point2<f64>, _tol: Tolerance) -> bool {
        Self::winding(vertices, point) != 0
    }
}

/// Classifies a point against a closed loop using the given strategy.
///
/// Points within epsilon of an edge are [`Containment::OnBoundary`]
/// regardless of the strategy.
pub fn locate<L: PointLocator + ?Sized>(
    vertices: &[Point2<f64>],
    point: &Point2<f64>,
    locator: &L,
    tol: Tolerance,
) -> Containment {
    let on_edge = edges(vertices).any(|(a, b)| segment_distance2(point, a, b) <= tol.epsilon());
    if on_edge {
        Containment::OnBoundary
    } else if locator.is_inside(vertices, point, tol) {
        Containment::Inside
    } else {
        Containment::Outside
    }
}

/// Consecutive vertex pairs, wrapping from last to first.
pub(crate) fn edges(vertices: &[Point2<f64>]) -> impl Iterator<Item = (&Point2<f64>, &Point2<f64>)> {
    let n = vertices.len();
    (0..n).map(move |i| (&vertices[i], &vertices[(i + 1) % n]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn square() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ]
    }

    fn pentagram() -> Vec<Point2<f64>> {
        (0_i32..5)
            .map(|i| {
                let angle = PI / 2.0 + f64::from(i) * 4.0 * PI / 5.0;
                Point2::new(angle.cos(), angle.sin())
            })
            .collect()
    }

    #[test]
    fn both_strategies_classify_square() {
        let tol = Tolerance::default();
        let sq = square();
        for locator in [&AngleSum as &dyn PointLocator, &WindingNumber] {
            assert_eq!(locate(&sq, &Point2::new(1.0, 1.0), locator, tol), Containment::Inside);
            assert_eq!(locate(&sq, &Point2::new(3.0, 1.0), locator, tol), Containment::Outside);
            assert_eq!(locate(&sq, &Point2::new(-1.0, 2.0), locator, tol), Containment::Outside);
            assert_eq!(locate(&sq, &Point2::new(2.0, 1.0), locator, tol), Containment::OnBoundary);
            assert_eq!(locate(&sq, &Point2::new(0.0, 0.0), locator, tol), Containment::OnBoundary);
        }
    }

    #[test]
    fn clockwise_loops_are_handled() {
        let tol = Tolerance::default();
        let mut sq = square();
        sq.reverse();
        assert_eq!(WindingNumber::winding(&sq, &Point2::new(1.0, 1.0)), -1);
        assert!(AngleSum.is_inside(&sq, &Point2::new(1.0, 1.0), tol));
    }

    #[test]
    fn strategies_diverge_inside_pentagram_core() {
        let tol = Tolerance::default();
        let star = pentagram();
        let centre = Point2::origin();

        assert_eq!(WindingNumber::winding(&star, &centre).abs(), 2);
        assert_eq!(locate(&star, &centre, &WindingNumber, tol), Containment::Inside);
        assert_eq!(locate(&star, &centre, &AngleSum, tol), Containment::Outside);

        // A point in one of the star's tips is wound once and agrees.
        let tip = Point2::new(0.0, 0.8);
        assert_eq!(locate(&star, &tip, &WindingNumber, tol), Containment::Inside);
        assert_eq!(locate(&star, &tip, &AngleSum, tol), Containment::Inside);
    }
}
