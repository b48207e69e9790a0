//! Face triangulation.
//!
//! Convex loops are fanned from their first vertex. Other loops are ear
//! clipped: a corner is an ear when the triangle it forms winds the same way
//! as the loop and no other remaining vertex lies inside or on it. Every pass
//! checks each remaining corner at most once and removes one vertex, so a
//! face costs O(n²) ear checks. A pass that finds neither an ear nor a
//! collinear corner reports [`GeomError::TriangulationStalled`]; this only
//! happens for self-intersecting loops.

use nalgebra::{Point2, Point3};
use tracing::trace;

use crate::containment::{Containment, WindingNumber};
use crate::{GeomError, GeomResult, Polygon2D, Polygon3D, Tolerance, Winding};

/// Triangles covering the faces of a polyhedron.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangleMesh {
    /// Vertex index triples, wound like their source faces.
    pub triangles: Vec<[usize; 3]>,
    /// Source face of each triangle.
    pub face_of: Vec<usize>,
}

impl TriangleMesh {
    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Returns `true` if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate over `(face, triangle)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, [usize; 3])> + '_ {
        self.face_of.iter().copied().zip(self.triangles.iter().copied())
    }
}

/// Triangulates a planar polygon into `n - 2` triangles of local indices.
///
/// Zero-area loops are fanned; their triangles all have zero area.
pub fn triangulate_polygon(polygon: &Polygon2D, tol: Tolerance) -> GeomResult<Vec<[usize; 3]>> {
    let winding = polygon.winding(tol);
    if winding == Winding::Degenerate || polygon.is_convex(tol) {
        trace!(vertices = polygon.len(), ?winding, "fan triangulation");
        return Ok(fan(polygon.len()));
    }
    trace!(vertices = polygon.len(), "ear clipping");
    ear_clip(polygon.vertices(), winding, tol)
}

/// Triangulates one face of a polyhedron, returning indices into
/// `positions`.
///
/// The face is flattened into its fitted plane first. Faces whose vertices
/// are collinear are fanned.
pub fn triangulate_face(
    positions: &[Point3<f64>],
    face: &[usize],
    tol: Tolerance,
) -> GeomResult<Vec<[usize; 3]>> {
    let polygon = Polygon3D::new(face.iter().map(|&i| positions[i]).collect())?;
    let local = match polygon.plane(tol) {
        Ok(plane) => triangulate_polygon(&polygon.to_planar(&plane), tol)?,
        Err(_) => fan(face.len()),
    };
    Ok(local
        .into_iter()
        .map(|[a, b, c]| [face[a], face[b], face[c]])
        .collect())
}

fn fan(n: usize) -> Vec<[usize; 3]> {
    (1..n - 1).map(|i| [0, i, i + 1]).collect()
}

fn ear_clip(
    points: &[Point2<f64>],
    winding: Winding,
    tol: Tolerance,
) -> GeomResult<Vec<[usize; 3]>> {
    let n = points.len();
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut triangles = Vec::with_capacity(n - 2);
    let mut start = 0;

    while remaining.len() > 3 {
        let m = remaining.len();
        let clipped = (0..m).map(|step| (start + step) % m).find(|&k| {
            corner_winding(points, &remaining, k, tol) == winding
                && is_empty_ear(points, &remaining, k, tol)
        });

        // Collinear corners never form ears; drop one as a zero-area triangle
        // once no real ear is left.
        let k = match clipped {
            Some(k) => k,
            None => (0..m)
                .find(|&k| corner_winding(points, &remaining, k, tol) == Winding::Degenerate)
                .ok_or(GeomError::TriangulationStalled { remaining: m })?,
        };

        triangles.push(corner(&remaining, k));
        remaining.remove(k);
        start = k % (m - 1);
    }

    triangles.push([remaining[0], remaining[1], remaining[2]]);
    Ok(triangles)
}

/// The `(prev, cur, next)` triple around position `k` of `remaining`.
fn corner(remaining: &[usize], k: usize) -> [usize; 3] {
    let m = remaining.len();
    [remaining[(k + m - 1) % m], remaining[k], remaining[(k + 1) % m]]
}

fn corner_triangle(points: &[Point2<f64>], remaining: &[usize], k: usize) -> Polygon2D {
    let [a, b, c] = corner(remaining, k);
    Polygon2D::from_vertices_unchecked(vec![points[a], points[b], points[c]])
}

fn corner_winding(points: &[Point2<f64>], remaining: &[usize], k: usize, tol: Tolerance) -> Winding {
    corner_triangle(points, remaining, k).winding(tol)
}

fn is_empty_ear(points: &[Point2<f64>], remaining: &[usize], k: usize, tol: Tolerance) -> bool {
    let ear = corner(remaining, k);
    let triangle = corner_triangle(points, remaining, k);
    remaining
        .iter()
        .filter(|&&v| !ear.contains(&v))
        .map(|&v| points[v])
        // Repeated positions (e.g. where a loop touches itself) do not block.
        .filter(|p| {
            triangle
                .vertices()
                .iter()
                .all(|t| (t - p).norm() > tol.epsilon())
        })
        .all(|p| triangle.contains(&p, &WindingNumber, tol) == Containment::Outside)
}
