//! Operations deriving one convex polyhedron from another.
//!
//! All of them expect a closed convex solid whose vertex mean lies strictly
//! inside it, and return a solid with outward face winding.

use nalgebra::{Point3, Vector3};
use tracing::trace;

use crate::vector::distance;
use crate::{EdgeMode, GeomError, GeomResult, Plane3D, Polygon3D, Polyhedron, Tolerance};

/// Mean of the vertex positions.
pub(crate) fn vertex_mean(vertices: &[Point3<f64>]) -> Point3<f64> {
    let sum: Vector3<f64> = vertices.iter().map(|p| p.coords).sum();
    Point3::from(sum / vertices.len().max(1) as f64)
}

/// Reverses every face whose normal points towards the vertex mean.
///
/// Only meaningful for convex solids.
pub fn orient_outward(vertices: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> GeomResult<Polyhedron> {
    let solid = Polyhedron::new(vertices, faces)?;
    let centre = vertex_mean(solid.vertices());
    let faces = solid
        .faces()
        .iter()
        .map(|face| {
            let polygon = Polygon3D::from_vertices_unchecked(
                face.iter().map(|&i| solid.vertices()[i]).collect(),
            );
            let outward = polygon.vertex_average() - centre;
            if polygon.newell_normal().dot(&outward) < 0.0 {
                face.iter().rev().copied().collect()
            } else {
                face.clone()
            }
        })
        .collect();
    Polyhedron::new(solid.vertices().to_vec(), faces)
}

/// Orders `indices` counter-clockwise around `axis`, seen from the side
/// `axis` points to.
fn cyclic_order(
    points: &[Point3<f64>],
    indices: &[usize],
    axis: Vector3<f64>,
    tol: Tolerance,
) -> GeomResult<Vec<usize>> {
    let plane = Plane3D::from_point_and_normal(Point3::origin(), axis, tol)?;
    let centre = vertex_mean(&indices.iter().map(|&i| points[i]).collect::<Vec<_>>());
    let mut keyed: Vec<(f64, usize)> = indices
        .iter()
        .map(|&i| {
            let local = plane.to_local(&Point3::from(points[i] - centre));
            (local.y.atan2(local.x), i)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(keyed.into_iter().map(|(_, i)| i).collect())
}

/// Scales `solid` about the origin so its first edge has unit length.
pub(crate) fn with_unit_edges(solid: Polyhedron) -> GeomResult<Polyhedron> {
    let face = solid
        .faces()
        .first()
        .ok_or_else(|| GeomError::invalid_parameter("solid has no faces"))?;
    let length = distance(&solid.vertices()[face[0]], &solid.vertices()[face[1]]);
    if length <= solid.tolerance().epsilon() {
        return Err(GeomError::DegenerateVector { magnitude: length });
    }
    let vertices = solid
        .vertices()
        .iter()
        .map(|p| Point3::from(p.coords / length))
        .collect();
    Polyhedron::new(vertices, solid.faces().to_vec())
}

/// Polar reciprocal about the vertex mean.
///
/// Each face becomes a vertex at `n / d` from the centre, where `n` is the
/// face's unit normal and `d` its distance from the centre; each vertex
/// becomes a face.
pub fn dual(solid: &Polyhedron) -> GeomResult<Polyhedron> {
    let tol = solid.tolerance();
    let adjacency = solid.edges(EdgeMode::Strict)?;
    let centre = vertex_mean(solid.vertices());

    let mut vertices = Vec::with_capacity(solid.face_count());
    for (face_idx, normal) in solid.face_normals(tol)?.into_iter().enumerate() {
        let on_face = solid.vertices()[solid.faces()[face_idx][0]];
        let d = normal.dot(&(on_face - centre));
        if d <= tol.epsilon() {
            return Err(GeomError::invalid_parameter(format!(
                "face {face_idx} passes through the centre"
            )));
        }
        vertices.push(centre + normal / d);
    }

    let faces = (0..solid.vertex_count())
        .map(|v| {
            cyclic_order(
                &vertices,
                adjacency.vertex_faces(v),
                solid.vertices()[v] - centre,
                tol,
            )
        })
        .collect::<GeomResult<Vec<_>>>()?;

    trace!(vertices = vertices.len(), faces = faces.len(), "built dual");
    orient_outward(vertices, faces)
}

/// Rectification: the convex hull of the edge midpoints.
///
/// Each face shrinks to the loop of its edge midpoints and each vertex is
/// replaced by the loop of midpoints of the edges meeting there.
pub fn rectify(solid: &Polyhedron) -> GeomResult<Polyhedron> {
    let tol = solid.tolerance();
    let adjacency = solid.edges(EdgeMode::Strict)?;
    let centre = vertex_mean(solid.vertices());

    let vertices: Vec<Point3<f64>> = adjacency
        .edges()
        .iter()
        .map(|e| nalgebra::center(&solid.vertices()[e.a], &solid.vertices()[e.b]))
        .collect();

    let mut faces = Vec::with_capacity(solid.face_count() + solid.vertex_count());
    for face in solid.faces() {
        let n = face.len();
        let shrunk = (0..n)
            .map(|i| {
                adjacency
                    .edge_index(face[i], face[(i + 1) % n])
                    .ok_or_else(|| GeomError::invalid_parameter("face edge missing from adjacency"))
            })
            .collect::<GeomResult<Vec<_>>>()?;
        faces.push(shrunk);
    }
    for v in 0..solid.vertex_count() {
        let around: Vec<usize> = adjacency
            .vertex_neighbors(v)
            .iter()
            .filter_map(|&w| adjacency.edge_index(v, w))
            .collect();
        faces.push(cyclic_order(&vertices, &around, solid.vertices()[v] - centre, tol)?);
    }

    trace!(vertices = vertices.len(), faces = faces.len(), "rectified");
    orient_outward(vertices, faces)
}

/// Truncation: every vertex is cut off at fraction `t` along its edges.
///
/// `t` must lie in `(0, 0.5)`. Each face of `n` sides becomes a `2n`-gon and
/// each vertex of degree `k` becomes a `k`-gon.
pub fn truncate(solid: &Polyhedron, t: f64) -> GeomResult<Polyhedron> {
    if !(t > 0.0 && t < 0.5) {
        return Err(GeomError::invalid_parameter(format!(
            "truncation fraction {t} outside (0, 0.5)"
        )));
    }
    let tol = solid.tolerance();
    let adjacency = solid.edges(EdgeMode::Strict)?;
    let centre = vertex_mean(solid.vertices());
    let positions = solid.vertices();

    // Edge e contributes vertex 2e near e.a and vertex 2e + 1 near e.b.
    let mut vertices = Vec::with_capacity(2 * adjacency.edge_count());
    for e in adjacency.edges() {
        let (a, b) = (positions[e.a], positions[e.b]);
        vertices.push(a + (b - a) * t);
        vertices.push(b + (a - b) * t);
    }
    let near = |v: usize, w: usize| -> GeomResult<usize> {
        let e = adjacency
            .edge_index(v, w)
            .ok_or_else(|| GeomError::invalid_parameter("face edge missing from adjacency"))?;
        Ok(if adjacency.edges()[e].a == v { 2 * e } else { 2 * e + 1 })
    };

    let mut faces = Vec::with_capacity(solid.face_count() + solid.vertex_count());
    for face in solid.faces() {
        let n = face.len();
        let mut cut = Vec::with_capacity(2 * n);
        for i in 0..n {
            let (v, w) = (face[i], face[(i + 1) % n]);
            cut.push(near(v, w)?);
            cut.push(near(w, v)?);
        }
        faces.push(cut);
    }
    for v in 0..solid.vertex_count() {
        let around = adjacency
            .vertex_neighbors(v)
            .iter()
            .map(|&w| near(v, w))
            .collect::<GeomResult<Vec<_>>>()?;
        faces.push(cyclic_order(&vertices, &around, positions[v] - centre, tol)?);
    }

    trace!(vertices = vertices.len(), faces = faces.len(), t, "truncated");
    orient_outward(vertices, faces)
}
