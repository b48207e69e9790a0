//! Whole-polyhedron measurements.
//!
//! A [`Polyhedron`] is a vertex list plus faces given as ordered loops of
//! vertex indices. Measurements that need triangles (volume, centroid)
//! triangulate every face on each call; nothing is cached between calls.
//!
//! Faces must all wind counter-clockwise seen from outside for volume and
//! centroid to be meaningful. Inconsistent winding is not detected: the
//! result is simply wrong.

use std::f64::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::triangulate::triangulate_face;
use crate::vector::{angle_between, distance, normalize};
use crate::{
    Aabb, EdgeAdjacency, EdgeMode, GeomError, GeomResult, Plane3D, Polygon3D, Tolerance, Triangle,
    TriangleMesh,
};

/// A polyhedron given by vertex positions and face index loops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyhedron {
    vertices: Vec<Point3<f64>>,
    faces: Vec<Vec<usize>>,
}

impl Polyhedron {
    /// Creates a polyhedron, checking that every face has at least three
    /// indices and that every index is in range.
    ///
    /// Closedness and consistent winding are not checked here; see
    /// [`edges`](Self::edges).
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> GeomResult<Self> {
        for (face_idx, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(GeomError::DegenerateFace {
                    face: face_idx,
                    vertices: face.len(),
                });
            }
            if let Some(&index) = face.iter().find(|&&i| i >= vertices.len()) {
                return Err(GeomError::InvalidIndex {
                    face: face_idx,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Face index loops.
    #[inline]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// The same solid with every face wound the other way.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let faces = self
            .faces
            .iter()
            .map(|face| face.iter().rev().copied().collect())
            .collect();
        Self {
            vertices: self.vertices.clone(),
            faces,
        }
    }

    /// Face `face` as a spatial polygon, or `None` if there is no such face.
    pub fn face_polygon(&self, face: usize) -> Option<Polygon3D> {
        (face < self.faces.len()).then(|| self.polygon(face))
    }

    /// Plane of face `face`, oriented along its outward normal.
    pub fn face_plane(&self, face: usize, tol: Tolerance) -> GeomResult<Plane3D> {
        self.face_polygon(face)
            .ok_or_else(|| {
                GeomError::invalid_parameter(format!(
                    "face {face} out of range ({} faces)",
                    self.faces.len()
                ))
            })?
            .plane(tol)
    }

    fn polygon(&self, face: usize) -> Polygon3D {
        Polygon3D::from_vertices_unchecked(self.faces[face].iter().map(|&i| self.vertices[i]).collect())
    }

    /// Per-axis extent of the vertices.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }

    /// Tolerance scaled to this polyhedron's bounding box.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::scaled(self.bounding_box().diagonal())
    }

    /// Edge adjacency, with boundary edges handled per `mode`.
    pub fn edges(&self, mode: EdgeMode) -> GeomResult<EdgeAdjacency> {
        EdgeAdjacency::build(&self.faces, self.vertices.len(), mode)
    }

    /// Triangulates every face; see [`crate::triangulate`] for the method.
    pub fn triangulate(&self, tol: Tolerance) -> GeomResult<TriangleMesh> {
        let mut mesh = TriangleMesh::default();
        for (face_idx, face) in self.faces.iter().enumerate() {
            let triangles = triangulate_face(&self.vertices, face, tol)?;
            mesh.face_of.extend(std::iter::repeat_n(face_idx, triangles.len()));
            mesh.triangles.extend(triangles);
        }
        debug!(
            faces = self.faces.len(),
            triangles = mesh.len(),
            "triangulated polyhedron"
        );
        Ok(mesh)
    }

    /// Sum of face areas, each measured in its own fitted plane.
    pub fn surface_area(&self, tol: Tolerance) -> f64 {
        (0..self.faces.len())
            .map(|face| self.polygon(face).area(tol))
            .sum()
    }

    /// Signed volume.
    ///
    /// Sums the signed volumes of tetrahedra joining each triangle to vertex
    /// 0. Positive when faces wind counter-clockwise seen from outside.
    pub fn volume(&self, tol: Tolerance) -> GeomResult<f64> {
        let apex = self.reference_point();
        let mesh = self.triangulate(tol)?;
        Ok(mesh
            .triangles
            .iter()
            .map(|&tri| Triangle::from_indices(&self.vertices, tri).signed_volume(&apex))
            .sum())
    }

    /// Volume-weighted centroid.
    ///
    /// Fails with [`GeomError::ZeroVolume`] when the solid is flat, either
    /// because its bounding box is flat or because the signed volume is
    /// below [`Tolerance::volume_epsilon`] of the bounding-box diagonal.
    pub fn centroid(&self, tol: Tolerance) -> GeomResult<Point3<f64>> {
        let bounds = self.bounding_box();
        if bounds.is_flat(tol.epsilon()) {
            return Err(GeomError::ZeroVolume { volume: 0.0 });
        }

        let apex = self.reference_point();
        let mesh = self.triangulate(tol)?;
        let mut volume = 0.0;
        let mut moment = Vector3::zeros();
        for &tri in &mesh.triangles {
            let tri = Triangle::from_indices(&self.vertices, tri);
            let v = tri.signed_volume(&apex);
            volume += v;
            moment += (tri.tetrahedron_centroid(&apex) - apex) * v;
        }

        if volume.abs() <= tol.volume_epsilon(bounds.diagonal()) {
            return Err(GeomError::ZeroVolume { volume });
        }
        Ok(apex + moment / volume)
    }

    fn reference_point(&self) -> Point3<f64> {
        self.vertices.first().copied().unwrap_or_else(Point3::origin)
    }

    /// Outward unit normal of every face.
    pub fn face_normals(&self, tol: Tolerance) -> GeomResult<Vec<Vector3<f64>>> {
        (0..self.faces.len())
            .map(|face| self.polygon(face).unit_normal(tol))
            .collect()
    }

    /// Vertex average of every face.
    pub fn face_midpoints(&self) -> Vec<Point3<f64>> {
        (0..self.faces.len())
            .map(|face| self.polygon(face).vertex_average())
            .collect()
    }

    /// Number of vertices of every face.
    pub fn face_vertex_counts(&self) -> Vec<usize> {
        self.faces.iter().map(Vec::len).collect()
    }

    /// Unit normal at every vertex: the normalized sum of the normals of
    /// the faces using it.
    ///
    /// Vertices used by no face fail with [`GeomError::DegenerateVector`].
    pub fn vertex_normals(&self, tol: Tolerance) -> GeomResult<Vec<Vector3<f64>>> {
        let face_normals = self.face_normals(tol)?;
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];
        for (face, normal) in self.faces.iter().zip(&face_normals) {
            for &v in face {
                sums[v] += normal;
            }
        }
        sums.iter().map(|sum| normalize(sum, tol)).collect()
    }

    /// Interior angle at every corner of every face, in face order.
    ///
    /// Angles come from the two edge vectors meeting at the corner; corners
    /// that turn against the face normal are reflex (greater than π).
    pub fn face_angles(&self, tol: Tolerance) -> GeomResult<Vec<Vec<f64>>> {
        (0..self.faces.len())
            .map(|face| {
                let polygon = self.polygon(face);
                let normal = polygon.newell_normal();
                let pts = polygon.vertices();
                let n = pts.len();
                (0..n)
                    .map(|i| {
                        let to_prev = pts[(i + n - 1) % n] - pts[i];
                        let to_next = pts[(i + 1) % n] - pts[i];
                        let angle = angle_between(&to_prev, &to_next, tol)?;
                        if to_next.cross(&to_prev).dot(&normal) < 0.0 {
                            Ok(TAU - angle)
                        } else {
                            Ok(angle)
                        }
                    })
                    .collect::<GeomResult<Vec<f64>>>()
            })
            .collect()
    }

    /// Length of every edge, in edge order.
    pub fn edge_lengths(&self, mode: EdgeMode) -> GeomResult<Vec<f64>> {
        let adjacency = self.edges(mode)?;
        Ok(adjacency
            .edges()
            .iter()
            .map(|e| distance(&self.vertices[e.a], &self.vertices[e.b]))
            .collect())
    }

    /// Unit normal of every edge, in edge order: the normalized sum of the
    /// normals of the faces meeting there. A boundary edge takes the normal
    /// of its only face.
    ///
    /// Fails with [`GeomError::DegenerateVector`] where two faces fold back
    /// onto each other.
    pub fn edge_normals(&self, mode: EdgeMode, tol: Tolerance) -> GeomResult<Vec<Vector3<f64>>> {
        let adjacency = self.edges(mode)?;
        let normals = self.face_normals(tol)?;
        (0..adjacency.edge_count())
            .map(|e| {
                let sum: Vector3<f64> = adjacency.edge_faces(e).iter().map(|&f| normals[f]).sum();
                normalize(&sum, tol)
            })
            .collect()
    }

    /// Interior dihedral angle of every edge, in edge order.
    ///
    /// For an edge between faces with normals `n1` and `n2` the angle is
    /// `π - ∠(n1, n2)` where the solid is convex along the edge and
    /// `π + ∠(n1, n2)` where it is reflex. Boundary edges yield `None`.
    pub fn edge_angles(&self, mode: EdgeMode, tol: Tolerance) -> GeomResult<Vec<Option<f64>>> {
        let adjacency = self.edges(mode)?;
        let normals = self.face_normals(tol)?;
        Ok((0..adjacency.edge_count())
            .map(|e| {
                let [f1, f2] = adjacency.edge_faces(e) else {
                    return None;
                };
                let (n1, n2) = (normals[*f1], normals[*f2]);
                let between = angle_between(&n1, &n2, tol).unwrap_or(0.0);
                let (a, b) = adjacency.first_direction(e);
                let along = self.vertices[b] - self.vertices[a];
                if n1.cross(&n2).dot(&along) >= 0.0 {
                    Some(PI - between)
                } else {
                    Some(PI + between)
                }
            })
            .collect())
    }

    /// Returns `true` if every face is a regular polygon: all of its edges
    /// agree in length within epsilon and all of its corners agree in angle
    /// within the angular tolerance.
    pub fn faces_are_regular(&self, tol: Tolerance) -> bool {
        let Ok(angles) = self.face_angles(tol) else {
            return false;
        };
        (0..self.faces.len()).zip(&angles).all(|(face, corners)| {
            let polygon = self.polygon(face);
            let pts = polygon.vertices();
            let n = pts.len();
            let first_edge = distance(&pts[0], &pts[1]);
            let edges_equal =
                (0..n).all(|i| (distance(&pts[i], &pts[(i + 1) % n]) - first_edge).abs() <= tol.epsilon());
            let angles_equal = corners
                .iter()
                .all(|a| (a - corners[0]).abs() <= tol.angular());
            edges_equal && angles_equal
        })
    }

    /// `V - E + F`. Two for any closed surface of genus zero.
    pub fn euler_characteristic(&self, mode: EdgeMode) -> GeomResult<i64> {
        let edges = self.edges(mode)?.edge_count();
        let count = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        Ok(count(self.vertices.len()) - count(edges) + count(self.faces.len()))
    }
}
