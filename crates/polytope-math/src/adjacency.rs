//! Edge, face and vertex adjacency derived from a face list.
//!
//! Edges are not stored by a polyhedron. They are recovered from the faces
//! on demand and live only as long as the analysis that asked for them.

use std::collections::HashMap;

use tracing::debug;

use crate::{GeomError, GeomResult};

/// How edges used by a single face are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeMode {
    /// Every edge must be shared by exactly two faces.
    #[default]
    Strict,
    /// Edges used by one face are accepted as boundary edges. Edges used by
    /// more than two faces are still rejected.
    AllowBoundary,
}

/// An undirected edge between two vertices, stored with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    /// Smaller vertex index.
    pub a: usize,
    /// Larger vertex index.
    pub b: usize,
}

impl Edge {
    /// Creates an edge, ordering the endpoints.
    #[inline]
    pub fn new(v0: usize, v1: usize) -> Self {
        if v0 < v1 {
            Self { a: v0, b: v1 }
        } else {
            Self { a: v1, b: v0 }
        }
    }
}

/// Adjacency tables for one face list.
///
/// Edges are numbered in the order they are first met when walking the
/// faces in order; per-edge queries on [`crate::Polyhedron`] use the same
/// numbering.
#[derive(Debug, Clone)]
pub struct EdgeAdjacency {
    edges: Vec<Edge>,
    /// Faces using each edge, in face order.
    edge_faces: Vec<Vec<usize>>,
    /// Each edge as traversed by its first face.
    first_direction: Vec<(usize, usize)>,
    lookup: HashMap<Edge, usize>,
    vertex_faces: Vec<Vec<usize>>,
    vertex_neighbors: Vec<Vec<usize>>,
}

impl EdgeAdjacency {
    /// Derives adjacency from `faces`, each an ordered loop of indices below
    /// `vertex_count`.
    ///
    /// Fails with [`GeomError::NonManifold`] on the first edge (in edge
    /// order) whose face count is not allowed by `mode`.
    pub fn build(faces: &[Vec<usize>], vertex_count: usize, mode: EdgeMode) -> GeomResult<Self> {
        let mut edges = Vec::new();
        let mut edge_faces: Vec<Vec<usize>> = Vec::new();
        let mut first_direction = Vec::new();
        let mut lookup = HashMap::new();
        let mut vertex_faces = vec![Vec::new(); vertex_count];
        let mut vertex_neighbors = vec![Vec::new(); vertex_count];

        for (face_idx, face) in faces.iter().enumerate() {
            let n = face.len();
            for (i, &v0) in face.iter().enumerate() {
                let v1 = face[(i + 1) % n];
                if vertex_faces[v0].last() != Some(&face_idx) {
                    vertex_faces[v0].push(face_idx);
                }
                if v0 == v1 {
                    continue;
                }
                vertex_neighbors[v0].push(v1);
                vertex_neighbors[v1].push(v0);

                let edge = Edge::new(v0, v1);
                let idx = *lookup.entry(edge).or_insert_with(|| {
                    edges.push(edge);
                    edge_faces.push(Vec::new());
                    first_direction.push((v0, v1));
                    edges.len() - 1
                });
                // A face crossing the same edge twice still counts once.
                if edge_faces[idx].last() != Some(&face_idx) {
                    edge_faces[idx].push(face_idx);
                }
            }
        }

        for neighbors in &mut vertex_neighbors {
            neighbors.sort_unstable();
            neighbors.dedup();
        }

        let min_faces = match mode {
            EdgeMode::Strict => 2,
            EdgeMode::AllowBoundary => 1,
        };
        if let Some((edge, adjacent)) = edges
            .iter()
            .zip(&edge_faces)
            .find(|(_, adjacent)| adjacent.len() < min_faces || adjacent.len() > 2)
        {
            return Err(GeomError::NonManifold {
                a: edge.a,
                b: edge.b,
                faces: adjacent.len(),
            });
        }

        let adjacency = Self {
            edges,
            edge_faces,
            first_direction,
            lookup,
            vertex_faces,
            vertex_neighbors,
        };
        debug!(
            edges = adjacency.edge_count(),
            boundary = adjacency.boundary_edge_count(),
            "built edge adjacency"
        );
        Ok(adjacency)
    }

    /// All edges, in edge order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of unique edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Faces adjacent to edge number `edge` (one or two of them).
    #[inline]
    pub fn edge_faces(&self, edge: usize) -> &[usize] {
        &self.edge_faces[edge]
    }

    /// Edge number `edge` oriented as its first face traverses it.
    #[inline]
    pub fn first_direction(&self, edge: usize) -> (usize, usize) {
        self.first_direction[edge]
    }

    /// Index of the edge joining `v0` and `v1`, if the faces use it.
    pub fn edge_index(&self, v0: usize, v1: usize) -> Option<usize> {
        self.lookup.get(&Edge::new(v0, v1)).copied()
    }

    /// Faces adjacent to the edge joining `v0` and `v1`.
    pub fn faces_for_edge(&self, v0: usize, v1: usize) -> Option<&[usize]> {
        self.edge_index(v0, v1).map(|idx| self.edge_faces(idx))
    }

    /// Faces that use vertex `v`, in face order.
    pub fn vertex_faces(&self, v: usize) -> &[usize] {
        self.vertex_faces.get(v).map_or(&[], Vec::as_slice)
    }

    /// Vertices joined to `v` by an edge, sorted.
    pub fn vertex_neighbors(&self, v: usize) -> &[usize] {
        self.vertex_neighbors.get(v).map_or(&[], Vec::as_slice)
    }

    /// Faces sharing at least one edge with `face`, sorted.
    pub fn face_neighbors(&self, face: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .edge_faces
            .iter()
            .filter(|adjacent| adjacent.contains(&face))
            .flat_map(|adjacent| adjacent.iter().copied())
            .filter(|&f| f != face)
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Iterate over edges used by a single face.
    pub fn boundary_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .iter()
            .zip(&self.edge_faces)
            .filter(|(_, faces)| faces.len() == 1)
            .map(|(&edge, _)| edge)
    }

    /// Count the number of boundary edges.
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_faces.iter().filter(|faces| faces.len() == 1).count()
    }

    /// Returns `true` if every edge is shared by two faces.
    pub fn is_closed(&self) -> bool {
        self.edge_faces.iter().all(|faces| faces.len() == 2)
    }
}
