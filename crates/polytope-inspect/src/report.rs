//! Whole-polyhedron analysis summary.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};
use polytope_math::catalog::Family;
use polytope_math::{Aabb, EdgeMode, GeomError, Polyhedron};
use serde::Serialize;

/// Everything `show` and `analyze` print about one polyhedron.
#[derive(Debug, Serialize)]
pub struct Report {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub families: Vec<Family>,
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    pub boundary_edges: usize,
    pub euler_characteristic: i64,
    pub triangles: usize,
    pub surface_area: f64,
    pub volume: f64,
    /// `None` for flat solids.
    pub centroid: Option<[f64; 3]>,
    pub bounding_box: Aabb,
    /// Number of faces with each vertex count.
    pub face_kinds: BTreeMap<usize, usize>,
    pub regular_faces: bool,
    /// Smallest and largest dihedral angle, in degrees.
    pub dihedral_range: Option<[f64; 2]>,
}

impl Report {
    pub fn build(
        name: &str,
        families: &[Family],
        solid: &Polyhedron,
        mode: EdgeMode,
    ) -> Result<Self> {
        let tol = solid.tolerance();
        let adjacency = solid.edges(mode).context("deriving edges")?;
        let mesh = solid.triangulate(tol).context("triangulating faces")?;
        let volume = solid.volume(tol).context("measuring volume")?;

        let centroid = match solid.centroid(tol) {
            Ok(c) => Some([c.x, c.y, c.z]),
            Err(GeomError::ZeroVolume { .. }) => None,
            Err(err) => return Err(err).context("locating centroid"),
        };

        let mut face_kinds = BTreeMap::new();
        for count in solid.face_vertex_counts() {
            *face_kinds.entry(count).or_insert(0) += 1;
        }

        let dihedral_range = solid
            .edge_angles(mode, tol)
            .context("measuring dihedral angles")?
            .into_iter()
            .flatten()
            .map(f64::to_degrees)
            .fold(None, |range: Option<[f64; 2]>, angle| match range {
                Some([lo, hi]) => Some([lo.min(angle), hi.max(angle)]),
                None => Some([angle, angle]),
            });

        Ok(Self {
            name: name.to_owned(),
            families: families.to_vec(),
            vertices: solid.vertex_count(),
            edges: adjacency.edge_count(),
            faces: solid.face_count(),
            boundary_edges: adjacency.boundary_edge_count(),
            euler_characteristic: solid.euler_characteristic(mode)?,
            triangles: mesh.len(),
            surface_area: solid.surface_area(tol),
            volume,
            centroid,
            bounding_box: solid.bounding_box(),
            face_kinds,
            regular_faces: solid.faces_are_regular(tol),
            dihedral_range,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        if !self.families.is_empty() {
            let families: Vec<&str> = self.families.iter().map(|family| family.as_str()).collect();
            writeln!(f, "  family:        {}", families.join(", "))?;
        }
        writeln!(
            f,
            "  V / E / F:     {} / {} / {} (Euler {})",
            self.vertices, self.edges, self.faces, self.euler_characteristic
        )?;
        if self.boundary_edges > 0 {
            writeln!(f, "  boundary:      {} edges", self.boundary_edges)?;
        }
        let kinds: Vec<String> = self
            .face_kinds
            .iter()
            .map(|(sides, count)| format!("{count}x{sides}"))
            .collect();
        writeln!(
            f,
            "  faces:         {}{}",
            kinds.join(" "),
            if self.regular_faces { " (regular)" } else { "" }
        )?;
        writeln!(f, "  triangles:     {}", self.triangles)?;
        writeln!(f, "  surface area:  {:.6}", self.surface_area)?;
        writeln!(f, "  volume:        {:.6}", self.volume)?;
        match self.centroid {
            Some([x, y, z]) => writeln!(f, "  centroid:      ({x:.6}, {y:.6}, {z:.6})")?,
            None => writeln!(f, "  centroid:      undefined (zero volume)")?,
        }
        let (min, max) = (self.bounding_box.min, self.bounding_box.max);
        writeln!(
            f,
            "  bounds:        ({:.4}, {:.4}, {:.4}) .. ({:.4}, {:.4}, {:.4})",
            min.x, min.y, min.z, max.x, max.y, max.z
        )?;
        if let Some([lo, hi]) = self.dihedral_range {
            writeln!(f, "  dihedral:      {lo:.3}° .. {hi:.3}°")?;
        }
        Ok(())
    }
}
