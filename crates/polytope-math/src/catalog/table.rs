use nalgebra::Point3;
use tracing::{debug, warn};

use super::builders::{antiprism, cupola, dipyramid, prism, pyramid, trapezohedron};
use super::construction::{dual, orient_outward, rectify, truncate, with_unit_edges};
use super::{Family, Solid};
use crate::vector::distance;
use crate::{GeomError, GeomResult, Polyhedron};

const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Base polygon names for the parametric families.
const SIDES: [(usize, &str); 8] = [
    (3, "triangular"),
    (4, "square"),
    (5, "pentagonal"),
    (6, "hexagonal"),
    (7, "heptagonal"),
    (8, "octagonal"),
    (9, "enneagonal"),
    (10, "decagonal"),
];

/// Regular icosahedron with unit edges, from the cyclic permutations of
/// `(0, ±1, ±φ)`.
fn icosahedron() -> GeomResult<Polyhedron> {
    let mut vertices = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-GOLDEN_RATIO, GOLDEN_RATIO] {
            vertices.push(Point3::new(0.0, a, b));
            vertices.push(Point3::new(a, b, 0.0));
            vertices.push(Point3::new(b, 0.0, a));
        }
    }

    // Faces are the vertex triples that are pairwise one edge (length 2) apart.
    let adjacent = |i: usize, j: usize| (distance(&vertices[i], &vertices[j]) - 2.0).abs() < 1e-9;
    let mut faces = Vec::with_capacity(20);
    for i in 0..12 {
        for j in i + 1..12 {
            for k in j + 1..12 {
                if adjacent(i, j) && adjacent(j, k) && adjacent(i, k) {
                    faces.push(vec![i, j, k]);
                }
            }
        }
    }
    with_unit_edges(orient_outward(vertices, faces)?)
}

/// Accumulates entries, dropping (and logging) any that fail to build.
#[derive(Default)]
struct TableBuilder {
    solids: Vec<Solid>,
}

impl TableBuilder {
    fn add(
        &mut self,
        name: impl Into<String>,
        code: Option<&str>,
        families: &[Family],
        built: GeomResult<Polyhedron>,
    ) -> Option<Polyhedron> {
        let name = name.into();
        match built {
            Ok(polyhedron) => {
                self.solids
                    .push(Solid::new(name, code, families.to_vec(), polyhedron.clone()));
                Some(polyhedron)
            }
            Err(err) => {
                warn!(solid = %name, error = %err, "skipping catalog entry");
                None
            }
        }
    }
}

pub(super) fn build() -> Vec<Solid> {
    let mut table = TableBuilder::default();

    let tetrahedron = table.add("tetrahedron", None, &[Family::Platonic], pyramid(3));
    let cube = table.add("cube", None, &[Family::Platonic], prism(4));
    let octahedron = table.add("octahedron", None, &[Family::Platonic], dipyramid(4));
    let icosahedron = icosahedron();
    let dodecahedron = icosahedron
        .as_ref()
        .map_err(GeomError::clone)
        .and_then(|ico| with_unit_edges(dual(ico)?));
    table.add("dodecahedron", None, &[Family::Platonic], dodecahedron);
    let icosahedron = table.add("icosahedron", None, &[Family::Platonic], icosahedron);

    let archimedean: [(&str, Option<&Polyhedron>, fn(&Polyhedron) -> GeomResult<Polyhedron>); 5] = [
        ("cuboctahedron", cube.as_ref(), rectify),
        ("icosidodecahedron", icosahedron.as_ref(), rectify),
        ("truncated tetrahedron", tetrahedron.as_ref(), |s| truncate(s, 1.0 / 3.0)),
        ("truncated cube", cube.as_ref(), |s| {
            truncate(s, 1.0 / (2.0 + std::f64::consts::SQRT_2))
        }),
        ("truncated octahedron", octahedron.as_ref(), |s| truncate(s, 1.0 / 3.0)),
    ];
    let mut uniform = Vec::with_capacity(archimedean.len());
    for (name, seed, derive) in archimedean {
        let Some(seed) = seed else {
            warn!(solid = name, "seed solid missing");
            uniform.push(None);
            continue;
        };
        let built = derive(seed).and_then(with_unit_edges);
        uniform.push(table.add(name, None, &[Family::Archimedean], built));
    }

    let catalan = [
        "rhombic dodecahedron",
        "rhombic triacontahedron",
        "triakis tetrahedron",
        "triakis octahedron",
        "tetrakis hexahedron",
    ];
    for (name, seed) in catalan.into_iter().zip(&uniform) {
        if let Some(seed) = seed {
            table.add(name, None, &[Family::ArchimedeanDual], dual(seed));
        }
    }

    let johnson = [
        ("square pyramid", "J1", Family::Pyramid, pyramid(4)),
        ("pentagonal pyramid", "J2", Family::Pyramid, pyramid(5)),
        ("triangular cupola", "J3", Family::Cupola, cupola(3)),
        ("square cupola", "J4", Family::Cupola, cupola(4)),
        ("pentagonal cupola", "J5", Family::Cupola, cupola(5)),
        ("triangular dipyramid", "J12", Family::Dipyramid, dipyramid(3)),
        ("pentagonal dipyramid", "J13", Family::Dipyramid, dipyramid(5)),
    ];
    for (name, code, also, built) in johnson {
        table.add(name, Some(code), &[Family::Johnson, also], built);
    }
    table.add("triangular pyramid", None, &[Family::Pyramid], pyramid(3));
    table.add("square dipyramid", None, &[Family::Dipyramid], dipyramid(4));

    for (n, prefix) in SIDES {
        table.add(format!("{prefix} prism"), None, &[Family::Prism], prism(n));
    }
    for (n, prefix) in SIDES {
        table.add(format!("{prefix} antiprism"), None, &[Family::Antiprism], antiprism(n));
    }
    for (n, prefix) in SIDES {
        table.add(
            format!("{prefix} trapezohedron"),
            None,
            &[Family::Trapezohedron],
            trapezohedron(n),
        );
    }

    debug!(solids = table.solids.len(), "built solid catalog");
    table.solids
}
