use std::f64::consts::PI;

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use polytope_math::{EdgeMode, GeomError, Polyhedron, Tolerance};

fn unit_cube() -> Polyhedron {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        vec![0, 3, 2, 1],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![1, 2, 6, 5],
        vec![2, 3, 7, 6],
        vec![3, 0, 4, 7],
    ];
    Polyhedron::new(vertices, faces).unwrap()
}

#[test]
fn unit_cube_volume_area_and_centroid() {
    let cube = unit_cube();
    let tol = cube.tolerance();
    assert_relative_eq!(cube.volume(tol).unwrap(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(cube.surface_area(tol), 6.0, epsilon = 1e-12);
    assert_relative_eq!(
        cube.centroid(tol).unwrap(),
        Point3::new(0.5, 0.5, 0.5),
        epsilon = 1e-12
    );
}

#[test]
fn half_millimetre_cube_in_metres() {
    let side = 5e-4;
    let cube = unit_cube();
    let small = Polyhedron::new(
        cube.vertices().iter().map(|p| p * side).collect(),
        cube.faces().to_vec(),
    )
    .unwrap();
    let tol = small.tolerance();
    assert!(side.powi(3) < tol.epsilon());

    assert_relative_eq!(small.volume(tol).unwrap(), side.powi(3), max_relative = 1e-9);
    assert_relative_eq!(small.surface_area(tol), 6.0 * side * side, max_relative = 1e-9);
    assert_relative_eq!(
        small.centroid(tol).unwrap(),
        Point3::new(0.5, 0.5, 0.5) * side,
        epsilon = 1e-15
    );
    assert_eq!(small.triangulate(tol).unwrap().len(), 12);
    let normals = small.face_normals(tol).unwrap();
    for (small, unit) in normals.iter().zip(cube.face_normals(cube.tolerance()).unwrap()) {
        assert_relative_eq!(*small, unit, epsilon = 1e-12);
    }
}

#[test]
fn measurements_follow_translation() {
    let offset = Vector3::new(1e3, -250.0, 42.0);
    let cube = unit_cube();
    let moved = Polyhedron::new(
        cube.vertices().iter().map(|p| p + offset).collect(),
        cube.faces().to_vec(),
    )
    .unwrap();
    let tol = moved.tolerance();
    assert_relative_eq!(moved.volume(tol).unwrap(), 1.0, epsilon = 1e-9);
    assert_relative_eq!(
        moved.centroid(tol).unwrap(),
        Point3::new(0.5, 0.5, 0.5) + offset,
        epsilon = 1e-9
    );
}

#[test]
fn closed_cube_edges_have_two_faces() {
    let adjacency = unit_cube().edges(EdgeMode::Strict).unwrap();
    assert_eq!(adjacency.edge_count(), 12);
    assert!((0..adjacency.edge_count()).all(|e| adjacency.edge_faces(e).len() == 2));
    assert_eq!(adjacency.boundary_edge_count(), 0);
}

#[test]
fn punctured_cube_reports_four_boundary_edges() {
    let cube = unit_cube();
    let mut faces = cube.faces().to_vec();
    let removed = faces.remove(1);
    let open = Polyhedron::new(cube.vertices().to_vec(), faces).unwrap();

    assert!(matches!(
        open.edges(EdgeMode::Strict),
        Err(GeomError::NonManifold { faces: 1, .. })
    ));

    let adjacency = open.edges(EdgeMode::AllowBoundary).unwrap();
    let boundary: Vec<_> = adjacency.boundary_edges().collect();
    assert_eq!(boundary.len(), 4);
    for edge in boundary {
        assert!(removed.contains(&edge.a) && removed.contains(&edge.b));
        assert_eq!(adjacency.faces_for_edge(edge.a, edge.b).unwrap().len(), 1);
    }
}

#[test]
fn inconsistent_winding_is_silently_wrong() {
    let cube = unit_cube();
    let mut faces = cube.faces().to_vec();
    faces[1].reverse();
    let twisted = Polyhedron::new(cube.vertices().to_vec(), faces).unwrap();
    let tol = twisted.tolerance();
    let volume = twisted.volume(tol).unwrap();
    assert!((volume - 1.0).abs() > 0.5);
}

#[test]
fn tetrahedron_angles() {
    let s = 1.0 / 2.0_f64.sqrt();
    let vertices = vec![
        Point3::new(1.0, 0.0, -s),
        Point3::new(-1.0, 0.0, -s),
        Point3::new(0.0, 1.0, s),
        Point3::new(0.0, -1.0, s),
    ];
    let faces = vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]];
    let tetra = Polyhedron::new(vertices, faces).unwrap();
    let tol = tetra.tolerance();

    assert!(tetra.volume(tol).unwrap() > 0.0);
    for corner in tetra.face_angles(tol).unwrap().into_iter().flatten() {
        assert_relative_eq!(corner, PI / 3.0, epsilon = 1e-12);
    }
    let dihedral = (1.0_f64 / 3.0).acos();
    for angle in tetra.edge_angles(EdgeMode::Strict, tol).unwrap() {
        assert_relative_eq!(angle.unwrap(), dihedral, epsilon = 1e-12);
    }
    for length in tetra.edge_lengths(EdgeMode::Strict).unwrap() {
        assert_relative_eq!(length, 2.0, epsilon = 1e-12);
    }
    assert!(tetra.faces_are_regular(tol));
}

#[test]
fn triangulation_covers_every_face() {
    let cube = unit_cube();
    let tol = Tolerance::default();
    let mesh = cube.triangulate(tol).unwrap();
    assert_eq!(mesh.len(), 12);
    for (face, triangle) in mesh.iter() {
        assert!(triangle.iter().all(|v| cube.faces()[face].contains(v)));
    }
}

#[test]
fn flat_solid_has_no_centroid() {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ];
    let sheet = Polyhedron::new(vertices, vec![vec![0, 1, 2, 3], vec![3, 2, 1, 0]]).unwrap();
    let tol = sheet.tolerance();
    assert!(sheet.bounding_box().is_flat(tol.epsilon()));
    assert_relative_eq!(sheet.volume(tol).unwrap(), 0.0);
    assert!(matches!(sheet.centroid(tol), Err(GeomError::ZeroVolume { .. })));
}
