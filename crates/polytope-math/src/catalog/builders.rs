//! Parametric families with unit edge length.
//!
//! Every builder takes the number of sides `n` of the base polygon, places
//! that polygon centred on the z axis, and returns faces wound
//! counter-clockwise seen from outside.

use std::f64::consts::PI;

use nalgebra::Point3;

use super::construction::{dual, orient_outward};
use crate::{GeomError, GeomResult, Polyhedron};

/// Circumradius of a regular `n`-gon with unit sides.
fn circumradius(n: usize) -> f64 {
    1.0 / (2.0 * (PI / n as f64).sin())
}

/// `n` points on a circle of `radius` at height `z`, starting at angle
/// `phase` and turning counter-clockwise.
fn ring(n: usize, radius: f64, phase: f64, z: f64) -> impl Iterator<Item = Point3<f64>> {
    (0..n).map(move |k| {
        let angle = phase + 2.0 * PI * k as f64 / n as f64;
        Point3::new(radius * angle.cos(), radius * angle.sin(), z)
    })
}

fn check_sides(kind: &str, n: usize, max: Option<usize>) -> GeomResult<()> {
    let too_many = max.is_some_and(|max| n > max);
    if n < 3 || too_many {
        let range = match max {
            Some(max) => format!("3..={max}"),
            None => "3 or more".to_owned(),
        };
        return Err(GeomError::invalid_parameter(format!(
            "{kind} needs {range} sides, got {n}"
        )));
    }
    Ok(())
}

/// Height of an apex over a regular `n`-gon so the lateral edges have unit
/// length. Only positive for `n <= 5`.
fn apex_height(n: usize) -> f64 {
    let r = circumradius(n);
    (1.0 - r * r).sqrt()
}

/// The loop `0..n` reversed, so a base at the bottom faces down.
fn base_down(n: usize) -> Vec<usize> {
    (0..n).rev().collect()
}

/// Right prism with square sides.
pub fn prism(n: usize) -> GeomResult<Polyhedron> {
    check_sides("prism", n, None)?;
    let r = circumradius(n);
    let vertices: Vec<_> = ring(n, r, 0.0, -0.5).chain(ring(n, r, 0.0, 0.5)).collect();

    let mut faces = vec![base_down(n), (n..2 * n).collect()];
    for k in 0..n {
        let next = (k + 1) % n;
        faces.push(vec![k, next, next + n, k + n]);
    }
    orient_outward(vertices, faces)
}

/// Antiprism with equilateral triangle sides.
pub fn antiprism(n: usize) -> GeomResult<Polyhedron> {
    check_sides("antiprism", n, None)?;
    let r = circumradius(n);
    let half_turn = PI / n as f64;
    let chord = 2.0 * r * (half_turn / 2.0).sin();
    let h = (1.0 - chord * chord).sqrt();
    let vertices: Vec<_> = ring(n, r, 0.0, -h / 2.0)
        .chain(ring(n, r, half_turn, h / 2.0))
        .collect();

    let mut faces = vec![base_down(n), (n..2 * n).collect()];
    for k in 0..n {
        let next = (k + 1) % n;
        faces.push(vec![k, next, k + n]);
        faces.push(vec![next, next + n, k + n]);
    }
    orient_outward(vertices, faces)
}

/// Pyramid with equilateral triangle sides, for `n` in `3..=5`.
pub fn pyramid(n: usize) -> GeomResult<Polyhedron> {
    check_sides("pyramid", n, Some(5))?;
    let mut vertices: Vec<_> = ring(n, circumradius(n), 0.0, 0.0).collect();
    vertices.push(Point3::new(0.0, 0.0, apex_height(n)));

    let mut faces = vec![base_down(n)];
    faces.extend((0..n).map(|k| vec![k, (k + 1) % n, n]));
    orient_outward(vertices, faces)
}

/// Two pyramids joined at their bases, with equilateral triangle faces, for
/// `n` in `3..=5`. The square dipyramid is the regular octahedron.
pub fn dipyramid(n: usize) -> GeomResult<Polyhedron> {
    check_sides("dipyramid", n, Some(5))?;
    let h = apex_height(n);
    let mut vertices: Vec<_> = ring(n, circumradius(n), 0.0, 0.0).collect();
    vertices.push(Point3::new(0.0, 0.0, h));
    vertices.push(Point3::new(0.0, 0.0, -h));

    let (top, bottom) = (n, n + 1);
    let mut faces = Vec::with_capacity(2 * n);
    for k in 0..n {
        let next = (k + 1) % n;
        faces.push(vec![k, next, top]);
        faces.push(vec![next, k, bottom]);
    }
    orient_outward(vertices, faces)
}

/// Cupola: an `n`-gon joined to a `2n`-gon by alternating squares and
/// triangles, for `n` in `3..=5`.
pub fn cupola(n: usize) -> GeomResult<Polyhedron> {
    check_sides("cupola", n, Some(5))?;
    let step = PI / n as f64;
    let r_top = circumradius(n);
    let r_bottom = circumradius(2 * n);
    let apothem_top = r_top * step.cos();
    let apothem_bottom = r_bottom * (step / 2.0).cos();
    let gap = apothem_bottom - apothem_top;
    let h = (1.0 - gap * gap).sqrt();

    // Bottom vertex j sits at (j - 1/2) * step, top vertex k at (2k + 1) * step.
    let vertices: Vec<_> = ring(2 * n, r_bottom, -step / 2.0, 0.0)
        .chain(ring(n, r_top, step, h))
        .collect();

    let bottom = |j: usize| j % (2 * n);
    let top = |k: usize| 2 * n + k % n;
    let mut faces = vec![base_down(2 * n), (2 * n..3 * n).collect()];
    for k in 0..n {
        faces.push(vec![bottom(2 * k), bottom(2 * k + 1), top(k), top(k + n - 1)]);
        faces.push(vec![bottom(2 * k + 1), bottom(2 * k + 2), top(k)]);
    }
    orient_outward(vertices, faces)
}

/// Trapezohedron: the dual of the `n`-gonal antiprism, with `2n` congruent
/// kite faces.
pub fn trapezohedron(n: usize) -> GeomResult<Polyhedron> {
    check_sides("trapezohedron", n, None)?;
    dual(&antiprism(n)?)
}
