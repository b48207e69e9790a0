use std::f64::consts::TAU;

use approx::assert_relative_eq;
use nalgebra::{Point2, Point3};
use polytope_math::vector::segment_distance2;
use polytope_math::{
    AngleSum, Containment, GeomError, Plane3D, Polygon2D, Tolerance, Warning, Winding,
    WindingNumber, triangulate_polygon,
};
use proptest::prelude::*;

/// Convex polygon with vertices on a circle, counter-clockwise.
fn convex_polygon() -> impl Strategy<Value = Polygon2D> {
    (
        prop::collection::vec(0.0..TAU, 3..12),
        0.5..100.0_f64,
        -100.0..100.0_f64,
        -100.0..100.0_f64,
    )
        .prop_filter_map("vertices too close together", |(mut angles, r, cx, cy)| {
            angles.sort_by(f64::total_cmp);
            let gaps_ok = angles.windows(2).all(|w| w[1] - w[0] > 0.05)
                && angles[0] + TAU - angles[angles.len() - 1] > 0.05;
            if !gaps_ok {
                return None;
            }
            let vertices = angles
                .iter()
                .map(|a| Point2::new(cx + r * a.cos(), cy + r * a.sin()))
                .collect();
            Polygon2D::new(vertices).ok()
        })
}

fn rotate_start(polygon: &Polygon2D, shift: usize) -> Polygon2D {
    let mut vertices = polygon.vertices().to_vec();
    let len = vertices.len();
    vertices.rotate_left(shift % len);
    Polygon2D::new(vertices).unwrap()
}

fn boundary_distance(polygon: &Polygon2D, p: &Point2<f64>) -> f64 {
    let v = polygon.vertices();
    (0..v.len())
        .map(|i| segment_distance2(p, &v[i], &v[(i + 1) % v.len()]))
        .fold(f64::INFINITY, f64::min)
}

proptest! {
    #[test]
    fn convex_polygons_are_convex(polygon in convex_polygon()) {
        let tol = Tolerance::for_points2(polygon.vertices());
        prop_assert!(polygon.is_convex(tol));
        prop_assert!(polygon.reversed().is_convex(tol));
        prop_assert_eq!(polygon.winding(tol), Winding::CounterClockwise);
    }

    #[test]
    fn locators_agree_on_convex_polygons(
        polygon in convex_polygon(),
        samples in prop::collection::vec((-1.5..1.5_f64, -1.5..1.5_f64), 100),
    ) {
        let tol = Tolerance::for_points2(polygon.vertices());
        let centre = polygon.vertex_average();
        let reach = polygon
            .vertices()
            .iter()
            .map(|v| (v - centre).norm())
            .fold(0.0, f64::max);

        for (sx, sy) in samples {
            let p = Point2::new(centre.x + sx * reach, centre.y + sy * reach);
            if boundary_distance(&polygon, &p) < 1e-6 * reach {
                continue;
            }
            let by_angle = polygon.contains(&p, &AngleSum, tol);
            let by_winding = polygon.contains(&p, &WindingNumber, tol);
            prop_assert_eq!(by_angle, by_winding);
            prop_assert_ne!(by_angle, Containment::OnBoundary);
        }
    }

    #[test]
    fn perimeter_ignores_start_and_direction(polygon in convex_polygon(), shift in 0usize..12) {
        let perimeter = polygon.perimeter();
        let scale = 1e-9 * perimeter;
        prop_assert!((rotate_start(&polygon, shift).perimeter() - perimeter).abs() <= scale);
        prop_assert!((polygon.reversed().perimeter() - perimeter).abs() <= scale);
    }

    #[test]
    fn fan_triangulation_preserves_area(polygon in convex_polygon()) {
        let tol = Tolerance::for_points2(polygon.vertices());
        let triangles = triangulate_polygon(&polygon, tol).unwrap();
        prop_assert_eq!(triangles.len(), polygon.len() - 2);

        let total: f64 = triangles
            .iter()
            .map(|t| {
                Polygon2D::new(t.iter().map(|&i| polygon.vertices()[i]).collect())
                    .unwrap()
                    .area()
            })
            .sum();
        prop_assert!((total - polygon.area()).abs() <= 1e-9 * polygon.area().max(1.0));
    }

    #[test]
    fn reversal_negates_signed_area(polygon in convex_polygon()) {
        let area = polygon.signed_area();
        prop_assert!(area > 0.0);
        prop_assert!((polygon.reversed().signed_area() + area).abs() <= 1e-9 * area.max(1.0));
    }
}

#[test]
fn square_area_is_side_squared() {
    for side in [0.5, 1.0, 3.0, 1e3] {
        let square = Polygon2D::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(side, 0.0),
            Point2::new(side, side),
            Point2::new(0.0, side),
        ])
        .unwrap();
        assert_relative_eq!(square.signed_area(), side * side);
        assert_relative_eq!(square.reversed().signed_area(), -side * side);
    }
}

#[test]
fn unit_triangle_winding() {
    let tol = Tolerance::default();
    let triangle = Polygon2D::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(0.0, 1.0),
    ])
    .unwrap();
    assert_eq!(triangle.winding(tol), Winding::CounterClockwise);
    assert_eq!(triangle.reversed().winding(tol), Winding::Clockwise);
}

#[test]
fn collinear_triangle_degrades_without_panicking() {
    let tol = Tolerance::default();
    let err = Plane3D::from_three_points(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(2.0, 2.0, 2.0),
        tol,
    )
    .unwrap_err();
    assert_eq!(err, GeomError::CollinearPoints { count: 3 });

    let flat = Polygon2D::new(vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(2.0, 2.0),
    ])
    .unwrap();
    assert_eq!(flat.area(), 0.0);
    assert_eq!(flat.winding(tol), Winding::Degenerate);

    let centroid = flat.centroid(tol);
    assert_eq!(centroid.warning, Some(Warning::DegeneratePolygon { area: 0.0 }));
    assert_relative_eq!(centroid.value, Point2::new(1.0, 1.0));
    assert!(matches!(
        flat.try_centroid(tol),
        Err(GeomError::DegeneratePolygon { .. })
    ));
}

#[test]
fn tiny_dart_triangles_stay_inside() {
    let dart: Vec<Point2<f64>> = [[0.0, 0.0], [0.5, 1.0], [0.0, 2.0], [2.0, 1.0]]
        .iter()
        .map(|[x, y]| Point2::new(x * 1e-5, y * 1e-5))
        .collect();
    let dart = Polygon2D::new(dart).unwrap();
    let tol = Tolerance::for_points2(dart.vertices());
    assert_eq!(dart.winding(tol), Winding::Clockwise);

    let triangles = triangulate_polygon(&dart, tol).unwrap();
    let signed: Vec<f64> = triangles
        .iter()
        .map(|t| {
            Polygon2D::new(t.iter().map(|&i| dart.vertices()[i]).collect())
                .unwrap()
                .signed_area()
        })
        .collect();
    assert!(signed.iter().all(|&a| a < 0.0), "{signed:?}");
    assert_relative_eq!(signed.iter().sum::<f64>(), dart.signed_area(), max_relative = 1e-9);
}

#[test]
fn locators_diverge_on_pentagram_core() {
    let tol = Tolerance::default();
    let star: Vec<Point2<f64>> = (0_i32..5)
        .map(|k| {
            let a = f64::from(2 * k) * TAU / 5.0 + TAU / 4.0;
            Point2::new(a.cos(), a.sin())
        })
        .collect();
    let star = Polygon2D::new(star).unwrap();
    let core = Point2::origin();

    assert_eq!(star.contains(&core, &AngleSum, tol), Containment::Outside);
    assert_eq!(star.contains(&core, &WindingNumber, tol), Containment::Inside);
    assert!(!star.is_convex(tol));
}
