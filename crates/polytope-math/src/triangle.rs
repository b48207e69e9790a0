//! Triangle measurements used by the polyhedron decomposition.

use nalgebra::{Point3, Vector3};

/// A triangle in 3D space, defined by three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f64>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Builds the triangle for index triple `tri` into `positions`.
    ///
    /// Indices must be in range.
    pub fn from_indices(positions: &[Point3<f64>], tri: [usize; 3]) -> Self {
        Self::new(positions[tri[0]], positions[tri[1]], positions[tri[2]])
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>; 3] {
        &self.vertices
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    ///
    /// Its length is twice the triangle's area.
    pub fn normal(&self) -> Vector3<f64> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Area of the triangle.
    #[inline]
    pub fn area(&self) -> f64 {
        self.normal().norm() / 2.0
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f64> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Signed volume of the tetrahedron spanned by the triangle and `apex`.
    ///
    /// Positive when the triangle winds counter-clockwise seen from the side
    /// opposite `apex`, i.e. when its normal points away from `apex`.
    pub fn signed_volume(&self, apex: &Point3<f64>) -> f64 {
        let [a, b, c] = &self.vertices;
        (a - apex).dot(&(b - apex).cross(&(c - apex))) / 6.0
    }

    /// Centroid of the tetrahedron spanned by the triangle and `apex`.
    pub fn tetrahedron_centroid(&self, apex: &Point3<f64>) -> Point3<f64> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords + apex.coords) / 4.0)
    }
}
