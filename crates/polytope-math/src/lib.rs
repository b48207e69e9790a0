//! Polygon and polyhedron analysis.
//!
//! Measures planar and spatial polygons (area, centroid, perimeter, winding,
//! convexity, point containment) and closed polyhedra (surface area, volume,
//! centroid, triangulation, edge and face adjacency, dihedral angles), and
//! ships a [`catalog`] of canonical solids to feed them.
//!
//! Every predicate takes an explicit [`Tolerance`]. Nothing is cached and no
//! global state is touched, so all types are `Send + Sync` and analyses can
//! run in parallel.
//!
//! ```
//! use nalgebra::Point2;
//! use polytope_math::{Containment, Polygon2D, Tolerance, WindingNumber};
//!
//! let square = Polygon2D::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ])
//! .unwrap();
//! let tol = Tolerance::default();
//!
//! assert_eq!(square.area(), 4.0);
//! assert_eq!(
//!     square.contains(&Point2::new(1.0, 1.0), &WindingNumber, tol),
//!     Containment::Inside
//! );
//! ```

mod adjacency;
mod bounds;
pub mod catalog;
mod containment;
mod error;
mod plane;
mod polygon;
mod polygon3d;
mod polyhedron;
mod tolerance;
mod triangle;
mod triangulate;
pub mod vector;

pub use adjacency::{Edge, EdgeAdjacency, EdgeMode};
pub use bounds::Aabb;
pub use containment::{AngleSum, Containment, PointLocator, WindingNumber, locate};
pub use error::{Flagged, GeomError, GeomResult, Warning};
pub use plane::{Plane3D, PlaneSide};
pub use polygon::{Polygon2D, Winding};
pub use polygon3d::Polygon3D;
pub use polyhedron::Polyhedron;
pub use tolerance::{ANGULAR_EPSILON, EPSILON_FLOOR, EPSILON_SCALE, Tolerance};
pub use triangle::Triangle;
pub use triangulate::{TriangleMesh, triangulate_face, triangulate_polygon};
