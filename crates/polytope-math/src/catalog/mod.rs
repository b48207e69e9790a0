//! Named canonical polyhedra.
//!
//! The table is generated from a handful of seeds, the parametric builders
//! and the operations [`dual`], [`rectify`] and [`truncate`] the first time
//! it is read, then shared read-only. Every entry is a closed convex solid
//! with outward face winding.
//!
//! ```
//! use polytope_math::catalog::{self, Family};
//!
//! let cube = catalog::lookup("Cube").unwrap();
//! assert_eq!(cube.family(), Family::Platonic);
//! assert_eq!(cube.polyhedron().face_count(), 6);
//! ```

mod builders;
mod construction;
mod table;

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::{GeomError, GeomResult, Polyhedron};

pub use builders::{antiprism, cupola, dipyramid, prism, pyramid, trapezohedron};
pub use construction::{dual, orient_outward, rectify, truncate};

/// Groups of related solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Family {
    /// Regular convex solids.
    Platonic,
    /// Vertex-transitive solids with regular faces of two or more kinds.
    Archimedean,
    /// Face-transitive duals of the Archimedean solids (Catalan solids).
    ArchimedeanDual,
    /// Strictly convex solids with regular faces that are not uniform.
    Johnson,
    /// Two regular n-gons joined by squares.
    Prism,
    /// Two regular n-gons, one rotated by half a step, joined by triangles.
    Antiprism,
    /// A regular n-gon with an apex over its centre.
    Pyramid,
    /// Two pyramids joined at their bases.
    Dipyramid,
    /// An n-gon and a 2n-gon joined by alternating triangles and squares.
    Cupola,
    /// Duals of the antiprisms, with kite faces.
    Trapezohedron,
}

impl Family {
    /// Every family, in table order.
    pub const ALL: [Family; 10] = [
        Family::Platonic,
        Family::Archimedean,
        Family::ArchimedeanDual,
        Family::Johnson,
        Family::Prism,
        Family::Antiprism,
        Family::Pyramid,
        Family::Dipyramid,
        Family::Cupola,
        Family::Trapezohedron,
    ];

    /// Kebab-case name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Platonic => "platonic",
            Family::Archimedean => "archimedean",
            Family::ArchimedeanDual => "archimedean-dual",
            Family::Johnson => "johnson",
            Family::Prism => "prism",
            Family::Antiprism => "antiprism",
            Family::Pyramid => "pyramid",
            Family::Dipyramid => "dipyramid",
            Family::Cupola => "cupola",
            Family::Trapezohedron => "trapezohedron",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = GeomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s);
        Family::ALL
            .into_iter()
            .find(|family| normalize_name(family.as_str()) == key)
            .ok_or_else(|| GeomError::invalid_parameter(format!("unknown family '{s}'")))
    }
}

/// A named entry of the catalog.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solid {
    name: String,
    code: Option<String>,
    families: Vec<Family>,
    polyhedron: Polyhedron,
}

impl Solid {
    pub(crate) fn new(
        name: impl Into<String>,
        code: Option<&str>,
        families: Vec<Family>,
        polyhedron: Polyhedron,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.map(str::to_owned),
            families,
            polyhedron,
        }
    }

    /// Lower-case display name, e.g. `"truncated cube"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short code, e.g. `"J1"` for Johnson solids.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// The family the solid is listed under first.
    pub fn family(&self) -> Family {
        self.families[0]
    }

    /// All families the solid belongs to.
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// The solid's geometry, with unit edges where the family allows it.
    pub fn polyhedron(&self) -> &Polyhedron {
        &self.polyhedron
    }

    fn matches(&self, key: &str) -> bool {
        normalize_name(&self.name) == key
            || self.code.as_deref().is_some_and(|code| normalize_name(code) == key)
    }
}

static TABLE: LazyLock<Vec<Solid>> = LazyLock::new(table::build);

/// Case-folds `name` and treats spaces, hyphens and underscores alike.
fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Every solid in the catalog, grouped by family.
pub fn solids() -> &'static [Solid] {
    &TABLE
}

/// Solids belonging to `family`, including those listed first elsewhere.
pub fn family(family: Family) -> impl Iterator<Item = &'static Solid> {
    TABLE.iter().filter(move |solid| solid.families.contains(&family))
}

/// Finds a solid by name or code.
///
/// Matching ignores case and treats spaces, hyphens and underscores as the
/// same character, so `"Truncated-Cube"` finds `"truncated cube"`.
pub fn lookup(name: &str) -> GeomResult<&'static Solid> {
    let key = normalize_name(name);
    TABLE
        .iter()
        .find(|solid| solid.matches(&key))
        .ok_or_else(|| GeomError::UnknownSolid(name.to_owned()))
}
