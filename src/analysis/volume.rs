use serde::{Deserialize, Serialize};

use crate::mesh::{Triangle, TriangleMesh};

use super::sum_triangles;

/// How per-triangle tetrahedron volumes are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolumeMethod {
    /// Sum of signed contributions `p0 . (p1 x p2) / 6`.
    ///
    /// Exact for any closed, consistently oriented mesh.
    #[default]
    Signed,
    /// Sum of `|p0 . (p1 x p2)| / 6`.
    ///
    /// Only matches the enclosed volume when every triangle faces away from
    /// the origin, e.g. a convex mesh containing it. Over-counts otherwise.
    AbsolutePerTriangle,
}

/// Computes the enclosed volume of a closed triangle soup.
///
/// Uses the signed tetrahedron method: each triangle spans a tetrahedron
/// with the origin, and the signed volumes telescope to the enclosed volume.
pub struct Volume<'a> {
    mesh: &'a TriangleMesh,
    method: VolumeMethod,
}

impl<'a> Volume<'a> {
    /// Creates a new `Volume` query using [`VolumeMethod::Signed`].
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self {
            mesh,
            method: VolumeMethod::default(),
        }
    }

    /// Sets the accumulation method.
    #[must_use]
    pub fn with_method(mut self, method: VolumeMethod) -> Self {
        self.method = method;
        self
    }

    /// Returns the signed volume.
    ///
    /// Positive for outward winding, negative for inward winding.
    #[must_use]
    pub fn signed(&self) -> f64 {
        sum_triangles(self.mesh.triangles(), Triangle::signed_volume6) / 6.0
    }

    /// Executes the query, returning the (non-negative) volume.
    #[must_use]
    pub fn execute(&self) -> f64 {
        match self.method {
            VolumeMethod::Signed => self.signed().abs(),
            VolumeMethod::AbsolutePerTriangle => {
                sum_triangles(self.mesh.triangles(), |t| t.signed_volume6().abs()) / 6.0
            }
        }
    }
}
