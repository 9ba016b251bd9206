use crate::error::{MeshError, Result};
use crate::math::TOLERANCE;
use crate::mesh::{Triangle, TriangleMesh};

use super::BoundingBox;

/// Rejects meshes whose metrics would be meaningless.
///
/// A triangle is malformed if any coordinate is NaN or infinite, or (unless
/// allowed) if it is degenerate: its height over the longest edge is below
/// the `f32` resolution of the mesh's largest coordinate, which is the
/// precision STL stores. [`TOLERANCE`] is the floor for meshes near the
/// origin.
///
/// Non-finite coordinates are reported before degenerate triangles.
pub struct ValidateMesh<'a> {
    mesh: &'a TriangleMesh,
    allow_degenerate: bool,
}

impl<'a> ValidateMesh<'a> {
    /// Creates a new `ValidateMesh` check that rejects degenerate triangles.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self {
            mesh,
            allow_degenerate: false,
        }
    }

    /// Accepts degenerate triangles. They contribute nothing to area or volume.
    #[must_use]
    pub fn allow_degenerate(mut self, allow: bool) -> Self {
        self.allow_degenerate = allow;
        self
    }

    /// Executes the check.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MalformedMesh`] naming the first offending triangle.
    pub fn execute(&self) -> Result<()> {
        let triangles = self.mesh.triangles();
        if let Some(index) = triangles.iter().position(|t| !t.is_finite()) {
            return Err(MeshError::MalformedMesh {
                triangle: index,
                reason: "non-finite coordinate".into(),
            }
            .into());
        }
        if self.allow_degenerate {
            return Ok(());
        }

        let min_height = degenerate_height(self.mesh);
        for (index, tri) in triangles.iter().enumerate() {
            let height = triangle_height(tri);
            if height < min_height {
                return Err(MeshError::MalformedMesh {
                    triangle: index,
                    reason: format!(
                        "degenerate triangle with height {height:e} (area {:e})",
                        tri.area()
                    ),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Height a triangle must reach to be distinguishable at the mesh's scale.
fn degenerate_height(mesh: &TriangleMesh) -> f64 {
    let scale = BoundingBox::new(mesh)
        .execute()
        .map_or(0.0, |b| b.min.coords.abs().max().max(b.max.coords.abs().max()));
    TOLERANCE.max(f64::from(f32::EPSILON) * scale)
}

/// Smallest height of the triangle, `2 * area / longest edge`.
fn triangle_height(tri: &Triangle) -> f64 {
    let [p0, p1, p2] = tri.vertices;
    let longest = (p1 - p0).norm().max((p2 - p1).norm()).max((p0 - p2).norm());
    if longest < TOLERANCE {
        return 0.0;
    }
    2.0 * tri.area() / longest
}
