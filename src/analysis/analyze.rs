use serde::Serialize;
use tracing::{info, warn};

use crate::error::{MeshError, Result};
use crate::math::Vector3;
use crate::mesh::TriangleMesh;

use super::{Aabb, Area, BoundingBox, ValidateMesh, Volume, VolumeMethod};

/// Physical metrics of a triangle mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshMetrics {
    /// Number of triangles analyzed.
    pub triangle_count: usize,
    /// Axis-aligned bounds, `None` when the mesh has no triangles.
    pub bounds: Option<Aabb>,
    /// Total surface area.
    pub surface_area: f64,
    /// Enclosed volume, never negative.
    pub volume: f64,
    /// Signed volume; negative when the mesh is wound inward.
    pub signed_volume: f64,
    /// Method `volume` was computed with.
    pub volume_method: VolumeMethod,
}

impl MeshMetrics {
    fn empty(volume_method: VolumeMethod) -> Self {
        Self {
            triangle_count: 0,
            bounds: None,
            surface_area: 0.0,
            volume: 0.0,
            signed_volume: 0.0,
            volume_method,
        }
    }

    /// Returns `true` if the analyzed mesh had no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }

    /// Returns the bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EmptyMesh`] if the mesh had no triangles.
    pub fn aabb(&self) -> Result<Aabb> {
        self.bounds.ok_or_else(|| MeshError::EmptyMesh.into())
    }

    /// Returns the bounding box extents (`x_dim`, `y_dim`, `z_dim`).
    #[must_use]
    pub fn dimensions(&self) -> Option<Vector3> {
        self.bounds.map(|b| b.dimensions())
    }
}

/// Computes bounding box, surface area and volume in one call.
///
/// The mesh is validated first; see [`ValidateMesh`]. Degenerate triangles
/// are rejected by default, so meshes from a kernel that leaves slivers
/// along boolean seams need [`AnalyzeMesh::allow_degenerate`]. Slivers add
/// nothing to area or volume.
pub struct AnalyzeMesh<'a> {
    mesh: &'a TriangleMesh,
    method: VolumeMethod,
    allow_degenerate: bool,
}

impl<'a> AnalyzeMesh<'a> {
    /// Creates a new `AnalyzeMesh` operation.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self {
            mesh,
            method: VolumeMethod::default(),
            allow_degenerate: false,
        }
    }

    /// Sets the volume accumulation method.
    #[must_use]
    pub fn with_volume_method(mut self, method: VolumeMethod) -> Self {
        self.method = method;
        self
    }

    /// Accepts degenerate triangles instead of failing validation.
    #[must_use]
    pub fn allow_degenerate(mut self, allow: bool) -> Self {
        self.allow_degenerate = allow;
        self
    }

    /// Executes the analysis.
    ///
    /// An empty mesh is not an error: it yields zero area and volume and no
    /// bounds.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MalformedMesh`] if validation fails.
    pub fn execute(&self) -> Result<MeshMetrics> {
        if self.mesh.is_empty() {
            warn!("analyzing a mesh without triangles");
            return Ok(MeshMetrics::empty(self.method));
        }

        ValidateMesh::new(self.mesh)
            .allow_degenerate(self.allow_degenerate)
            .execute()?;

        let bounds = BoundingBox::new(self.mesh).execute();
        let surface_area = Area::new(self.mesh).execute();
        let volume_query = Volume::new(self.mesh).with_method(self.method);
        let signed_volume = volume_query.signed();
        let volume = match self.method {
            VolumeMethod::Signed => signed_volume.abs(),
            VolumeMethod::AbsolutePerTriangle => volume_query.execute(),
        };

        let metrics = MeshMetrics {
            triangle_count: self.mesh.len(),
            bounds,
            surface_area,
            volume,
            signed_volume,
            volume_method: self.method,
        };
        if signed_volume < 0.0 {
            warn!(signed_volume, "mesh appears to be wound inward");
        }
        info!(
            triangles = metrics.triangle_count,
            surface_area, volume, "analyzed mesh"
        );
        Ok(metrics)
    }
}
