//! End-to-end generation and analysis over a configured workspace.
//!
//! ```text
//! SolidSpec -> PlanLayout -> EmitScad -> <output_dir>/*.scad
//!           -> GeometryKernel        -> <output_dir>/*.stl
//!           -> load_stl -> AnalyzeMesh -> MeshMetrics
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use crate::analysis::{AnalyzeMesh, MeshMetrics};
use crate::config::WorkspaceConfig;
use crate::error::{IoError, Result};
use crate::io::{load_stl, write_scad};
use crate::kernel::{GeometryKernel, MeshHandle};
use crate::layout::{PlanLayout, RingLayout, SolidSpec};
use crate::scad::EmitScad;

/// Files produced by [`Workflow::generate`].
#[derive(Debug, Clone)]
pub struct GeneratedArtifacts {
    /// The layout the program was rendered from.
    pub layout: RingLayout,
    /// The OpenSCAD program.
    pub scad_path: PathBuf,
    /// The evaluated mesh.
    pub mesh: MeshHandle,
}

/// Drives the planner, the kernel and the analyzer against one workspace.
pub struct Workflow<K> {
    config: WorkspaceConfig,
    kernel: K,
}

impl<K: GeometryKernel> Workflow<K> {
    /// Creates a new workflow.
    #[must_use]
    pub fn new(config: WorkspaceConfig, kernel: K) -> Self {
        Self { config, kernel }
    }

    /// Returns the workspace configuration.
    #[must_use]
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Plans the layout and renders it as OpenSCAD text.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout can't be planned.
    pub fn render(&self, spec: SolidSpec) -> Result<(RingLayout, String)> {
        let layout = PlanLayout::new(spec).execute()?;
        let source = EmitScad::new(&layout)
            .with_segments(self.config.kernel.segments)
            .execute();
        Ok((layout, source))
    }

    /// Plans the layout and writes the OpenSCAD program to the workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if planning fails or the file can't be written.
    pub fn write_program(&self, spec: SolidSpec) -> Result<(RingLayout, PathBuf)> {
        let (layout, source) = self.render(spec)?;
        self.config.ensure_output_dir()?;
        let scad_path = self.config.scad_path();
        write_scad(&source, &scad_path)?;
        Ok((layout, scad_path))
    }

    /// Writes the OpenSCAD program and evaluates it with the kernel.
    ///
    /// # Errors
    ///
    /// Returns an error if planning, writing or evaluation fails.
    pub fn generate(&self, spec: SolidSpec) -> Result<GeneratedArtifacts> {
        let (layout, scad_path) = self.write_program(spec)?;
        let mesh = self.kernel.evaluate(&scad_path, &self.config.stl_path())?;
        info!(
            holes = layout.total_holes(),
            rings = layout.rings().len(),
            "generated {}",
            mesh.path().display()
        );
        Ok(GeneratedArtifacts {
            layout,
            scad_path,
            mesh,
        })
    }

    /// Loads and analyzes a mesh file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::NotAllowed`] if the extension is not allowed, and
    /// any load or analysis error.
    pub fn analyze(&self, path: &Path) -> Result<MeshMetrics> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !self.config.allowed_file(&name) {
            return Err(IoError::NotAllowed(name).into());
        }
        let mesh = load_stl(path)?;
        AnalyzeMesh::new(&mesh)
            .with_volume_method(self.config.analysis.volume_method)
            .allow_degenerate(self.config.analysis.allow_degenerate)
            .execute()
    }

    /// Analyzes the mesh a previous [`Workflow::generate`] produced.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Read`] if no mesh has been generated yet.
    pub fn view(&self) -> Result<MeshMetrics> {
        self.analyze(&self.config.stl_path())
    }

    /// Resolves a generated file in the output directory for download.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::NotAllowed`] if the name could escape the output
    /// directory and [`IoError::Read`] if no such file exists.
    pub fn download(&self, file_name: &str) -> Result<PathBuf> {
        let path = self.config.resolve_download(file_name)?;
        if !path.is_file() {
            return Err(IoError::Read {
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                path,
            }
            .into());
        }
        Ok(path)
    }
}
