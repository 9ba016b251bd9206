//! Workspace configuration for generated files.
//!
//! Everything the file-handling side needs is carried in [`WorkspaceConfig`]
//! and passed explicitly; the planner and analyzer take no configuration.
//!
//! # Example TOML
//!
//! ```toml
//! output_dir = "static/uploads"
//! allowed_extensions = ["stl"]
//!
//! [kernel]
//! program = "/usr/bin/openscad"
//! segments = 64
//!
//! [analysis]
//! volume_method = "signed"
//! allow_degenerate = true
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::VolumeMethod;
use crate::error::{ConfigError, IoError, Result};
use crate::scad::DEFAULT_SEGMENTS;

/// Settings for the external geometry kernel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Executable of the OpenSCAD compiler.
    pub program: String,
    /// `$fn` used for every emitted cylinder.
    pub segments: u32,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            program: "openscad".into(),
            segments: DEFAULT_SEGMENTS,
        }
    }
}

/// Settings for mesh analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub volume_method: VolumeMethod,
    /// Accept degenerate triangles, which kernels commonly emit along seams.
    /// Off by default, so generated meshes may need it.
    pub allow_degenerate: bool,
}

/// Where generated files live and which of them may be served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Directory the SCAD program and mesh are written to.
    pub output_dir: PathBuf,
    /// Lowercase file extensions accepted for upload and analysis.
    pub allowed_extensions: BTreeSet<String>,
    /// File name of the emitted OpenSCAD program.
    pub scad_file_name: String,
    /// File name of the mesh produced by the kernel.
    pub stl_file_name: String,
    pub kernel: KernelConfig,
    pub analysis: AnalysisConfig,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("static/uploads"),
            allowed_extensions: BTreeSet::from(["stl".to_string()]),
            scad_file_name: "dynamic_hepta_tubular_cylinder.scad".into(),
            stl_file_name: "dynamic_hepta_tubular_cylinder.stl".into(),
            kernel: KernelConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl WorkspaceConfig {
    /// Loads configuration from a TOML string. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e).into())
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file can't be read and
    /// [`ConfigError::Parse`] if the TOML is invalid.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Returns `true` if `file_name` has an allowed extension.
    ///
    /// The name must contain a dot; the text after the last dot is compared
    /// case-insensitively.
    #[must_use]
    pub fn allowed_file(&self, file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| self.allowed_extensions.contains(&ext.to_lowercase()))
    }

    /// Path of the emitted OpenSCAD program.
    #[must_use]
    pub fn scad_path(&self) -> PathBuf {
        self.output_dir.join(&self.scad_file_name)
    }

    /// Path of the mesh produced by the kernel.
    #[must_use]
    pub fn stl_path(&self) -> PathBuf {
        self.output_dir.join(&self.stl_file_name)
    }

    /// Resolves a requested download name inside the output directory.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::NotAllowed`] if the name is empty, hidden, or could
    /// escape the output directory.
    pub fn resolve_download(&self, file_name: &str) -> Result<PathBuf> {
        let escapes = file_name.is_empty()
            || file_name.starts_with('.')
            || file_name.contains(['/', '\\', '\0'])
            || file_name.contains("..");
        if escapes {
            return Err(IoError::NotAllowed(file_name.to_string()).into());
        }
        Ok(self.output_dir.join(file_name))
    }

    /// Creates the output directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Write`] if the directory can't be created.
    pub fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|source| {
            IoError::Write {
                path: self.output_dir.clone(),
                source,
            }
            .into()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::HeptaError;

    #[test]
    fn defaults() {
        let config = WorkspaceConfig::default();
        assert_eq!(
            config.scad_path(),
            Path::new("static/uploads/dynamic_hepta_tubular_cylinder.scad")
        );
        assert_eq!(
            config.stl_path(),
            Path::new("static/uploads/dynamic_hepta_tubular_cylinder.stl")
        );
        assert_eq!(config.kernel.program, "openscad");
        assert_eq!(config.kernel.segments, 100);
        assert_eq!(config.analysis.volume_method, VolumeMethod::Signed);
    }

    #[test]
    fn allowed_file_checks_extension() {
        let config = WorkspaceConfig::default();
        assert!(config.allowed_file("part.stl"));
        assert!(config.allowed_file("PART.STL"));
        assert!(config.allowed_file("archive.tar.stl"));
        assert!(!config.allowed_file("stl"));
        assert!(!config.allowed_file("part.obj"));
        assert!(!config.allowed_file("part."));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = WorkspaceConfig::from_toml(
            r#"
            output_dir = "/tmp/out"

            [kernel]
            segments = 32

            [analysis]
            volume_method = "absolute-per-triangle"
            "#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.kernel.segments, 32);
        assert_eq!(config.kernel.program, "openscad");
        assert_eq!(
            config.analysis.volume_method,
            VolumeMethod::AbsolutePerTriangle
        );
        assert!(config.allowed_file("x.stl"));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        assert!(matches!(
            WorkspaceConfig::from_toml("output_dir = ["),
            Err(HeptaError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        assert!(matches!(
            WorkspaceConfig::from_toml_file("/nonexistent/heptatube.toml"),
            Err(HeptaError::Config(ConfigError::Read { .. }))
        ));
    }

    #[test]
    fn downloads_stay_inside_output_dir() {
        let config = WorkspaceConfig::default().with_output_dir("/srv/out");
        assert_eq!(
            config.resolve_download("part.stl").unwrap(),
            PathBuf::from("/srv/out/part.stl")
        );
        for name in ["", "../etc/passwd", "a/b.stl", ".hidden", "a\\b", "x..stl"] {
            assert!(
                matches!(
                    config.resolve_download(name),
                    Err(HeptaError::Io(IoError::NotAllowed(_)))
                ),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = WorkspaceConfig::default().with_output_dir(dir.path().join("nested/out"));
        config.ensure_output_dir().unwrap();
        assert!(config.output_dir.is_dir());
    }
}
