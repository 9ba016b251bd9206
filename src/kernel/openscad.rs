use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::config::KernelConfig;
use crate::error::{KernelError, Result};

use super::{GeometryKernel, MeshHandle};

/// Runs the OpenSCAD compiler as a subprocess: `openscad -o <output> <source>`.
#[derive(Debug, Clone)]
pub struct OpenScadKernel {
    program: String,
}

impl OpenScadKernel {
    /// Creates a kernel invoking `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Creates a kernel from configuration.
    #[must_use]
    pub fn from_config(config: &KernelConfig) -> Self {
        Self::new(config.program.clone())
    }

    /// Returns the program this kernel invokes.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for OpenScadKernel {
    fn default() -> Self {
        Self::from_config(&KernelConfig::default())
    }
}

impl GeometryKernel for OpenScadKernel {
    fn evaluate(&self, source: &Path, output: &Path) -> Result<MeshHandle> {
        info!("evaluating {} with {}", source.display(), self.program);
        let result = Command::new(&self.program)
            .arg("-o")
            .arg(output)
            .arg(source)
            .output()
            .map_err(|source| KernelError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !result.status.success() {
            return Err(KernelError::Failed {
                program: self.program.clone(),
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            }
            .into());
        }
        debug!(
            "{} stderr: {}",
            self.program,
            String::from_utf8_lossy(&result.stderr).trim()
        );

        if !output.is_file() {
            return Err(KernelError::MissingOutput(output.to_path_buf()).into());
        }
        Ok(MeshHandle::new(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeptaError;

    #[test]
    fn missing_program_is_spawn_error() {
        let kernel = OpenScadKernel::new("heptatube-no-such-openscad");
        let result = kernel.evaluate(Path::new("in.scad"), Path::new("out.stl"));
        assert!(matches!(
            result,
            Err(HeptaError::Kernel(KernelError::Spawn { .. }))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_failure() {
        let kernel = OpenScadKernel::new("false");
        let result = kernel.evaluate(Path::new("in.scad"), Path::new("out.stl"));
        assert!(matches!(
            result,
            Err(HeptaError::Kernel(KernelError::Failed { .. }))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn success_without_output_is_reported() {
        let dir = std::env::temp_dir().join("heptatube-kernel-missing-output");
        let kernel = OpenScadKernel::new("true");
        let result = kernel.evaluate(Path::new("in.scad"), &dir.join("never.stl"));
        assert!(matches!(
            result,
            Err(HeptaError::Kernel(KernelError::MissingOutput(_)))
        ));
    }

    #[test]
    fn default_uses_openscad() {
        assert_eq!(OpenScadKernel::default().program(), "openscad");
    }
}
