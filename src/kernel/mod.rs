//! Evaluation of OpenSCAD programs into meshes.
//!
//! The planner never runs the kernel itself; orchestration code receives a
//! [`GeometryKernel`] and hands it the program file.

mod openscad;

pub use openscad::OpenScadKernel;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::io::load_stl;
use crate::mesh::TriangleMesh;

/// A mesh file produced by a kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshHandle {
    path: PathBuf,
}

impl MeshHandle {
    /// Wraps the path of an existing mesh file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the mesh file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the mesh as a triangle soup.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed.
    pub fn load(&self) -> Result<TriangleMesh> {
        load_stl(&self.path)
    }
}

/// Something that turns a solid-modeling program into a triangle mesh file.
pub trait GeometryKernel {
    /// Evaluates the program at `source` and writes the mesh to `output`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::KernelError`] if evaluation fails.
    fn evaluate(&self, source: &Path, output: &Path) -> Result<MeshHandle>;
}

impl<K: GeometryKernel + ?Sized> GeometryKernel for &K {
    fn evaluate(&self, source: &Path, output: &Path) -> Result<MeshHandle> {
        (**self).evaluate(source, output)
    }
}

impl<K: GeometryKernel + ?Sized> GeometryKernel for Box<K> {
    fn evaluate(&self, source: &Path, output: &Path) -> Result<MeshHandle> {
        (**self).evaluate(source, output)
    }
}
