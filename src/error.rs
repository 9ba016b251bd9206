use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for heptatube.
#[derive(Debug, Error)]
pub enum HeptaError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while planning a ring layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid solid spec: {0}")]
    InvalidSpec(String),

    #[error("infeasible layout: ring {ring}: {reason}")]
    InfeasibleLayout { ring: usize, reason: String },
}

/// Errors raised while analyzing a triangle mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("malformed mesh: triangle {triangle}: {reason}")]
    MalformedMesh { triangle: usize, reason: String },

    #[error("mesh has no triangles")]
    EmptyMesh,
}

/// Errors raised while parsing request parameters into a solid spec.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("missing parameter `{0}`")]
    Missing(&'static str),

    #[error("parameter `{field}` is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("parameter `{field}` = {value} is out of range: {reason}")]
    OutOfRange {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Errors related to reading and writing files.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {details}")]
    Parse { path: PathBuf, details: String },

    #[error("file name {0:?} is not allowed")]
    NotAllowed(String),
}

/// Errors raised by a geometry kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("kernel reported success but produced no mesh at {0}")]
    MissingOutput(PathBuf),
}

/// Errors related to loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Convenience type alias for results using [`HeptaError`].
pub type Result<T> = std::result::Result<T, HeptaError>;
