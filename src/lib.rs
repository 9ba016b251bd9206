pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod kernel;
pub mod layout;
pub mod math;
pub mod mesh;
pub mod params;
pub mod scad;
pub mod workflow;

pub use error::{HeptaError, Result};
