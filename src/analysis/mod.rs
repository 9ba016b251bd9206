//! Physical metrics of a closed triangle soup.
//!
//! Every query is a single pass over the triangles and independent of their
//! order. With the `parallel` feature the passes run on the rayon pool.

mod analyze;
mod area;
mod bounding_box;
mod validate;
mod volume;

pub use analyze::{AnalyzeMesh, MeshMetrics};
pub use area::Area;
pub use bounding_box::{Aabb, BoundingBox};
pub use validate::ValidateMesh;
pub use volume::{Volume, VolumeMethod};

use crate::mesh::Triangle;

#[cfg(feature = "parallel")]
fn sum_triangles<F>(triangles: &[Triangle], f: F) -> f64
where
    F: Fn(&Triangle) -> f64 + Sync + Send,
{
    use rayon::prelude::*;
    triangles.par_iter().map(f).sum()
}

#[cfg(not(feature = "parallel"))]
fn sum_triangles<F>(triangles: &[Triangle], f: F) -> f64
where
    F: Fn(&Triangle) -> f64 + Sync + Send,
{
    triangles.iter().map(f).sum()
}
