use serde::Serialize;

use crate::math::{Point3, Vector3};
use crate::mesh::TriangleMesh;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Creates a degenerate box around a single point.
    #[must_use]
    pub fn from_point(point: Point3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Grows the box to include `point`.
    #[must_use]
    pub fn include(self, point: &Point3) -> Self {
        Self {
            min: self.min.inf(point),
            max: self.max.sup(point),
        }
    }

    /// Returns the smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Returns the extents along each axis.
    #[must_use]
    pub fn dimensions(&self) -> Vector3 {
        self.max - self.min
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Computes the axis-aligned bounding box of a triangle soup.
pub struct BoundingBox<'a> {
    mesh: &'a TriangleMesh,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning `None` for a mesh without triangles.
    #[must_use]
    pub fn execute(&self) -> Option<Aabb> {
        bounds_of(self.mesh)
    }
}

#[cfg(feature = "parallel")]
fn bounds_of(mesh: &TriangleMesh) -> Option<Aabb> {
    use rayon::prelude::*;
    mesh.triangles()
        .par_iter()
        .map(|tri| {
            let [p0, p1, p2] = &tri.vertices;
            Aabb::from_point(*p0).include(p1).include(p2)
        })
        .reduce_with(Aabb::union)
}

#[cfg(not(feature = "parallel"))]
fn bounds_of(mesh: &TriangleMesh) -> Option<Aabb> {
    let mut vertices = mesh.vertices();
    let first = vertices.next()?;
    Some(vertices.fold(Aabb::from_point(*first), Aabb::include))
}
