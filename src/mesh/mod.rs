//! Triangle soup representation.
//!
//! Triangles carry their own vertices; no shared-vertex topology is stored.
//! Volume computations assume the soup is closed and wound counter-clockwise
//! when viewed from outside, which is not verified here.

use crate::math::{Point3, Vector3};

/// A single triangle as an ordered vertex triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices in winding order.
    pub vertices: [Point3; 3],
}

impl Triangle {
    /// Creates a triangle from three vertices.
    #[must_use]
    pub fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self {
            vertices: [p0, p1, p2],
        }
    }

    /// Returns the (unnormalized) normal `(p1 - p0) x (p2 - p0)`.
    #[must_use]
    pub fn cross(&self) -> Vector3 {
        let [p0, p1, p2] = self.vertices;
        (p1 - p0).cross(&(p2 - p0))
    }

    /// Returns the area of the triangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.cross().norm() * 0.5
    }

    /// Returns six times the signed volume of the tetrahedron spanned by the
    /// triangle and the origin, `p0 . (p1 x p2)`.
    #[must_use]
    pub fn signed_volume6(&self) -> f64 {
        let [p0, p1, p2] = self.vertices;
        p0.coords.dot(&p1.coords.cross(&p2.coords))
    }

    /// Returns `true` if every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|p| p.coords.iter().all(|c| c.is_finite()))
    }
}

/// A finite, ordered sequence of triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with room for `capacity` triangles.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    /// Expands an indexed mesh into a triangle soup.
    ///
    /// Returns `None` if any index is out of bounds.
    #[must_use]
    pub fn from_indexed(vertices: &[Point3], indices: &[[usize; 3]]) -> Option<Self> {
        let triangles = indices
            .iter()
            .map(|&[a, b, c]| {
                Some(Triangle::new(
                    *vertices.get(a)?,
                    *vertices.get(b)?,
                    *vertices.get(c)?,
                ))
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { triangles })
    }

    /// Builds the closed, outward-wound surface of an axis-aligned box
    /// (8 corners, 12 triangles).
    #[must_use]
    pub fn cuboid(min: Point3, max: Point3) -> Self {
        let corner = |i: usize| {
            Point3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            )
        };
        let corners: Vec<Point3> = (0..8).map(corner).collect();
        let indices = [
            [0, 2, 3],
            [0, 3, 1],
            [4, 5, 7],
            [4, 7, 6],
            [0, 1, 5],
            [0, 5, 4],
            [2, 6, 7],
            [2, 7, 3],
            [0, 4, 6],
            [0, 6, 2],
            [1, 3, 7],
            [1, 7, 5],
        ];
        let triangles = indices
            .iter()
            .map(|&[a, b, c]| Triangle::new(corners[a], corners[b], corners[c]))
            .collect();
        Self { triangles }
    }

    /// Appends a triangle.
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Returns the triangles.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterates over every vertex of every triangle.
    pub fn vertices(&self) -> impl Iterator<Item = &Point3> {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }
}

impl FromIterator<Triangle> for TriangleMesh {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Triangle>> for TriangleMesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }
}
