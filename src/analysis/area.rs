use crate::mesh::{Triangle, TriangleMesh};

use super::sum_triangles;

/// Computes the total surface area of a triangle soup.
///
/// Sums `|(p1 - p0) x (p2 - p0)| / 2` over all triangles. The result does not
/// depend on winding.
pub struct Area<'a> {
    mesh: &'a TriangleMesh,
}

impl<'a> Area<'a> {
    /// Creates a new `Area` query.
    #[must_use]
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        Self { mesh }
    }

    /// Executes the query, returning the total surface area.
    #[must_use]
    pub fn execute(&self) -> f64 {
        sum_triangles(self.mesh.triangles(), Triangle::area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn unit_cube_area() {
        let mesh = TriangleMesh::cuboid(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        assert_relative_eq!(Area::new(&mesh).execute(), 6.0);
    }

    #[test]
    fn box_area() {
        let mesh = TriangleMesh::cuboid(p(0.0, 0.0, 0.0), p(2.0, 3.0, 4.0));
        // 2*(2*3 + 2*4 + 3*4) = 52
        assert_relative_eq!(Area::new(&mesh).execute(), 52.0, epsilon = 1e-12);
    }

    #[test]
    fn area_ignores_winding() {
        let mesh = TriangleMesh::cuboid(p(0.0, 0.0, 0.0), p(2.0, 3.0, 4.0));
        let flipped: TriangleMesh = mesh
            .triangles()
            .iter()
            .map(|t| Triangle::new(t.vertices[0], t.vertices[2], t.vertices[1]))
            .collect();
        assert_relative_eq!(
            Area::new(&flipped).execute(),
            Area::new(&mesh).execute(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn empty_mesh_has_zero_area() {
        assert_eq!(Area::new(&TriangleMesh::new()).execute(), 0.0);
    }
}
