//! File I/O: STL triangle soups in, STL and OpenSCAD text out.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{IoError, Result};
use crate::math::{Point3, Vector3};
use crate::mesh::{Triangle, TriangleMesh};

/// Loads a binary or ASCII STL file as a triangle soup.
///
/// Triangles are kept in file order and are not deduplicated. Stored facet
/// normals are ignored; winding alone defines orientation.
///
/// # Errors
///
/// Returns [`IoError::Read`] if the file can't be opened and
/// [`IoError::Parse`] if it is not valid STL.
pub fn load_stl(path: &Path) -> Result<TriangleMesh> {
    let file = File::open(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mesh = read_stl(&mut reader).map_err(|e| IoError::Parse {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    info!("loaded {} triangles from {}", mesh.len(), path.display());
    Ok(mesh)
}

/// Reads STL data from any seekable reader.
///
/// # Errors
///
/// Returns the underlying I/O error if the data is not valid STL.
pub fn read_stl<R: Read + Seek>(reader: &mut R) -> std::io::Result<TriangleMesh> {
    let triangles = stl_io::create_stl_reader(reader)?;
    let mut mesh = TriangleMesh::new();
    for triangle in triangles {
        let triangle = triangle?;
        let [a, b, c] = triangle.vertices.map(to_point);
        mesh.push(Triangle::new(a, b, c));
    }
    debug!("read {} STL facets", mesh.len());
    Ok(mesh)
}

/// Writes a mesh as binary STL.
///
/// Coordinates are narrowed to `f32`, the precision STL stores.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file can't be created or written.
pub fn save_stl(mesh: &TriangleMesh, path: &Path) -> Result<()> {
    let write_err = |source| IoError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    write_stl(mesh, &mut writer).map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    info!("wrote {} triangles to {}", mesh.len(), path.display());
    Ok(())
}

/// Writes a mesh as binary STL to any writer.
///
/// # Errors
///
/// Returns the underlying I/O error.
pub fn write_stl<W: Write>(mesh: &TriangleMesh, writer: &mut W) -> std::io::Result<()> {
    let facets: Vec<stl_io::Triangle> = mesh.triangles().iter().map(to_facet).collect();
    stl_io::write_stl(writer, facets.iter())
}

/// Writes an OpenSCAD program to disk.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file can't be written.
pub fn write_scad(source: &str, path: &Path) -> Result<()> {
    fs::write(path, source).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote {} bytes of OpenSCAD to {}", source.len(), path.display());
    Ok(())
}

fn to_point(v: stl_io::Vertex) -> Point3 {
    let [x, y, z] = v.0;
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

#[allow(clippy::cast_possible_truncation)]
fn to_facet(triangle: &Triangle) -> stl_io::Triangle {
    let narrow = |p: &Point3| stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32]);
    let normal = triangle.cross().try_normalize(0.0).unwrap_or_else(Vector3::zeros);
    stl_io::Triangle {
        normal: stl_io::Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
        vertices: [
            narrow(&triangle.vertices[0]),
            narrow(&triangle.vertices[1]),
            narrow(&triangle.vertices[2]),
        ],
    }
}
