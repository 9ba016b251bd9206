//! Form parameters through planning, emission, a stand-in kernel and
//! analysis.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use heptatube::config::WorkspaceConfig;
use heptatube::error::{HeptaError, LayoutError, Result};
use heptatube::io::save_stl;
use heptatube::kernel::{GeometryKernel, MeshHandle};
use heptatube::math::Point3;
use heptatube::mesh::TriangleMesh;
use heptatube::params::SolidSpecForm;
use heptatube::workflow::Workflow;

/// Records the programs it was given and writes a box of the solid's outer
/// envelope.
struct EnvelopeKernel {
    size: (f64, f64),
    calls: RefCell<Vec<(PathBuf, String)>>,
}

impl EnvelopeKernel {
    fn new(diameter: f64, length: f64) -> Self {
        Self {
            size: (diameter, length),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl GeometryKernel for EnvelopeKernel {
    fn evaluate(&self, source: &Path, output: &Path) -> Result<MeshHandle> {
        let program = fs::read_to_string(source).unwrap();
        self.calls
            .borrow_mut()
            .push((source.to_path_buf(), program));
        let (d, h) = self.size;
        let r = d / 2.0;
        let mesh = TriangleMesh::cuboid(Point3::new(-r, -r, 0.0), Point3::new(r, r, h));
        save_stl(&mesh, output)?;
        Ok(MeshHandle::new(output))
    }
}

fn form(outer: &str, inner: &str, length: &str, holes: &str) -> SolidSpecForm {
    SolidSpecForm::from_pairs([
        ("outer_d", outer.to_string()),
        ("inner_d", inner.to_string()),
        ("length", length.to_string()),
        ("max_holes", holes.to_string()),
    ])
}

#[test]
fn form_to_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let config = WorkspaceConfig::default().with_output_dir(dir.path().join("static/uploads"));
    let kernel = EnvelopeKernel::new(50.0, 100.0);
    let workflow = Workflow::new(config, &kernel);

    let spec = form("50", "5", "100", "8").parse().unwrap();
    let artifacts = workflow.generate(spec).unwrap();

    let calls = kernel.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, artifacts.scad_path);
    assert!(calls[0].1.contains("place_holes(50, 8); // ring 0"));
    assert!(calls[0].1.contains("gap = 9;"));

    let metrics = workflow.analyze(artifacts.mesh.path()).unwrap();
    let dims = metrics.dimensions().unwrap();
    assert_eq!((dims.x, dims.y, dims.z), (50.0, 50.0, 100.0));
    assert_eq!(metrics.volume, 50.0 * 50.0 * 100.0);
    assert_eq!(metrics, workflow.view().unwrap());
}

#[test]
fn regenerating_overwrites_identically() {
    let dir = tempfile::tempdir().unwrap();
    let config = WorkspaceConfig::default().with_output_dir(dir.path());
    let kernel = EnvelopeKernel::new(80.0, 40.0);
    let workflow = Workflow::new(config, &kernel);

    let spec = form("80", "4", "40", "20").parse().unwrap();
    let first = workflow.generate(spec).unwrap();
    let first_program = fs::read(&first.scad_path).unwrap();
    let second = workflow.generate(spec).unwrap();
    assert_eq!(fs::read(&second.scad_path).unwrap(), first_program);
    assert_eq!(first.layout, second.layout);
    assert_eq!(first.layout.total_holes(), 20);
}

#[test]
fn infeasible_form_never_reaches_the_kernel() {
    let dir = tempfile::tempdir().unwrap();
    let config = WorkspaceConfig::default().with_output_dir(dir.path());
    let kernel = EnvelopeKernel::new(9.0, 10.0);
    let workflow = Workflow::new(config, &kernel);

    let spec = form("9", "1", "10", "17").parse().unwrap();
    let result = workflow.generate(spec);
    assert!(matches!(
        result,
        Err(HeptaError::Layout(LayoutError::InfeasibleLayout { .. }))
    ));
    assert!(kernel.calls.borrow().is_empty());
}
