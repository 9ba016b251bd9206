//! heptatube: plan, render and measure hepta-tubular cylinders.
//!
//! # Logging
//!
//! `RUST_LOG` takes precedence over `-v`:
//! - `RUST_LOG=heptatube=debug` - planner and I/O details
//! - `-v` info, `-vv` debug, `-vvv` trace
//!
//! # Example
//!
//! ```bash
//! heptatube plan --outer-d 50 --inner-d 5 --length 100 --max-holes 8
//! heptatube generate --outer-d 50 --inner-d 5 --length 100 --max-holes 8
//! heptatube analyze static/uploads/dynamic_hepta_tubular_cylinder.stl
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use heptatube::analysis::{MeshMetrics, VolumeMethod};
use heptatube::config::WorkspaceConfig;
use heptatube::kernel::OpenScadKernel;
use heptatube::layout::{HolePlacement, Ring, RingLayout, SolidSpec};
use heptatube::params::SolidSpecForm;
use heptatube::workflow::Workflow;

/// Generate hepta-tubular cylinders and measure their meshes.
#[derive(Parser)]
#[command(name = "heptatube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Workspace configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory, overriding the configuration
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the planned ring layout
    Plan(SpecArgs),

    /// Write the OpenSCAD program without evaluating it
    Scad {
        #[command(flatten)]
        spec: SpecArgs,

        /// Print the program instead of writing it to the workspace
        #[arg(long)]
        stdout: bool,
    },

    /// Write the OpenSCAD program and evaluate it into an STL mesh
    Generate {
        #[command(flatten)]
        spec: SpecArgs,

        /// Measure the generated mesh
        #[arg(long)]
        analyze: bool,
    },

    /// Measure bounding box, surface area and volume of an STL mesh
    Analyze {
        /// Input mesh file (defaults to the workspace's generated mesh)
        input: Option<PathBuf>,

        /// Sum absolute per-triangle volumes instead of signed ones
        #[arg(long)]
        absolute_volume: bool,

        /// Accept triangles thinner than the STL coordinate resolution.
        /// Kernel output often contains such slivers along seams
        #[arg(long)]
        allow_degenerate: bool,
    },

    /// Print the path of a generated file in the output directory
    Download {
        /// File name inside the output directory
        name: String,
    },
}

/// Solid parameters, taken as text and validated before planning.
#[derive(Args)]
struct SpecArgs {
    /// Outer diameter of the tube
    #[arg(long)]
    outer_d: String,

    /// Diameter of the central bore and of every hole
    #[arg(long)]
    inner_d: String,

    /// Length of the tube
    #[arg(long)]
    length: String,

    /// Total number of holes across all rings
    #[arg(long)]
    max_holes: String,
}

impl SpecArgs {
    fn parse(&self) -> Result<SolidSpec> {
        let form = SolidSpecForm::from_pairs([
            ("outer_d", self.outer_d.as_str()),
            ("inner_d", self.inner_d.as_str()),
            ("length", self.length.as_str()),
            ("max_holes", self.max_holes.as_str()),
        ]);
        form.parse().context("invalid solid parameters")
    }
}

#[derive(Serialize)]
struct LayoutReport<'a> {
    layout: &'a RingLayout,
    holes: Vec<HoleReport>,
}

#[derive(Serialize)]
struct HoleReport {
    ring: usize,
    #[serde(flatten)]
    placement: HolePlacement,
}

impl<'a> LayoutReport<'a> {
    fn new(layout: &'a RingLayout) -> Self {
        let holes = layout
            .holes()
            .map(|(ring, placement)| HoleReport {
                ring: ring.index(),
                placement,
            })
            .collect();
        Self { layout, holes }
    }
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "heptatube=info",
            2 => "heptatube=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<WorkspaceConfig> {
    let mut config = match &cli.config {
        Some(path) => WorkspaceConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => WorkspaceConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output_dir.clone_from(dir);
    }
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_ring(ring: &Ring) {
    println!(
        "  ring {}: diameter {}, {} holes every {} deg at radius {}",
        ring.index(),
        ring.ring_diameter(),
        ring.hole_count(),
        ring.angle_step(),
        ring.radial_offset()
    );
}

fn print_layout(layout: &RingLayout, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&LayoutReport::new(layout)),
        OutputFormat::Text => {
            let spec = layout.spec();
            println!(
                "Solid: outer {} / inner {} / length {}, {} holes",
                spec.outer_diameter(),
                spec.inner_diameter(),
                spec.length(),
                spec.max_holes()
            );
            println!(
                "  peripheries {}, remaining diameter {}, {} gaps of {}",
                layout.num_peripheries(),
                layout.remaining_diameter(),
                layout.num_gaps(),
                layout.gap()
            );
            layout.rings().iter().for_each(print_ring);
            Ok(())
        }
    }
}

fn print_metrics(path: &Path, metrics: &MeshMetrics, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(metrics),
        OutputFormat::Text => {
            println!("Mesh: {}", path.display());
            println!("  Triangles: {}", metrics.triangle_count);
            match (metrics.bounds, metrics.dimensions()) {
                (Some(b), Some(d)) => {
                    println!("  Dimensions: {:.2} x {:.2} x {:.2}", d.x, d.y, d.z);
                    println!("  Min bounds: ({:.2}, {:.2}, {:.2})", b.min.x, b.min.y, b.min.z);
                    println!("  Max bounds: ({:.2}, {:.2}, {:.2})", b.max.x, b.max.y, b.max.z);
                }
                _ => println!("  Bounds: undefined (empty mesh)"),
            }
            println!("  Surface area: {:.2}", metrics.surface_area);
            println!("  Volume: {:.2}", metrics.volume);
            Ok(())
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = load_config(cli)?;

    match &cli.command {
        Commands::Plan(spec) => {
            let workflow = Workflow::new(config, OpenScadKernel::default());
            let (layout, _) = workflow.render(spec.parse()?)?;
            print_layout(&layout, cli.format)
        }
        Commands::Scad { spec, stdout } => {
            let kernel = OpenScadKernel::from_config(&config.kernel);
            let workflow = Workflow::new(config, kernel);
            if *stdout {
                let (_, source) = workflow.render(spec.parse()?)?;
                print!("{source}");
            } else {
                let (_, path) = workflow.write_program(spec.parse()?)?;
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Generate { spec, analyze } => {
            let kernel = OpenScadKernel::from_config(&config.kernel);
            let workflow = Workflow::new(config, kernel);
            let artifacts = workflow
                .generate(spec.parse()?)
                .context("failed to generate mesh")?;
            if *analyze {
                let metrics = workflow.analyze(artifacts.mesh.path())?;
                print_metrics(artifacts.mesh.path(), &metrics, cli.format)
            } else {
                println!("{}", artifacts.scad_path.display());
                println!("{}", artifacts.mesh.path().display());
                Ok(())
            }
        }
        Commands::Analyze {
            input,
            absolute_volume,
            allow_degenerate,
        } => {
            if *absolute_volume {
                config.analysis.volume_method = VolumeMethod::AbsolutePerTriangle;
            }
            config.analysis.allow_degenerate |= *allow_degenerate;
            let path = input.clone().unwrap_or_else(|| config.stl_path());
            let kernel = OpenScadKernel::from_config(&config.kernel);
            let workflow = Workflow::new(config, kernel);
            let metrics = workflow
                .analyze(&path)
                .with_context(|| format!("failed to analyze {}", path.display()))?;
            print_metrics(&path, &metrics, cli.format)
        }
        Commands::Download { name } => {
            let workflow = Workflow::new(config, OpenScadKernel::default());
            let path = workflow
                .download(name)
                .with_context(|| format!("cannot serve {name}"))?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {cause}");
        }
        std::process::exit(1);
    }
}
