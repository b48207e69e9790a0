//! Inspect catalog solids or polyhedra read from JSON files.

mod report;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use nalgebra::Point3;
use polytope_math::catalog::{self, Family};
use polytope_math::{EdgeMode, Polyhedron};
use serde::Deserialize;

use report::Report;

#[derive(Parser)]
#[command(name = "polytope-inspect")]
#[command(about = "Measure canonical and user-supplied polyhedra", long_about = None)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Accept open surfaces (edges used by a single face)
    #[arg(long, global = true)]
    boundary: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog solids
    List {
        /// Only solids of this family (e.g. platonic, archimedean-dual, prism)
        #[arg(short, long)]
        family: Option<Family>,
    },

    /// Analyze a catalog solid
    Show {
        /// Solid name or code, e.g. "truncated cube" or J3
        name: String,
    },

    /// Analyze a polyhedron from a JSON file with `vertices` and `faces`
    Analyze {
        /// Input file
        path: PathBuf,
    },
}

/// On-disk polyhedron: `{"vertices": [[x, y, z], ...], "faces": [[0, 1, 2], ...]}`.
#[derive(Deserialize)]
struct PolyhedronFile {
    vertices: Vec<[f64; 3]>,
    faces: Vec<Vec<usize>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = if cli.boundary {
        EdgeMode::AllowBoundary
    } else {
        EdgeMode::Strict
    };

    match &cli.command {
        Commands::List { family } => list(*family, cli.json),
        Commands::Show { name } => {
            let solid = catalog::lookup(name)?;
            let report = Report::build(solid.name(), solid.families(), solid.polyhedron(), mode)
                .with_context(|| format!("analyzing '{}'", solid.name()))?;
            print_report(&report, cli.json)
        }
        Commands::Analyze { path } => {
            let solid = read_polyhedron(path)?;
            let name = path.display().to_string();
            let report = Report::build(&name, &[], &solid, mode)
                .with_context(|| format!("analyzing {name}"))?;
            print_report(&report, cli.json)
        }
    }
}

fn list(family: Option<Family>, json: bool) -> Result<()> {
    let solids: Vec<_> = match family {
        Some(family) => catalog::family(family).collect(),
        None => catalog::solids().iter().collect(),
    };
    if solids.is_empty() {
        bail!("no solids found");
    }

    if json {
        let entries: Vec<_> = solids
            .iter()
            .map(|solid| {
                serde_json::json!({
                    "name": solid.name(),
                    "code": solid.code(),
                    "families": solid.families(),
                    "vertices": solid.polyhedron().vertex_count(),
                    "faces": solid.polyhedron().face_count(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for solid in solids {
        let code = solid.code().map(|c| format!(" ({c})")).unwrap_or_default();
        println!(
            "{:<16} {}{}",
            solid.family().as_str(),
            solid.name(),
            code
        );
    }
    Ok(())
}

fn read_polyhedron(path: &Path) -> Result<Polyhedron> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: PolyhedronFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    let vertices = file
        .vertices
        .into_iter()
        .map(|[x, y, z]| Point3::new(x, y, z))
        .collect();
    Polyhedron::new(vertices, file.faces).with_context(|| format!("validating {}", path.display()))
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
