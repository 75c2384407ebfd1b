// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! scanbim CLI - inspect IFC and E57 files

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scanbim::e57::ScanReader;
use scanbim::geometry::triangulate_mesh;
use scanbim::ifc::{IfcDocument, StepImporter};
use scanbim::model::{ModelMetadata, ScanCollection, ScanFailure};
use scanbim::Format;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "scanbim")]
#[command(about = "Inspect IFC building models and E57 laser scans")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a summary of an IFC or E57 file
    Info {
        /// Input file (.ifc or .e57)
        file: PathBuf,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,

        /// Replace invalid UTF-8 in IFC files instead of failing
        #[arg(long)]
        lossy: bool,

        /// Abort on the first E57 scan that fails to read
        #[arg(long)]
        fail_fast: bool,
    },
}

#[derive(Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
enum Summary {
    Ifc(IfcSummary),
    E57(E57Summary),
}

#[derive(Serialize)]
struct TypeCount {
    name: String,
    count: usize,
}

#[derive(Serialize)]
struct IfcSummary {
    metadata: ModelMetadata,
    entities: usize,
    skipped_statements: usize,
    types: Vec<TypeCount>,
    vertices: usize,
    faces: usize,
    triangles: usize,
}

#[derive(Serialize)]
struct ScanSummary {
    index: usize,
    name: String,
    points: usize,
    translation: [f64; 3],
    rotation: [f64; 4],
    colors: bool,
}

#[derive(Serialize)]
struct E57Summary {
    scans: Vec<ScanSummary>,
    total_points: usize,
    has_colors: bool,
    failures: Vec<ScanFailure>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Info {
            file,
            json,
            lossy,
            fail_fast,
        } => {
            let summary = match Format::from_path(&file) {
                Some(Format::Ifc) => Summary::Ifc(ifc_summary(&file, lossy)?),
                Some(Format::E57) => Summary::E57(e57_summary(&file, fail_fast)?),
                None => anyhow::bail!(
                    "Unsupported file format: {} (expected .ifc or .e57)",
                    file.display()
                ),
            };

            if json {
                let text = serde_json::to_string_pretty(&summary)
                    .context("Failed to serialize summary")?;
                println!("{}", text);
            } else {
                print_summary(&file, &summary);
            }
        }
    }

    Ok(())
}

fn ifc_summary(path: &Path, lossy: bool) -> Result<IfcSummary> {
    let doc: IfcDocument = StepImporter::new()
        .lossy_utf8(lossy)
        .open(path)
        .with_context(|| format!("Failed to import {}", path.display()))?;

    let mesh = doc.build_mesh();
    let triangles = triangulate_mesh(&mesh).triangle_count();
    tracing::debug!(vertices = mesh.vertex_count(), faces = mesh.face_count(), "mesh built");

    Ok(IfcSummary {
        metadata: doc.metadata().clone(),
        entities: doc.entity_count(),
        skipped_statements: doc.graph().skipped_statements(),
        types: doc
            .type_summary()
            .into_iter()
            .map(|(name, count)| TypeCount { name, count })
            .collect(),
        vertices: mesh.vertex_count(),
        faces: mesh.face_count(),
        triangles,
    })
}

fn e57_summary(path: &Path, fail_fast: bool) -> Result<E57Summary> {
    let collection: ScanCollection = ScanReader::new()
        .fail_fast(fail_fast)
        .read(path)
        .with_context(|| format!("Failed to import {}", path.display()))?;

    Ok(E57Summary {
        scans: collection
            .scans()
            .iter()
            .map(|scan| ScanSummary {
                index: scan.index,
                name: scan.name.clone(),
                points: scan.point_count(),
                translation: scan.pose.translation,
                rotation: scan.pose.rotation,
                colors: scan.has_colors(),
            })
            .collect(),
        total_points: collection.total_points(),
        has_colors: collection.has_colors(),
        failures: collection.failures().to_vec(),
    })
}

fn print_summary(path: &Path, summary: &Summary) {
    println!("{}", path.display());

    match summary {
        Summary::Ifc(ifc) => {
            let schema = match ifc.metadata.schema_version.as_str() {
                "" => "unknown",
                schema => schema,
            };
            println!("  Schema: {}", schema);
            if let Some(system) = &ifc.metadata.originating_system {
                println!("  Originating system: {}", system);
            }
            println!("  Entities by type:");
            for TypeCount { name, count } in &ifc.types {
                println!("    {:<32} {:>8}", name, count);
            }
            println!(
                "  Entities: {} ({} skipped statements)",
                ifc.entities, ifc.skipped_statements
            );
            println!(
                "  Mesh: {} vertices, {} faces, {} triangles",
                ifc.vertices, ifc.faces, ifc.triangles
            );
        }
        Summary::E57(e57) => {
            for scan in &e57.scans {
                let [tx, ty, tz] = scan.translation;
                let [w, x, y, z] = scan.rotation;
                println!(
                    "  [{}] {}: {} points, translation ({}, {}, {}), rotation (w={}, x={}, y={}, z={}), colors: {}",
                    scan.index,
                    scan.name,
                    scan.points,
                    tx,
                    ty,
                    tz,
                    w,
                    x,
                    y,
                    z,
                    if scan.colors { "yes" } else { "no" }
                );
            }
            for failure in &e57.failures {
                println!(
                    "  [{}] {}: FAILED: {}",
                    failure.index,
                    failure.name.as_deref().unwrap_or("<unnamed>"),
                    failure.message
                );
            }
            println!(
                "  Total: {} scans, {} points, colors: {}",
                e57.scans.len(),
                e57.total_points,
                if e57.has_colors { "yes" } else { "no" }
            );
        }
    }
}
