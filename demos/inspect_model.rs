//! Load an OBJ model with its material libraries and describe it
//!
//! This demo plays the part of the renderer front end:
//! - reads the OBJ and every `mtllib` it names
//! - joins each geometry with its material, defaulting on a miss
//! - reports vertex layout, material bindings and camera framing
//!
//! Set `RUST_LOG=meshview_io=debug` to see parser summaries.

use anyhow::{Context, Result};
use clap::Parser;
use meshview_core::{ColorAttribute, Drawable, Model};
use meshview_io::{LoadOptions, ObjParseOptions, ObjReader};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inspect_model", about = "Describe a Wavefront OBJ model")]
struct Cli {
    /// Path to the .obj file
    path: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Keep `g` groups in the surrounding geometry instead of splitting
    #[arg(long)]
    no_group_split: bool,

    /// Fail when a material library is missing
    #[arg(long)]
    strict: bool,
}

#[derive(Serialize)]
struct PartSummary<'a> {
    name: &'a str,
    material: &'a str,
    material_found: bool,
    triangles: usize,
    vertex_colors: bool,
    diffuse: [f32; 3],
    opacity: f32,
    diffuse_map: Option<&'a str>,
}

#[derive(Serialize)]
struct ModelSummary<'a> {
    material_libs: &'a [String],
    materials: usize,
    vertices: usize,
    triangles: usize,
    center: Option<[f32; 3]>,
    /// Camera distance that keeps the whole model in view
    radius: Option<f32>,
    parts: Vec<PartSummary<'a>>,
}

fn summarize(model: &Model) -> ModelSummary<'_> {
    let extents = model.extents();

    let parts = model
        .parts()
        .map(|(geometry, material)| PartSummary {
            name: &geometry.name,
            material: &geometry.material,
            material_found: model.materials.contains(&geometry.material),
            triangles: geometry.triangle_count(),
            vertex_colors: matches!(
                geometry.data.color_attribute(),
                ColorAttribute::PerVertex(_)
            ),
            diffuse: material.diffuse,
            opacity: material.opacity,
            diffuse_map: material.diffuse_map.as_deref(),
        })
        .collect();

    ModelSummary {
        material_libs: &model.material_libs,
        materials: model.materials.len(),
        vertices: model.vertex_count(),
        triangles: model.triangle_count(),
        center: extents.map(|e| {
            let c = e.center();
            [c.x, c.y, c.z]
        }),
        radius: extents.map(|e| e.diagonal_length() * 1.2),
        parts,
    }
}

fn print_summary(summary: &ModelSummary<'_>) {
    println!("=== Model Summary ===\n");
    println!("Material libraries: {:?}", summary.material_libs);
    println!("Materials loaded:   {}", summary.materials);
    println!("Vertices:           {}", summary.vertices);
    println!("Triangles:          {}", summary.triangles);
    if let (Some(center), Some(radius)) = (summary.center, summary.radius) {
        println!(
            "Center:             ({:.3}, {:.3}, {:.3})",
            center[0], center[1], center[2]
        );
        println!("Framing radius:     {:.3}", radius);
    }
    println!();

    for (i, part) in summary.parts.iter().enumerate() {
        println!("{}. {} [{}]", i + 1, part.name, part.material);
        println!("   triangles: {}", part.triangles);
        println!(
            "   color:     {}",
            if part.vertex_colors { "per-vertex" } else { "constant white" }
        );
        println!(
            "   diffuse:   ({:.2}, {:.2}, {:.2}){}",
            part.diffuse[0],
            part.diffuse[1],
            part.diffuse[2],
            if part.material_found { "" } else { " (default material)" }
        );
        if part.opacity < 1.0 {
            println!("   opacity:   {:.2}", part.opacity);
        }
        if let Some(map) = part.diffuse_map {
            println!("   texture:   {}", map);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let options = LoadOptions::default()
        .with_parse_options(ObjParseOptions::default().with_split_on_groups(!cli.no_group_split))
        .with_skip_missing_libraries(!cli.strict);

    let model = ObjReader::read_model_with_options(&cli.path, &options)
        .with_context(|| format!("Failed to load {}", cli.path.display()))?;

    for name in model.missing_materials() {
        tracing::warn!(material = name, "material not found, using default");
    }

    let summary = summarize(&model);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}
