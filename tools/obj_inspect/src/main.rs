//! OBJ inspector
//!
//! Loads a Wavefront object file through the import pipeline and prints what
//! came out: attribute counts, meshes with their face counts and materials,
//! the material library, and every diagnostic raised along the way.
//!
//! Usage: obj_inspect [--config import.toml] [--triangulate] [--materials] [--legacy] model.obj

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use wavefront_import::foundation::logging;
use wavefront_import::prelude::*;

fn main() -> Result<()> {
    logging::init();

    let matches = Command::new("obj_inspect")
        .about("Loads a Wavefront OBJ file and summarizes its meshes, materials and diagnostics")
        .arg(
            Arg::new("model")
                .value_name("FILE")
                .help("Path to the .obj file")
                .required(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Import configuration (.toml or .ron)"),
        )
        .arg(
            Arg::new("triangulate")
                .long("triangulate")
                .help("Fan-triangulate polygons with more than three vertices")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("materials")
                .long("materials")
                .help("Interpret the material library")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("legacy")
                .long("legacy")
                .help("Leave p//n face references undecoded, as the classic importer did")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = build_config(&matches)?;
    let model_path = matches
        .get_one::<String>("model")
        .map(PathBuf::from)
        .context("missing model path")?;

    let model = WavefrontModel::load_with_config(&model_path, &config)
        .with_context(|| format!("failed to import {}", model_path.display()))?;

    print_summary(&model);
    Ok(())
}

fn build_config(matches: &ArgMatches) -> Result<ImportConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ImportConfig::load_from_file(path)
            .with_context(|| format!("failed to load import config {path}"))?,
        None => ImportConfig::default(),
    };

    if matches.get_flag("triangulate") {
        config.triangulate_polygons = true;
    }
    if matches.get_flag("materials") {
        config.interpret_material_library = true;
    }
    if matches.get_flag("legacy") {
        config.legacy_slash_normal = true;
    }

    log::debug!("Import config: {config:?}");
    Ok(config)
}

fn print_summary(model: &WavefrontModel) {
    let attributes = model.attributes();
    println!("Model:     {}", model.object_path().display());
    match model.material_library_path() {
        Some(path) => println!("Materials: {}", path.display()),
        None => println!("Materials: (none declared)"),
    }
    println!(
        "Pool:      {} positions, {} normals, {} texcoords",
        attributes.len(AttributeKind::Position),
        attributes.len(AttributeKind::Normal),
        attributes.len(AttributeKind::Texcoord),
    );

    println!();
    println!("Meshes ({}):", model.registry().mesh_count());
    for mesh in model.meshes() {
        let mut materials: Vec<&str> = mesh.faces().iter().map(|face| face.material.as_str()).collect();
        materials.dedup();
        println!("  {:<24} {:>8} faces  [{}]", mesh.name(), mesh.faces().len(), materials.join(", "));
    }

    println!();
    println!("Materials ({}):", model.materials().len());
    for material in model.materials() {
        match &material.properties {
            Some(properties) => println!(
                "  {:<24} Kd({:.3}, {:.3}, {:.3}) d={:.2}",
                material.name,
                properties.diffuse.x,
                properties.diffuse.y,
                properties.diffuse.z,
                properties.dissolve,
            ),
            None => println!("  {}", material.name),
        }
    }

    if !model.diagnostics().is_empty() {
        println!();
        println!("Diagnostics ({}):", model.diagnostics().len());
        for diagnostic in model.diagnostics() {
            println!("  {diagnostic}");
        }
    }
}
