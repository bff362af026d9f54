//! CLI logic for the Mindtree layout tool.
//!
//! This module contains the core CLI logic: load a mind map snapshot, lay it
//! out, and write it back as SVG or as positioned JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::info;

use mindtree::{MindMapBuilder, MindtreeError};

/// Run the Mindtree CLI application
///
/// # Errors
///
/// Returns `MindtreeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed snapshots
/// - Layout contract violations
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), MindtreeError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing mind map"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(orientation) = args.orientation {
        app_config.set_orientation(orientation);
    }

    let json = fs::read_to_string(&args.input)?;

    let builder = MindMapBuilder::new(app_config);
    let (mut map, snapshot) = builder.load(&json)?;
    if let Some(orientation) = args.orientation {
        map.set_orientation(orientation);
    }

    let layout = builder.layout(&mut map, &snapshot.measurements())?;

    match args.format {
        OutputFormat::Svg => builder.write_svg(&map, &layout, &args.output)?,
        OutputFormat::Json => fs::write(&args.output, builder.snapshot_json(&map)?)?,
    }

    info!(output_file = args.output, format:? = args.format; "Mind map exported successfully");

    Ok(())
}
