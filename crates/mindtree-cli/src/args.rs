//! Command-line argument definitions for the Mindtree CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! the orientation, configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

use mindtree::orientation::Orientation;

/// What the CLI writes to the output path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered SVG image
    #[default]
    Svg,
    /// The input snapshot with computed positions and sizes
    Json,
}

/// Command-line arguments for the Mindtree layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input mind map snapshot (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Orientation override (top-to-bottom, left-to-right, tb, lr)
    #[arg(long)]
    pub orientation: Option<Orientation>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
