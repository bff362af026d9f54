//! Error types for Mindtree operations.
//!
//! This module provides the main error type [`MindtreeError`] which wraps
//! the error conditions that can occur while editing, laying out, loading or
//! exporting a mind map.

use std::io;

use thiserror::Error;

use crate::layout::LayoutError;

/// The main error type for Mindtree operations.
///
/// Layout failures keep their structured [`LayoutError`] so callers can tell
/// "fix the graph" apart from other failures.
#[derive(Debug, Error)]
pub enum MindtreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for MindtreeError {
    fn from(error: serde_json::Error) -> Self {
        Self::Snapshot(error.to_string())
    }
}
