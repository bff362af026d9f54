//! Export functionality for Mindtree mind maps.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! turning a laid-out mind map into an output format. It is the last stage of
//! the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Snapshot / live session
//!     ↓ measure
//! LayoutInputs
//!     ↓ layout
//! Positioned nodes (Layout)
//!     ↓ export (this module)
//! Output File
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering rendering failures and I/O
//! errors. [`Error`] converts into [`MindtreeError::Export`] at the crate
//! boundary.
//!
//! [`MindtreeError::Export`]: crate::MindtreeError::Export

/// SVG export backend.
pub mod svg;

use crate::{layout::Layout, mindmap::MindMap};

/// Abstraction for mind map export backends.
pub trait Exporter {
    /// Exports `map`, placed according to `layout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the mind map cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_mind_map(&mut self, map: &MindMap, layout: &Layout) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<Error> for crate::MindtreeError {
    fn from(error: Error) -> Self {
        Self::Export(error.to_string())
    }
}
