//! Automatic tree layout.
//!
//! [`TreeLayoutEngine`] takes the node set as [`LayoutInput`]s plus the
//! parent → child edges and returns a [`Layout`] of read-only
//! [`PositionedNode`]s. It works in cross/growth terms; the
//! [`Orientation`](mindtree_core::orientation::Orientation) passed to each
//! call decides which screen axis is which.

mod contour;
mod engine;
mod error;
mod forest;
mod positioned;

pub use engine::{MIN_EXTENT, TreeLayoutEngine};
pub use error::{LayoutError, Violation};
pub use positioned::{Layout, LayoutInput, PositionedNode};
