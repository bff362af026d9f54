//! Mindtree Core Types and Definitions
//!
//! This crate provides the foundational types for Mindtree mind maps. It
//! includes:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Nodes**: Node content and edges ([`node`] module)
//! - **Orientation**: Growth direction and axis mapping ([`orientation`] module)

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod node;
pub mod orientation;
