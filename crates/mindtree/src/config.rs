//! Configuration types for Mindtree layout and rendering.
//!
//! This module provides configuration structures that control how mind maps
//! are laid out, sized and styled. All types implement [`serde::Deserialize`]
//! for flexible loading from external sources, and every field falls back to
//! its default when missing.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - Orientation and spacing of the tree layout.
//! - [`SizingConfig`] - Anchor offsets, size estimation and the measured size floor.
//! - [`StyleConfig`] - Colors used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use mindtree::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.layout().level_spacing(), 150.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use mindtree_core::{color::Color, geometry::Size, orientation::Orientation};

use crate::measure::{AnchorOffsets, SizeEstimator};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Sizing configuration section.
    #[serde(default)]
    sizing: SizingConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(layout: LayoutConfig, sizing: SizingConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            sizing,
            style,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the sizing configuration.
    pub fn sizing(&self) -> &SizingConfig {
        &self.sizing
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Overrides the initial orientation, e.g. from a command line flag.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.layout.orientation = orientation;
    }
}

/// Tree layout configuration.
///
/// Sibling spacing differs per orientation: nodes are much wider than they
/// are tall, so left-to-right layouts stack siblings closer together.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Initial [`Orientation`] of new mind maps.
    orientation: Orientation,

    /// Gap between a parent's trailing edge and its children's anchors.
    level_spacing: f32,

    /// Gap between sibling subtrees when growing top to bottom.
    sibling_spacing_top_to_bottom: f32,

    /// Gap between sibling subtrees when growing left to right.
    sibling_spacing_left_to_right: f32,

    /// Extra room added to every sibling gap.
    node_padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            level_spacing: 150.0,
            sibling_spacing_top_to_bottom: 120.0,
            sibling_spacing_left_to_right: 60.0,
            node_padding: 40.0,
        }
    }
}

impl LayoutConfig {
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    pub fn sibling_spacing_top_to_bottom(&self) -> f32 {
        self.sibling_spacing_top_to_bottom
    }

    pub fn sibling_spacing_left_to_right(&self) -> f32 {
        self.sibling_spacing_left_to_right
    }

    pub fn node_padding(&self) -> f32 {
        self.node_padding
    }
}

/// Node sizing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Title anchor offset per node kind.
    anchors: AnchorOffsets,

    /// Fallback estimate for unmeasured nodes.
    estimator: SizeEstimator,

    /// Floor applied to live measurements.
    min_measured: Size,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            anchors: AnchorOffsets::default(),
            estimator: SizeEstimator::default(),
            min_measured: Size::new(600.0, 200.0),
        }
    }
}

impl SizingConfig {
    pub fn anchors(&self) -> AnchorOffsets {
        self.anchors
    }

    pub fn estimator(&self) -> SizeEstimator {
        self.estimator
    }

    pub fn min_measured(&self) -> Size {
        self.min_measured
    }
}

/// Visual styling configuration for exported mind maps.
///
/// Colors are kept as strings and parsed on access, so a bad value is
/// reported when it is used rather than when the file is loaded.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`], as a color string. Transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Fill of answer nodes.
    #[serde(default)]
    node_color: Option<String>,

    /// Stroke of node borders and connectors.
    #[serde(default)]
    edge_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color("background", self.background_color.as_deref())
    }

    /// Returns the parsed node fill [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn node_color(&self) -> Result<Option<Color>, String> {
        parse_color("node", self.node_color.as_deref())
    }

    /// Returns the parsed edge [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is invalid.
    pub fn edge_color(&self) -> Result<Option<Color>, String> {
        parse_color("edge", self.edge_color.as_deref())
    }
}

fn parse_color(field: &str, value: Option<&str>) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {field} color in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().orientation(), Orientation::LeftToRight);
        assert_eq!(config.layout().sibling_spacing_top_to_bottom(), 120.0);
        assert_eq!(config.layout().sibling_spacing_left_to_right(), 60.0);
        assert_eq!(config.layout().node_padding(), 40.0);
        assert_eq!(config.sizing().min_measured(), Size::new(600.0, 200.0));
        assert_eq!(config.style().background_color(), Ok(None));
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "layout": { "orientation": "top-to-bottom", "level_spacing": 90.0 },
                "sizing": { "anchors": { "input": 10.0 } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.layout().orientation(), Orientation::TopToBottom);
        assert_eq!(config.layout().level_spacing(), 90.0);
        assert_eq!(config.layout().node_padding(), 40.0);
        assert_eq!(config.sizing().anchors(), AnchorOffsets::new(10.0, 28.0));
        assert_eq!(config.sizing().estimator(), SizeEstimator::default());
    }

    #[test]
    fn test_invalid_color_is_reported_on_access() {
        let config: StyleConfig =
            serde_json::from_str(r#"{ "edge_color": "not-a-color" }"#).unwrap();

        let err = config.edge_color().unwrap_err();
        assert!(err.starts_with("Invalid edge color in config"));
        assert_eq!(config.node_color(), Ok(None));
    }
}
