//! Mindtree - automatic tree layout for conversational mind maps.
//!
//! A user asks a question, the answer streams into a node, and follow-up
//! questions branch into child nodes. This crate keeps that tree of
//! question/answer nodes, gives every node a deterministic non-overlapping
//! position in either orientation, and renders the result to SVG.
//!
//! The pieces can be used on their own ([`layout::TreeLayoutEngine`],
//! [`mindmap::MindMap`], [`measure::SizeResolver`]) or through
//! [`MindMapBuilder`], which wires them together from an [`AppConfig`].

pub mod config;
pub mod layout;
pub mod measure;
pub mod mindmap;
pub mod snapshot;
pub mod viewport;

mod error;
mod export;

pub use mindtree_core::{color, geometry, identifier, node, orientation};

pub use error::MindtreeError;

use std::path::Path;

use log::{debug, info};

use config::AppConfig;
use export::Exporter;
use layout::{Layout, TreeLayoutEngine};
use measure::{MeasurementProvider, SizeResolver};
use mindmap::MindMap;
use snapshot::Snapshot;

/// Builder for laying out and rendering mind maps.
///
/// # Examples
///
/// ```rust
/// use mindtree::{MindMapBuilder, config::AppConfig, measure::NoMeasurements};
///
/// let builder = MindMapBuilder::new(AppConfig::default());
///
/// let mut map = builder.new_map();
/// let root = map.ask("What is a mind map?").expect("valid question");
/// map.append_answer(root, "A tree of ideas.").expect("root is an answer");
///
/// let layout = builder.layout(&mut map, &NoMeasurements).expect("a single tree");
/// let svg = builder.render_svg(&map, &layout).expect("valid style");
/// assert!(svg.contains("What is a mind map?"));
/// ```
#[derive(Default)]
pub struct MindMapBuilder {
    config: AppConfig,
}

impl MindMapBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Layout engine configured from the `[layout]` section.
    pub fn engine(&self) -> TreeLayoutEngine {
        TreeLayoutEngine::from_config(self.config.layout())
    }

    /// Size resolver configured from the `[sizing]` section.
    pub fn resolver(&self) -> SizeResolver {
        SizeResolver::from_config(self.config.sizing())
    }

    /// An empty mind map in the configured orientation.
    pub fn new_map(&self) -> MindMap {
        MindMap::new(self.config.layout().orientation())
    }

    /// Loads a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Snapshot`] for malformed JSON and
    /// [`MindtreeError::Graph`] for repeated node ids.
    pub fn load(&self, json: &str) -> Result<(MindMap, Snapshot), MindtreeError> {
        info!("Loading mind map snapshot");
        let snapshot = Snapshot::from_json(json)?;
        let map = snapshot.to_mind_map()?;
        debug!(nodes = map.len(), edges = map.edges().len(); "Snapshot loaded");
        Ok((map, snapshot))
    }

    /// Lays `map` out and applies the positions.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Layout`] if the edges do not form a forest;
    /// the map keeps its previous positions in that case.
    pub fn layout(
        &self,
        map: &mut MindMap,
        measurements: &dyn MeasurementProvider,
    ) -> Result<Layout, MindtreeError> {
        info!(nodes = map.len(), orientation:% = map.orientation(); "Calculating layout");
        let layout = map.relayout(&self.engine(), &self.resolver(), measurements)?;
        info!(nodes = layout.len(); "Layout calculated");
        Ok(layout)
    }

    /// Renders a laid-out map to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Export`] if the style configuration is invalid.
    pub fn render_svg(&self, map: &MindMap, layout: &Layout) -> Result<String, MindtreeError> {
        let svg = export::svg::Svg::from_style(self.config.style())?;
        let output = svg.render_string(map, layout);
        info!("SVG rendered successfully");
        Ok(output)
    }

    /// Renders a laid-out map to an SVG file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Export`] for an invalid style or a failed write.
    pub fn write_svg(
        &self,
        map: &MindMap,
        layout: &Layout,
        path: impl AsRef<Path>,
    ) -> Result<(), MindtreeError> {
        let mut svg = export::svg::Svg::from_style(self.config.style())?;
        svg.set_output_path(path.as_ref());
        svg.export_mind_map(map, layout)?;
        Ok(())
    }

    /// Positioned JSON snapshot of `map`.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Snapshot`] if serialization fails.
    pub fn snapshot_json(&self, map: &MindMap) -> Result<String, MindtreeError> {
        Snapshot::from_mind_map(map).to_json()
    }
}
