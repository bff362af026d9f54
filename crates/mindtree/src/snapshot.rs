//! JSON snapshots of a mind map.
//!
//! A snapshot is the mind map as a front end would hand it over: every node
//! with its content, an optional rendered size and an optional previous
//! position, plus the edges and the orientation.
//!
//! ```json
//! {
//!   "orientation": "top-to-bottom",
//!   "nodes": [
//!     { "id": "root", "kind": "answer", "question": "Why?", "text": "Because.", "finished": true },
//!     { "id": "next", "kind": "input", "size": { "width": 640.0, "height": 180.0 } }
//!   ],
//!   "edges": [ { "source": "root", "target": "next" } ]
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use mindtree_core::{
    geometry::{Point, Size},
    identifier::Id,
    node::{GraphEdge, NodeContent},
    orientation::Orientation,
};

use crate::{
    error::MindtreeError,
    mindmap::{GraphNode, MindMap},
};

/// One node of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    id: Id,
    #[serde(flatten)]
    content: NodeContent,
    /// Rendered size, if the node has been measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<Size>,
    /// Top-left corner from an earlier layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<Point>,
}

impl SnapshotNode {
    pub fn new(id: Id, content: NodeContent) -> Self {
        Self {
            id,
            content,
            size: None,
            position: None,
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }
}

/// Serializable form of a [`MindMap`] plus its known measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    orientation: Orientation,
    #[serde(default)]
    nodes: Vec<SnapshotNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
}

impl Snapshot {
    pub fn new(orientation: Orientation, nodes: Vec<SnapshotNode>, edges: Vec<GraphEdge>) -> Self {
        Self {
            orientation,
            nodes,
            edges,
        }
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Snapshot`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, MindtreeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Snapshot`] if serialization fails.
    pub fn to_json(&self) -> Result<String, MindtreeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Captures a mind map, recording the size and position of every node
    /// that has been laid out.
    pub fn from_mind_map(map: &MindMap) -> Self {
        let nodes = map
            .nodes()
            .map(|node| SnapshotNode {
                id: node.id(),
                content: node.content().clone(),
                size: node.size(),
                position: node.size().map(|_| node.position()),
            })
            .collect();
        Self::new(map.orientation(), nodes, map.edges().to_vec())
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn nodes(&self) -> &[SnapshotNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Rendered sizes recorded in the snapshot, usable as a
    /// [`MeasurementProvider`](crate::measure::MeasurementProvider).
    pub fn measurements(&self) -> HashMap<Id, Size> {
        self.nodes
            .iter()
            .filter_map(|node| node.size.map(|size| (node.id, size)))
            .collect()
    }

    /// Rebuilds the mind map the snapshot describes.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] if a node id is repeated.
    pub fn to_mind_map(&self) -> Result<MindMap, MindtreeError> {
        let nodes = self
            .nodes
            .iter()
            .map(|node| {
                let graph_node = GraphNode::new(node.id, node.content.clone());
                match node.position {
                    Some(position) => graph_node.with_position(position),
                    None => graph_node,
                }
            })
            .collect();
        MindMap::from_parts(self.orientation, nodes, self.edges.clone())
    }
}
