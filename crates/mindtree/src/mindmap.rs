//! The mind map session: nodes, edges and the current orientation.
//!
//! [`MindMap`] is the mutable state a front end drives while the user talks to
//! the assistant. It creates and removes nodes and streams answers into them,
//! but it never computes positions itself. Positions only change through
//! [`MindMap::apply_layout`], which copies the output of a
//! [`TreeLayoutEngine`] run onto the nodes.

use indexmap::IndexMap;
use log::{debug, info, warn};

use mindtree_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    node::{Answer, GraphEdge, NodeContent, NodeKind},
    orientation::Orientation,
};

use crate::{
    error::MindtreeError,
    layout::{Layout, LayoutError, LayoutInput, TreeLayoutEngine},
    measure::{MeasurementProvider, SizeResolver},
};

/// A node of the mind map.
///
/// Position and size are whatever the last applied layout produced; they can
/// be read but not set from outside the session.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    id: Id,
    content: NodeContent,
    position: Point,
    size: Option<Size>,
}

impl GraphNode {
    pub fn new(id: Id, content: NodeContent) -> Self {
        Self {
            id,
            content,
            position: Point::default(),
            size: None,
        }
    }

    /// Restores a node with a previously computed position.
    pub(crate) fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.content.kind()
    }

    pub fn content(&self) -> &NodeContent {
        &self.content
    }

    /// Top-left corner from the last applied layout.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Size used by the last applied layout, `None` before the first one.
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    /// Box from the last applied layout.
    pub fn bounds(&self) -> Option<Bounds> {
        self.size
            .map(|size| Bounds::new_from_top_left(self.position, size))
    }
}

/// A conversation tree being built by the user.
#[derive(Debug, Clone, Default)]
pub struct MindMap {
    nodes: IndexMap<Id, GraphNode>,
    edges: Vec<GraphEdge>,
    orientation: Orientation,
    next_id: usize,
}

impl MindMap {
    /// Creates an empty mind map.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    /// Builds a mind map from existing nodes and edges.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] when an id is used twice.
    pub fn from_parts(
        orientation: Orientation,
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
    ) -> Result<Self, MindtreeError> {
        let mut map = Self::new(orientation);
        for node in nodes {
            let id = node.id();
            if map.nodes.insert(id, node).is_some() {
                return Err(MindtreeError::Graph(format!("Node `{id}` is listed twice")));
            }
        }
        map.edges = edges;
        Ok(map)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Changes the orientation. Positions are stale until the next relayout.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.orientation != orientation {
            info!(orientation:%; "Orientation changed");
        }
        self.orientation = orientation;
    }

    /// Flips the orientation and returns the new one.
    pub fn toggle_orientation(&mut self) -> Orientation {
        self.set_orientation(self.orientation.toggled());
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: Id) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Children of `id`, in the order they were added.
    pub fn children(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.edges
            .iter()
            .filter(move |edge| edge.source() == id)
            .map(|edge| edge.target())
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.edges
            .iter()
            .find(|edge| edge.target() == id)
            .map(|edge| edge.source())
    }

    /// Starts the conversation: creates the root answer node for `question`.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] if the question is blank or the map
    /// already has a root.
    pub fn ask(&mut self, question: &str) -> Result<Id, MindtreeError> {
        let question = non_blank(question)?;
        if !self.nodes.is_empty() {
            return Err(MindtreeError::Graph(
                "The mind map already has a root question".to_string(),
            ));
        }

        let id = self.insert(NodeContent::Answer(Answer::new(question)));
        info!(node:% = id; "Root question asked");
        Ok(id)
    }

    /// Adds an empty input node under `parent` for a follow-up question.
    ///
    /// Returns `Ok(None)` when `parent` already has an input child waiting.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] if `parent` is not an answer node.
    pub fn open_input(&mut self, parent: Id) -> Result<Option<Id>, MindtreeError> {
        self.expect_kind(parent, NodeKind::Answer)?;

        let pending = self
            .children(parent)
            .any(|child| self.get(child).is_some_and(|node| node.kind() == NodeKind::Input));
        if pending {
            debug!(parent:%; "Input already open");
            return Ok(None);
        }

        let id = self.insert(NodeContent::Input);
        self.edges.push(GraphEdge::new(parent, id));
        debug!(parent:%, node:% = id; "Input opened");
        Ok(Some(id))
    }

    /// Turns the input node `input` into an unfinished answer to `question`.
    ///
    /// The node keeps its id, its edge and its position.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] if `input` is not an input node or the
    /// question is blank.
    pub fn submit(&mut self, input: Id, question: &str) -> Result<(), MindtreeError> {
        let question = non_blank(question)?;
        self.expect_kind(input, NodeKind::Input)?;

        if let Some(node) = self.nodes.get_mut(&input) {
            node.content = NodeContent::Answer(Answer::new(question));
        }
        info!(node:% = input; "Question submitted");
        Ok(())
    }

    /// Discards the input node `input` and its edge.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] if `input` is not an input node.
    pub fn cancel(&mut self, input: Id) -> Result<(), MindtreeError> {
        self.expect_kind(input, NodeKind::Input)?;
        self.delete_subtree(input)?;
        Ok(())
    }

    /// Adds an answer node for `question` directly under `parent`, as when a
    /// suggested follow-up is clicked.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] if `parent` is not an answer node or
    /// the question is blank.
    pub fn ask_follow_up(&mut self, parent: Id, question: &str) -> Result<Id, MindtreeError> {
        let question = non_blank(question)?;
        self.expect_kind(parent, NodeKind::Answer)?;

        let id = self.insert(NodeContent::Answer(Answer::new(question)));
        self.edges.push(GraphEdge::new(parent, id));
        info!(parent:%, node:% = id; "Follow-up asked");
        Ok(id)
    }

    /// Appends a streamed chunk to the answer of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] if `id` is not an answer node.
    pub fn append_answer(&mut self, id: Id, chunk: &str) -> Result<(), MindtreeError> {
        self.answer_mut(id)?.push_chunk(chunk);
        Ok(())
    }

    /// Marks the answer of `id` as complete.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] if `id` is not an answer node.
    pub fn finish_answer(&mut self, id: Id) -> Result<(), MindtreeError> {
        self.answer_mut(id)?.finish();
        debug!(node:% = id; "Answer finished");
        Ok(())
    }

    /// Attaches suggested follow-up questions to the answer of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] if `id` is not an answer node.
    pub fn set_suggestions(&mut self, id: Id, suggestions: Vec<String>) -> Result<(), MindtreeError> {
        self.answer_mut(id)?.set_suggestions(suggestions);
        Ok(())
    }

    /// Removes `id` and all of its descendants, returning the removed ids in
    /// the order they were visited.
    ///
    /// # Errors
    ///
    /// Returns [`MindtreeError::Graph`] if `id` is not in the map.
    pub fn delete_subtree(&mut self, id: Id) -> Result<Vec<Id>, MindtreeError> {
        if !self.nodes.contains_key(&id) {
            return Err(unknown_node(id));
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if self.nodes.shift_remove(&current).is_none() {
                // Already removed through another path.
                continue;
            }
            removed.push(current);
            stack.extend(self.children(current).collect::<Vec<_>>().into_iter().rev());
        }

        self.edges
            .retain(|edge| !removed.iter().any(|&gone| edge.touches(gone)));

        info!(node:% = id, removed = removed.len(); "Subtree deleted");
        Ok(removed)
    }

    /// The engine's view of every node, in creation order.
    pub fn layout_inputs(
        &self,
        resolver: &SizeResolver,
        provider: &dyn MeasurementProvider,
    ) -> Vec<LayoutInput> {
        self.nodes()
            .map(|node| resolver.layout_input(node.id, &node.content, provider))
            .collect()
    }

    /// Lays the map out again and applies the result.
    ///
    /// # Errors
    ///
    /// Returns the engine's [`LayoutError`] and leaves every position as it
    /// was, so the last good layout stays on screen.
    pub fn relayout(
        &mut self,
        engine: &TreeLayoutEngine,
        resolver: &SizeResolver,
        provider: &dyn MeasurementProvider,
    ) -> Result<Layout, LayoutError> {
        let inputs = self.layout_inputs(resolver, provider);
        match engine.layout(&inputs, &self.edges, self.orientation) {
            Ok(layout) => {
                self.apply_layout(&layout);
                Ok(layout)
            }
            Err(err) => {
                warn!(err:%; "Layout failed, keeping previous positions");
                Err(err)
            }
        }
    }

    /// Copies positions and sizes from `layout` onto the matching nodes.
    ///
    /// Nodes the layout does not know keep their position.
    pub fn apply_layout(&mut self, layout: &Layout) {
        for positioned in layout.iter() {
            if let Some(node) = self.nodes.get_mut(&positioned.id()) {
                node.position = positioned.position();
                node.size = Some(positioned.size());
            }
        }
    }

    fn insert(&mut self, content: NodeContent) -> Id {
        let id = loop {
            let candidate = Id::from_anonymous(self.next_id);
            self.next_id += 1;
            if !self.nodes.contains_key(&candidate) {
                break candidate;
            }
        };
        self.nodes.insert(id, GraphNode::new(id, content));
        id
    }

    fn expect_kind(&self, id: Id, kind: NodeKind) -> Result<(), MindtreeError> {
        let node = self.get(id).ok_or_else(|| unknown_node(id))?;
        if node.kind() != kind {
            return Err(MindtreeError::Graph(format!(
                "Node `{id}` is a {:?} node, expected {kind:?}",
                node.kind()
            )));
        }
        Ok(())
    }

    fn answer_mut(&mut self, id: Id) -> Result<&mut Answer, MindtreeError> {
        self.nodes
            .get_mut(&id)
            .ok_or_else(|| unknown_node(id))?
            .content
            .as_answer_mut()
            .ok_or_else(|| MindtreeError::Graph(format!("Node `{id}` has no answer")))
    }
}

fn unknown_node(id: Id) -> MindtreeError {
    MindtreeError::Graph(format!("Unknown node `{id}`"))
}

fn non_blank(question: &str) -> Result<&str, MindtreeError> {
    let trimmed = question.trim();
    if trimmed.is_empty() {
        return Err(MindtreeError::Graph("Question is empty".to_string()));
    }
    Ok(trimmed)
}
