//! Input and output views of the layout engine.
//!
//! [`LayoutInput`] is everything the engine reads about a node. [`PositionedNode`]
//! is the read-only result it produces. Keeping them separate means only the
//! engine decides positions; the rest of the crate can look at them but has no
//! setter to call.

use indexmap::IndexMap;

use mindtree_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    node::NodeKind,
    orientation::Orientation,
};

/// A node as seen by the layout engine: identity, kind, measured size and the
/// offset from its leading edge to its title anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutInput {
    id: Id,
    kind: NodeKind,
    size: Size,
    anchor_offset: f32,
}

impl LayoutInput {
    pub fn new(id: Id, kind: NodeKind, size: Size, anchor_offset: f32) -> Self {
        Self {
            id,
            kind,
            size,
            anchor_offset,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Measured (or estimated) size of the node's box.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn anchor_offset(&self) -> f32 {
        self.anchor_offset
    }
}

/// A laid-out node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedNode {
    id: Id,
    kind: NodeKind,
    position: Point,
    size: Size,
    anchor_offset: f32,
    orientation: Orientation,
}

impl PositionedNode {
    pub(super) fn new(
        input: &LayoutInput,
        position: Point,
        size: Size,
        orientation: Orientation,
    ) -> Self {
        Self {
            id: input.id,
            kind: input.kind,
            position,
            size,
            anchor_offset: input.anchor_offset,
            orientation,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Top-left corner of the node.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Size used for the layout, after degenerate dimensions were clamped.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn anchor_offset(&self) -> f32 {
        self.anchor_offset
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, self.size)
    }

    /// Point where an incoming connector ends: centered on the cross axis,
    /// `anchor_offset` past the leading edge on the growth axis.
    pub fn anchor_point(&self) -> Point {
        let o = self.orientation;
        let cross = o.cross_of(self.position) + o.cross_extent(self.size) / 2.0;
        let growth = o.growth_of(self.position) + self.anchor_offset;
        o.compose(cross, growth)
    }

    /// Midpoint of the edge that faces the node's children (bottom edge
    /// top-to-bottom, right edge left-to-right).
    pub fn trailing_edge(&self) -> Point {
        let o = self.orientation;
        let cross = o.cross_of(self.position) + o.cross_extent(self.size) / 2.0;
        let growth = o.growth_of(self.position) + o.growth_extent(self.size);
        o.compose(cross, growth)
    }
}

/// Result of one layout call: every input node, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    orientation: Orientation,
    nodes: IndexMap<Id, PositionedNode>,
}

impl Layout {
    pub(super) fn new(orientation: Orientation, nodes: IndexMap<Id, PositionedNode>) -> Self {
        Self { orientation, nodes }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn get(&self, id: Id) -> Option<&PositionedNode> {
        self.nodes.get(&id)
    }

    /// Iterates nodes in the order they were given to the engine.
    pub fn iter(&self) -> impl Iterator<Item = &PositionedNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounding box of all nodes, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        self.iter()
            .map(PositionedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}
