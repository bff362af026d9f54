//! Tidy tree layout engine for mind maps.

use indexmap::IndexMap;
use log::{debug, trace, warn};

use mindtree_core::{
    geometry::Size,
    node::GraphEdge,
    orientation::Orientation,
};

use crate::config::LayoutConfig;

use super::{
    contour::{self, Band, Contour},
    error::LayoutError,
    forest::Forest,
    positioned::{Layout, LayoutInput, PositionedNode},
};

/// Smallest extent a node dimension is clamped to when its measurement is
/// zero, negative or not finite.
pub const MIN_EXTENT: f32 = 1.0;

/// Lays out a forest of variable-size nodes.
///
/// Parents are placed before their children on the growth axis, a fixed
/// `level_spacing` past their trailing edge. Sibling subtrees are packed along
/// the cross axis so that no two of them overlap, and every parent is centered
/// over its children.
///
/// The engine holds only its spacing settings. Every call recomputes the whole
/// layout from its arguments, so one engine can be shared between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayoutEngine {
    /// Gap between a parent's trailing edge and a child's anchor
    level_spacing: f32,

    /// Gap between sibling subtrees when growing top to bottom
    sibling_spacing_top_to_bottom: f32,

    /// Gap between sibling subtrees when growing left to right
    sibling_spacing_left_to_right: f32,

    /// Extra room added to every sibling gap
    node_padding: f32,
}

impl TreeLayoutEngine {
    /// Create a new engine with the default spacing
    pub fn new() -> Self {
        Self {
            level_spacing: 150.0,
            sibling_spacing_top_to_bottom: 120.0,
            sibling_spacing_left_to_right: 60.0,
            node_padding: 40.0,
        }
    }

    /// Create an engine from the `[layout]` configuration section
    pub fn from_config(config: &LayoutConfig) -> Self {
        let mut engine = Self::new();
        engine
            .set_level_spacing(config.level_spacing())
            .set_sibling_spacing(Orientation::TopToBottom, config.sibling_spacing_top_to_bottom())
            .set_sibling_spacing(Orientation::LeftToRight, config.sibling_spacing_left_to_right())
            .set_node_padding(config.node_padding());
        engine
    }

    /// Set the gap between a parent's trailing edge and its children's anchors
    pub fn set_level_spacing(&mut self, spacing: f32) -> &mut Self {
        self.level_spacing = spacing;
        self
    }

    /// Set the gap between sibling subtrees for one orientation
    pub fn set_sibling_spacing(&mut self, orientation: Orientation, spacing: f32) -> &mut Self {
        match orientation {
            Orientation::TopToBottom => self.sibling_spacing_top_to_bottom = spacing,
            Orientation::LeftToRight => self.sibling_spacing_left_to_right = spacing,
        }
        self
    }

    /// Set the padding added to every sibling gap
    pub fn set_node_padding(&mut self, padding: f32) -> &mut Self {
        self.node_padding = padding;
        self
    }

    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    pub fn sibling_spacing(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::TopToBottom => self.sibling_spacing_top_to_bottom,
            Orientation::LeftToRight => self.sibling_spacing_left_to_right,
        }
    }

    pub fn node_padding(&self) -> f32 {
        self.node_padding
    }

    /// Computes a position for every node.
    ///
    /// Edges whose ends are not both in `nodes` are ignored. The returned
    /// [`Layout`] lists the nodes in the order they were given.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ContractViolation`] when the remaining edges do
    /// not form a forest: a cycle, a node with two parents, or an id listed
    /// twice.
    pub fn layout(
        &self,
        nodes: &[LayoutInput],
        edges: &[GraphEdge],
        orientation: Orientation,
    ) -> Result<Layout, LayoutError> {
        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            orientation:%;
            "Laying out mind map"
        );

        if nodes.is_empty() {
            return Ok(Layout::new(orientation, IndexMap::new()));
        }

        let forest = Forest::build(nodes, edges)?;
        let sizes = clamped_sizes(nodes);

        let growth = self.growth_pass(&forest, nodes, &sizes, orientation);
        let cross = self.cross_pass(&forest, &sizes, &growth, orientation);

        let mut positioned = IndexMap::with_capacity(nodes.len());
        for (idx, input) in nodes.iter().enumerate() {
            let position = orientation.compose(cross[idx], growth[idx]);
            trace!(node:% = input.id(), position:?; "Placed node");
            positioned.insert(
                input.id(),
                PositionedNode::new(input, position, sizes[idx], orientation),
            );
        }

        debug!(roots = forest.roots().len(); "Layout complete");
        Ok(Layout::new(orientation, positioned))
    }

    /// Leading growth coordinate of every node.
    ///
    /// Roots put their anchor on 0. Each child puts its anchor
    /// `level_spacing` past its parent's trailing edge.
    fn growth_pass(
        &self,
        forest: &Forest,
        nodes: &[LayoutInput],
        sizes: &[Size],
        orientation: Orientation,
    ) -> Vec<f32> {
        let mut growth = vec![0.0; nodes.len()];
        for &root in forest.roots() {
            growth[root] = -nodes[root].anchor_offset();
        }

        for &parent in forest.preorder() {
            let trailing = growth[parent] + orientation.growth_extent(sizes[parent]);
            for &child in forest.children(parent) {
                growth[child] = trailing + self.level_spacing - nodes[child].anchor_offset();
            }
        }

        growth
    }

    /// Leading cross coordinate of every node, with the smallest one at 0.
    fn cross_pass(
        &self,
        forest: &Forest,
        sizes: &[Size],
        growth: &[f32],
        orientation: Orientation,
    ) -> Vec<f32> {
        let gap = self.sibling_spacing(orientation) + self.node_padding;
        let count = sizes.len();

        let band = |idx: usize| {
            Band::node(
                orientation.cross_extent(sizes[idx]),
                growth[idx],
                orientation.growth_extent(sizes[idx]),
            )
        };

        // Offset of each node's center from its parent's center.
        let mut relative = vec![0.0_f32; count];
        let mut contours: Vec<Option<Contour>> = vec![None; count];

        for &parent in forest.preorder().iter().rev() {
            let children = forest.children(parent);
            if children.is_empty() {
                contours[parent] = Some(Contour::leaf(band(parent)));
                continue;
            }

            let subtrees: Vec<Contour> = children
                .iter()
                .map(|&child| contours[child].take().unwrap_or_default())
                .collect();
            let refs: Vec<&Contour> = subtrees.iter().collect();
            let (packed, offsets) = contour::pack(&refs, gap);

            let center = offsets.iter().sum::<f32>() / offsets.len() as f32;
            for (&child, offset) in children.iter().zip(&offsets) {
                relative[child] = offset - center;
            }
            contours[parent] = Some(packed.under(band(parent), -center));
        }

        let roots = forest.roots();
        let trees: Vec<Contour> = roots
            .iter()
            .map(|&root| contours[root].take().unwrap_or_default())
            .collect();
        let refs: Vec<&Contour> = trees.iter().collect();
        let (_, root_offsets) = contour::pack(&refs, gap);

        let mut centers = vec![0.0_f32; count];
        for (&root, offset) in roots.iter().zip(&root_offsets) {
            centers[root] = *offset;
        }
        for &parent in forest.preorder() {
            for &child in forest.children(parent) {
                centers[child] = centers[parent] + relative[child];
            }
        }

        let mut cross: Vec<f32> = centers
            .iter()
            .zip(sizes)
            .map(|(center, size)| center - orientation.cross_extent(*size) / 2.0)
            .collect();

        let min = cross.iter().copied().fold(f32::INFINITY, f32::min);
        if min.is_finite() {
            cross.iter_mut().for_each(|value| *value -= min);
        }
        cross
    }
}

impl Default for TreeLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn clamped_sizes(nodes: &[LayoutInput]) -> Vec<Size> {
    nodes
        .iter()
        .map(|input| {
            let size = input.size();
            if size.is_degenerate() {
                warn!(
                    node:% = input.id(),
                    width = size.width(),
                    height = size.height();
                    "Degenerate node size, clamping"
                );
                size.clamp_degenerate(MIN_EXTENT)
            } else {
                size
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use mindtree_core::{
        geometry::Point,
        identifier::Id,
        node::NodeKind,
    };

    use super::*;
    use crate::layout::Violation;

    fn input(name: &str, width: f32, height: f32, anchor: f32) -> LayoutInput {
        LayoutInput::new(Id::new(name), NodeKind::Answer, Size::new(width, height), anchor)
    }

    fn edge(source: &str, target: &str) -> GraphEdge {
        GraphEdge::new(Id::new(source), Id::new(target))
    }

    fn position(layout: &Layout, name: &str) -> Point {
        layout.get(Id::new(name)).unwrap().position()
    }

    #[test]
    fn test_empty_input() {
        let layout = TreeLayoutEngine::new()
            .layout(&[], &[], Orientation::TopToBottom)
            .unwrap();
        assert!(layout.is_empty());
    }

    #[test]
    fn test_single_node_sits_at_negative_anchor() {
        let nodes = [input("root", 600.0, 200.0, 28.0)];
        let layout = TreeLayoutEngine::new()
            .layout(&nodes, &[], Orientation::TopToBottom)
            .unwrap();

        assert_eq!(position(&layout, "root"), Point::new(0.0, -28.0));
    }

    #[test]
    fn test_child_anchor_is_level_spacing_past_parent() {
        let nodes = [
            input("root", 600.0, 300.0, 28.0),
            input("child", 600.0, 150.0, 25.0),
        ];
        let edges = [edge("root", "child")];
        let engine = TreeLayoutEngine::new();

        for orientation in [Orientation::TopToBottom, Orientation::LeftToRight] {
            let layout = engine.layout(&nodes, &edges, orientation).unwrap();
            let root = layout.get(Id::new("root")).unwrap();
            let child = layout.get(Id::new("child")).unwrap();

            let gap = orientation.growth_of(child.anchor_point())
                - orientation.growth_of(root.trailing_edge());
            assert!(approx_eq!(f32, gap, engine.level_spacing()));
        }
    }

    #[test]
    fn test_parent_centered_over_children() {
        let nodes = [
            input("root", 100.0, 50.0, 0.0),
            input("a", 200.0, 50.0, 0.0),
            input("b", 200.0, 50.0, 0.0),
        ];
        let edges = [edge("root", "a"), edge("root", "b")];
        let mut engine = TreeLayoutEngine::new();
        engine
            .set_sibling_spacing(Orientation::TopToBottom, 20.0)
            .set_node_padding(0.0);

        let layout = engine.layout(&nodes, &edges, Orientation::TopToBottom).unwrap();

        assert_eq!(position(&layout, "a").x(), 0.0);
        assert_eq!(position(&layout, "b").x(), 220.0);
        // Children centers at 100 and 320, root centered at 210.
        assert_eq!(position(&layout, "root").x(), 160.0);
    }

    #[test]
    fn test_siblings_use_orientation_spacing() {
        let nodes = [
            input("root", 100.0, 100.0, 0.0),
            input("a", 100.0, 100.0, 0.0),
            input("b", 100.0, 100.0, 0.0),
        ];
        let edges = [edge("root", "a"), edge("root", "b")];
        let engine = TreeLayoutEngine::new();

        let tb = engine.layout(&nodes, &edges, Orientation::TopToBottom).unwrap();
        assert_eq!(position(&tb, "b").x() - position(&tb, "a").x(), 100.0 + 120.0 + 40.0);

        let lr = engine.layout(&nodes, &edges, Orientation::LeftToRight).unwrap();
        assert_eq!(position(&lr, "b").y() - position(&lr, "a").y(), 100.0 + 60.0 + 40.0);
    }

    #[test]
    fn test_multiple_roots_do_not_overlap() {
        let nodes = [
            input("t1", 300.0, 100.0, 0.0),
            input("t2", 300.0, 100.0, 0.0),
            input("t1c", 800.0, 100.0, 0.0),
        ];
        let edges = [edge("t1", "t1c")];

        let layout = TreeLayoutEngine::new()
            .layout(&nodes, &edges, Orientation::TopToBottom)
            .unwrap();

        let boxes: Vec<_> = layout.iter().map(PositionedNode::bounds).collect();
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                assert!(!a.intersects(b));
            }
        }
        assert_eq!(position(&layout, "t1").y(), position(&layout, "t2").y());
    }

    #[test]
    fn test_smallest_cross_coordinate_is_zero() {
        let nodes = [
            input("root", 1000.0, 100.0, 0.0),
            input("a", 100.0, 100.0, 0.0),
        ];
        let edges = [edge("root", "a")];

        let layout = TreeLayoutEngine::new()
            .layout(&nodes, &edges, Orientation::TopToBottom)
            .unwrap();

        assert_eq!(position(&layout, "root").x(), 0.0);
        assert_eq!(position(&layout, "a").x(), 450.0);
    }

    #[test]
    fn test_degenerate_size_is_clamped() {
        let nodes = [input("root", 0.0, -5.0, 0.0)];
        let layout = TreeLayoutEngine::new()
            .layout(&nodes, &[], Orientation::LeftToRight)
            .unwrap();

        assert_eq!(
            layout.get(Id::new("root")).unwrap().size(),
            Size::new(MIN_EXTENT, MIN_EXTENT)
        );
    }

    #[test]
    fn test_cycle_is_a_contract_violation() {
        let nodes = [input("a", 10.0, 10.0, 0.0), input("b", 10.0, 10.0, 0.0)];
        let edges = [edge("a", "b"), edge("b", "a")];

        let err = TreeLayoutEngine::new()
            .layout(&nodes, &edges, Orientation::TopToBottom)
            .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::ContractViolation(Violation::Cycle { .. })
        ));
    }

    #[test]
    fn test_output_keeps_input_order() {
        let nodes = [
            input("z", 10.0, 10.0, 0.0),
            input("a", 10.0, 10.0, 0.0),
            input("m", 10.0, 10.0, 0.0),
        ];
        let edges = [edge("z", "m")];

        let layout = TreeLayoutEngine::new()
            .layout(&nodes, &edges, Orientation::TopToBottom)
            .unwrap();
        let ids: Vec<Id> = layout.iter().map(PositionedNode::id).collect();

        assert_eq!(ids, vec![Id::new("z"), Id::new("a"), Id::new("m")]);
    }
}
