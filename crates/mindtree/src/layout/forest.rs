//! Validation of the node/edge input into a forest of rooted trees.

use indexmap::IndexMap;
use log::{debug, trace};
use petgraph::{
    algo::{tarjan_scc, toposort},
    graph::{DiGraph, NodeIndex},
};

use mindtree_core::{identifier::Id, node::GraphEdge};

use super::{error::Violation, positioned::LayoutInput};

/// Parent/child structure of the layout input, indexed by position in the
/// node slice.
#[derive(Debug)]
pub(super) struct Forest {
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    preorder: Vec<usize>,
}

impl Forest {
    /// Builds the forest, skipping edges whose ends are not in `nodes`.
    ///
    /// Children keep the order of their edges and roots keep the order of the
    /// node slice, so the result never depends on hashing.
    pub(super) fn build(nodes: &[LayoutInput], edges: &[GraphEdge]) -> Result<Self, Violation> {
        let mut index: IndexMap<Id, usize> = IndexMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            if index.insert(node.id(), idx).is_some() {
                return Err(Violation::DuplicateNode { node: node.id() });
            }
        }

        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(nodes.len(), edges.len());
        for idx in 0..nodes.len() {
            graph.add_node(idx);
        }

        let mut parent: Vec<Option<usize>> = vec![None; nodes.len()];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];

        for edge in edges {
            let (Some(&source), Some(&target)) =
                (index.get(&edge.source()), index.get(&edge.target()))
            else {
                debug!(parent:% = edge.source(), child:% = edge.target(); "Skipping edge with unknown endpoint");
                continue;
            };

            match parent[target] {
                Some(existing) if existing == source => {
                    trace!(parent:% = edge.source(), child:% = edge.target(); "Skipping repeated edge");
                    continue;
                }
                Some(existing) => {
                    return Err(Violation::MultipleParents {
                        node: nodes[target].id(),
                        first: nodes[existing].id(),
                        second: nodes[source].id(),
                    });
                }
                None => {}
            }

            parent[target] = Some(source);
            children[source].push(target);
            graph.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
        }

        if let Err(cycle) = toposort(&graph, None) {
            let members = cycle_through(&graph, &parent, cycle.node_id().index());
            return Err(Violation::Cycle {
                nodes: members.into_iter().map(|idx| nodes[idx].id()).collect(),
            });
        }

        let roots: Vec<usize> = (0..nodes.len())
            .filter(|&idx| parent[idx].is_none())
            .collect();

        let mut preorder = Vec::with_capacity(nodes.len());
        let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            preorder.push(idx);
            stack.extend(children[idx].iter().rev());
        }

        // Acyclic with at most one parent per node: every node hangs off a root.
        debug_assert_eq!(preorder.len(), nodes.len());

        Ok(Self {
            children,
            roots,
            preorder,
        })
    }

    pub(super) fn children(&self, idx: usize) -> &[usize] {
        &self.children[idx]
    }

    pub(super) fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Every node, parents before their children.
    pub(super) fn preorder(&self) -> &[usize] {
        &self.preorder
    }
}

/// Returns the members of the cycle containing `start`, in edge direction,
/// beginning with the member that comes first in the node slice.
fn cycle_through(graph: &DiGraph<usize, ()>, parent: &[Option<usize>], start: usize) -> Vec<usize> {
    let first = tarjan_scc(graph)
        .into_iter()
        .find(|component| component.iter().any(|n| n.index() == start))
        .and_then(|component| component.iter().map(|n| n.index()).min())
        .unwrap_or(start);

    // Inside a cycle every node has exactly one parent, which is also on the
    // cycle, so walking parents visits the cycle backwards.
    let mut chain = vec![first];
    let mut current = parent[first];
    while let Some(idx) = current {
        if idx == first || chain.len() > parent.len() {
            break;
        }
        chain.push(idx);
        current = parent[idx];
    }

    chain.reverse();
    chain.rotate_right(1);
    chain
}

#[cfg(test)]
mod tests {
    use mindtree_core::{geometry::Size, node::NodeKind};

    use super::*;

    fn input(name: &str) -> LayoutInput {
        LayoutInput::new(Id::new(name), NodeKind::Answer, Size::new(10.0, 10.0), 0.0)
    }

    fn edge(source: &str, target: &str) -> GraphEdge {
        GraphEdge::new(Id::new(source), Id::new(target))
    }

    #[test]
    fn test_preorder_follows_edge_order() {
        let nodes = [input("r"), input("b"), input("a"), input("a1")];
        let edges = [edge("r", "b"), edge("r", "a"), edge("a", "a1")];

        let forest = Forest::build(&nodes, &edges).unwrap();
        assert_eq!(forest.roots(), &[0]);
        assert_eq!(forest.children(0), &[1, 2]);
        assert_eq!(forest.preorder(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_multiple_roots_keep_node_order() {
        let nodes = [input("t2"), input("t1"), input("t1c")];
        let edges = [edge("t1", "t1c")];

        let forest = Forest::build(&nodes, &edges).unwrap();
        assert_eq!(forest.roots(), &[0, 1]);
        assert_eq!(forest.preorder(), &[0, 1, 2]);
    }

    #[test]
    fn test_unknown_and_repeated_edges_are_skipped() {
        let nodes = [input("r"), input("c")];
        let edges = [edge("r", "c"), edge("r", "c"), edge("r", "ghost"), edge("ghost", "c")];

        let forest = Forest::build(&nodes, &edges).unwrap();
        assert_eq!(forest.children(0), &[1]);
    }

    #[test]
    fn test_duplicate_node() {
        let nodes = [input("r"), input("r")];
        assert_eq!(
            Forest::build(&nodes, &[]).unwrap_err(),
            Violation::DuplicateNode { node: Id::new("r") }
        );
    }

    #[test]
    fn test_second_parent() {
        let nodes = [input("p1"), input("p2"), input("c")];
        let edges = [edge("p1", "c"), edge("p2", "c")];

        assert_eq!(
            Forest::build(&nodes, &edges).unwrap_err(),
            Violation::MultipleParents {
                node: Id::new("c"),
                first: Id::new("p1"),
                second: Id::new("p2"),
            }
        );
    }

    #[test]
    fn test_cycle_members_in_edge_order() {
        let nodes = [input("x"), input("a"), input("b"), input("c")];
        let edges = [edge("a", "b"), edge("b", "c"), edge("c", "a")];

        assert_eq!(
            Forest::build(&nodes, &edges).unwrap_err(),
            Violation::Cycle {
                nodes: vec![Id::new("a"), Id::new("b"), Id::new("c")],
            }
        );
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let nodes = [input("a")];
        let edges = [edge("a", "a")];

        assert_eq!(
            Forest::build(&nodes, &edges).unwrap_err(),
            Violation::Cycle {
                nodes: vec![Id::new("a")],
            }
        );
    }
}
