//! Errors reported by the tree layout engine.

use thiserror::Error;

use mindtree_core::identifier::Id;

/// A way in which the node/edge input breaks the forest contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Following parent links from these nodes never reaches a root.
    #[error("cycle through {}", join_ids(.nodes))]
    Cycle { nodes: Vec<Id> },

    /// A node is the target of edges from two different parents.
    #[error("node `{node}` has two parents, `{first}` and `{second}`")]
    MultipleParents { node: Id, first: Id, second: Id },

    /// The same id appears twice in the node list.
    #[error("node `{node}` is listed more than once")]
    DuplicateNode { node: Id },
}

/// Error returned by [`TreeLayoutEngine::layout`](super::TreeLayoutEngine::layout).
///
/// Layout is pure, so retrying with the same input reproduces the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout input is not a forest: {0}")]
    ContractViolation(#[from] Violation),
}

fn join_ids(ids: &[Id]) -> String {
    ids.iter()
        .map(|id| format!("`{id}`"))
        .collect::<Vec<_>>()
        .join(" -> ")
}
