use thiserror::Error;

use crate::{Key, NodeId};

/// Everything that can go wrong when asking an [`OrderedTree`][crate::OrderedTree] to do
/// something.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// No node holds the requested key.
    #[error("key {0} is not in the tree")]
    NotFound(Key),

    /// The handle names a node that has since been deleted.
    #[error("{0:?} does not refer to a live node")]
    StaleHandle(NodeId),

    /// A node's key is on the wrong side of one of its ancestors.
    #[error("{node:?} holds key {key} which is out of order with its ancestors")]
    OrderViolation {
        /// The misplaced node.
        node: NodeId,
        /// Its key.
        key: Key,
    },

    /// A node's parent link disagrees with the child slot it is reachable from.
    #[error("{node:?} is linked from {expected:?} but records {found:?} as its parent")]
    ParentMismatch {
        /// The child whose back-reference is wrong.
        node: NodeId,
        /// The node whose child slot names `node` (`None` for the root).
        expected: Option<NodeId>,
        /// The parent `node` actually records.
        found: Option<NodeId>,
    },

    /// The number of nodes reachable from the root differs from the number allocated.
    #[error("{reachable} nodes are reachable from the root but {live} are allocated")]
    LenMismatch {
        /// Allocated nodes.
        live: usize,
        /// Nodes reached by walking child links from the root.
        reachable: usize,
    },
}
