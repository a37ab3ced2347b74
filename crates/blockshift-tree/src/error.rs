//! Error types for the tree crate.

use blockshift_types::BlockId;

use crate::node::NodeId;

/// Errors that can occur while loading or indexing a block tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TreeError {
    /// The tree violates a structural invariant of the block grammar.
    #[error("malformed tree: {0}")]
    Malformed(#[from] MalformedTree),

    /// The snapshot text is empty or whitespace only.
    #[error("snapshot source is empty")]
    EmptySource,

    /// The snapshot text is not well-formed XML.
    #[error("xml parse error: {0}")]
    Xml(String),
}

/// The ways a tree can fail to be a valid block tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedTree {
    /// A block node lacks its identifier attribute.
    #[error("block node {0} has no identifier")]
    MissingBlockId(NodeId),

    /// Two block nodes share an identifier.
    #[error("block identifier {0} appears more than once")]
    DuplicateBlockId(BlockId),

    /// A node cannot be reached by walking down from the root.
    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),

    /// A child reference points outside the arena.
    #[error("node {parent} references missing child {child}")]
    DanglingChild {
        /// The node holding the bad reference.
        parent: NodeId,
        /// The missing child.
        child: NodeId,
    },

    /// A node is referenced as a child more than once (or the root is).
    #[error("node {0} has more than one parent")]
    SharedChild(NodeId),

    /// The root node is not the workspace element.
    #[error("root node has tag {0:?}, expected workspace root")]
    UnexpectedRoot(String),

    /// A node id passed to a tree operation does not exist.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
