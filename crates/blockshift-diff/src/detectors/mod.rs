//! Per-block change detectors.
//!
//! Each detector looks at one block identity present in both snapshots of a
//! transition and answers a single yes/no question about it. Detectors are
//! independent and side-effect free; one block may be flagged by several.

pub mod context;
pub mod fields;
pub mod spatial;
pub mod structural;

pub use context::{enclosing_block, ContextMoveDetector, Enclosing};
pub use fields::FieldChangeDetector;
pub use spatial::SpatialMoveDetector;
pub use structural::StructuralChangeDetector;

use blockshift_tree::{Node, NodeId, Snapshot};
use blockshift_types::{BlockId, Feature, NodeKind};

use crate::error::{DiffError, DiffResult};

/// The same block identity resolved in both snapshots of a transition.
#[derive(Clone, Copy, Debug)]
pub struct BlockPair<'a> {
    pub id: &'a BlockId,
    pub prev: &'a Snapshot,
    pub cur: &'a Snapshot,
    pub prev_node: NodeId,
    pub cur_node: NodeId,
    pub prev_block: &'a Node,
    pub cur_block: &'a Node,
}

impl<'a> BlockPair<'a> {
    /// Resolve `id` through both snapshots' identifier indices.
    pub fn resolve(id: &'a BlockId, prev: &'a Snapshot, cur: &'a Snapshot) -> DiffResult<Self> {
        let not_shared = || DiffError::BlockNotShared(id.clone());
        let prev_node = prev.block_node(id.as_str()).ok_or_else(not_shared)?;
        let cur_node = cur.block_node(id.as_str()).ok_or_else(not_shared)?;
        let prev_block = prev.node(prev_node).ok_or_else(not_shared)?;
        let cur_block = cur.node(cur_node).ok_or_else(not_shared)?;
        Ok(Self {
            id,
            prev,
            cur,
            prev_node,
            cur_node,
            prev_block,
            cur_block,
        })
    }
}

/// A single per-block change detector.
///
/// The trait is object-safe and `Send + Sync` so detectors can be stored in
/// a `Vec<Box<dyn BlockDetector>>` and shared across threads.
pub trait BlockDetector: Send + Sync {
    /// The feature list this detector contributes to.
    fn feature(&self) -> Feature;

    /// Returns `true` if the block should be listed under [`Self::feature`].
    fn detect(&self, pair: &BlockPair<'_>) -> DiffResult<bool>;
}

/// Direct children of `node` whose kind satisfies `keep`, in document order.
pub(crate) fn children_where<'s>(
    snapshot: &'s Snapshot,
    node: NodeId,
    keep: impl Fn(NodeKind) -> bool,
) -> Vec<&'s Node> {
    snapshot
        .children(node)
        .map(|(_, child)| child)
        .filter(|child| keep(child.kind()))
        .collect()
}
