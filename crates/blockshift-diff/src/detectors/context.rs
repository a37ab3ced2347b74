use blockshift_tree::{MalformedTree, NodeId, Snapshot};
use blockshift_types::{Feature, NodeKind};

use crate::detectors::{BlockDetector, BlockPair};
use crate::equality::check_same_block;
use crate::error::DiffResult;

/// The nearest block-or-root ancestor of a node, by identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Enclosing<'a> {
    /// Attached directly to the workspace.
    Workspace,
    /// Nested inside the block with this identifier.
    Block(&'a str),
}

/// Walk the parent index upward from `node` to the nearest ancestor that is
/// a block or the root, skipping wrapper nodes (value sockets, statement
/// slots, `next` links).
///
/// Leaving the tree without reaching the root means the parent index is
/// broken and is reported as [`MalformedTree::Unreachable`].
pub fn enclosing_block(snapshot: &Snapshot, node: NodeId) -> DiffResult<Enclosing<'_>> {
    let mut current = node;
    loop {
        let parent = snapshot
            .parent(current)
            .ok_or(MalformedTree::Unreachable(current))?;
        let parent_node = snapshot
            .node(parent)
            .ok_or(MalformedTree::UnknownNode(parent))?;

        match parent_node.kind() {
            NodeKind::Root => return Ok(Enclosing::Workspace),
            NodeKind::Block => {
                let id = parent_node
                    .id_attr()
                    .ok_or(MalformedTree::MissingBlockId(parent))?;
                return Ok(Enclosing::Block(id));
            }
            NodeKind::Field | NodeKind::Wrapper => current = parent,
        }
    }
}

/// Context move: the block's enclosing block differs between snapshots.
///
/// This catches re-plugging a block into another parent even when none of
/// its own attributes change, and moving it onto or off the workspace.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContextMoveDetector;

impl BlockDetector for ContextMoveDetector {
    fn feature(&self) -> Feature {
        Feature::MovedInContext
    }

    fn detect(&self, pair: &BlockPair<'_>) -> DiffResult<bool> {
        check_same_block(pair.prev_block, pair.cur_block)?;
        let before = enclosing_block(pair.prev, pair.prev_node)?;
        let after = enclosing_block(pair.cur, pair.cur_node)?;
        Ok(before != after)
    }
}
