//! The Tree Index Builder: identifier and parent lookups over a block tree.
//!
//! Both indices are pure functions of the tree. They are built once, in a
//! single depth-first walk from the root, and never mutated afterwards.
//!
//! # Invariants
//!
//! - Every block node appears in the identifier index under its `id`.
//! - Every node except the root appears in the parent index.
//! - Identifiers are unique within one tree.

use std::collections::{BTreeMap, HashMap};

use blockshift_types::{BlockId, NodeKind};

use crate::error::{MalformedTree, TreeResult};
use crate::node::NodeId;
use crate::tree::BlockTree;

/// Lookup indices derived from a [`BlockTree`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeIndex {
    /// Block identifier -> block node. Ordered so that every list derived
    /// from it comes out sorted.
    ids: BTreeMap<BlockId, NodeId>,
    /// Node -> direct parent, for every node but the root.
    parents: HashMap<NodeId, NodeId>,
    /// All reachable nodes in document (pre-)order.
    order: Vec<NodeId>,
}

impl TreeIndex {
    /// Build both indices, validating the tree on the way.
    ///
    /// Fails with [`MalformedTree`] if the root is not the workspace element,
    /// a block lacks an identifier, an identifier repeats, a child reference
    /// dangles or is shared, or some node is unreachable from the root.
    pub fn build(tree: &BlockTree) -> TreeResult<Self> {
        let root = tree.root();
        let root_node = tree
            .node(root)
            .ok_or(MalformedTree::UnknownNode(root))?;
        if root_node.kind() != NodeKind::Root {
            return Err(MalformedTree::UnexpectedRoot(root_node.tag.clone()).into());
        }

        let mut index = Self::default();
        let mut visited = vec![false; tree.len()];
        visited[root.index()] = true;
        let mut stack = vec![root];

        while let Some(current) = stack.pop() {
            let node = tree
                .node(current)
                .ok_or(MalformedTree::UnknownNode(current))?;
            index.order.push(current);

            if node.kind() == NodeKind::Block {
                let id = node
                    .id_attr()
                    .and_then(|raw| BlockId::parse(raw).ok())
                    .ok_or(MalformedTree::MissingBlockId(current))?;
                if index.ids.contains_key(&id) {
                    return Err(MalformedTree::DuplicateBlockId(id).into());
                }
                index.ids.insert(id, current);
            }

            for &child in &node.children {
                let seen = visited
                    .get_mut(child.index())
                    .ok_or(MalformedTree::DanglingChild {
                        parent: current,
                        child,
                    })?;
                if *seen {
                    return Err(MalformedTree::SharedChild(child).into());
                }
                *seen = true;
                index.parents.insert(child, current);
            }
            // Reversed so the first child is popped first.
            stack.extend(node.children.iter().rev().copied());
        }

        if let Some(orphan) = visited.iter().position(|seen| !seen) {
            return Err(MalformedTree::Unreachable(NodeId::new(orphan as u32)).into());
        }

        Ok(index)
    }

    /// The node of the block with identifier `id`.
    pub fn block(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    pub fn contains_block(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Direct parent of `node`; `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(&node).copied()
    }

    /// All block identifiers, sorted.
    pub fn block_ids(&self) -> impl Iterator<Item = &BlockId> + '_ {
        self.ids.keys()
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of entries in the parent index (every node but the root).
    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    /// Reachable nodes in document order, root first.
    pub fn document_order(&self) -> &[NodeId] {
        &self.order
    }
}
