//! Arena storage for block trees.

use serde::{Deserialize, Serialize};

use crate::error::{MalformedTree, TreeResult};
use crate::node::{Node, NodeId};

/// A block tree stored as a flat arena of nodes.
///
/// Trees are assembled with [`BlockTree::push`] (or deserialized whole) and
/// then handed to [`Snapshot::new`](crate::Snapshot::new), which validates
/// the structure while building the indices. A tree that came from
/// [`BlockTree::from_nodes`] or serde is not trusted until then.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl BlockTree {
    /// Create a tree holding only its root node. Any children already on
    /// `root` are discarded.
    pub fn new(mut root: Node) -> Self {
        root.children.clear();
        Self {
            nodes: vec![root],
            root: NodeId::new(0),
        }
    }

    /// Assemble a tree from raw parts without validation.
    pub fn from_nodes(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// Append `node` as the last child of `parent`, returning its id.
    pub fn push(&mut self, parent: NodeId, mut node: Node) -> TreeResult<NodeId> {
        if parent.index() >= self.nodes.len() {
            return Err(MalformedTree::UnknownNode(parent).into());
        }
        node.children.clear();
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the arena, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has a root, so this is only `true` for trees built
    /// with [`BlockTree::from_nodes`] from an empty vector.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct children of `id` in document order. Dangling references are
    /// skipped; [`TreeIndex::build`](crate::TreeIndex::build) reports them.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.node(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |c| self.node(*c).map(|n| (*c, n)))
    }
}
