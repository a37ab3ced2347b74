//! Immutable snapshots: a block tree together with its indices.

use tracing::debug;

use blockshift_types::BlockId;

use crate::error::TreeResult;
use crate::index::TreeIndex;
use crate::node::{Node, NodeId};
use crate::parse::parse_blocks_xml;
use crate::tree::BlockTree;

/// One fully parsed version of a block program.
///
/// A snapshot exclusively owns its tree and the two derived indices. There
/// is no way to mutate either after construction, so the indices can never
/// drift from the tree. Snapshots are `Send + Sync` and may be compared from
/// several threads at once.
#[derive(Clone, Debug)]
pub struct Snapshot {
    tree: BlockTree,
    index: TreeIndex,
}

impl Snapshot {
    /// Validate `tree` and build its indices.
    pub fn new(tree: BlockTree) -> TreeResult<Self> {
        let index = TreeIndex::build(&tree)?;
        debug!(
            nodes = tree.len(),
            blocks = index.block_count(),
            "indexed snapshot"
        );
        Ok(Self { tree, index })
    }

    /// Parse serialized XML block text and index it.
    pub fn from_xml(text: &str) -> TreeResult<Self> {
        Self::new(parse_blocks_xml(text)?)
    }

    pub fn tree(&self) -> &BlockTree {
        &self.tree
    }

    pub fn index(&self) -> &TreeIndex {
        &self.index
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.node(id)
    }

    /// The node id of block `id`, if present.
    pub fn block_node(&self, id: &str) -> Option<NodeId> {
        self.index.block(id)
    }

    /// The block node with identifier `id`, if present.
    pub fn block(&self, id: &str) -> Option<&Node> {
        self.index.block(id).and_then(|n| self.tree.node(n))
    }

    pub fn contains_block(&self, id: &str) -> bool {
        self.index.contains_block(id)
    }

    /// Direct parent of `node`; `None` for the root.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.index.parent(node)
    }

    /// All block identifiers, sorted.
    pub fn block_ids(&self) -> impl Iterator<Item = &BlockId> + '_ {
        self.index.block_ids()
    }

    pub fn block_count(&self) -> usize {
        self.index.block_count()
    }

    /// Direct children of `node` in document order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.tree.children(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MalformedTree, TreeError};

    const PROGRAM: &str = r#"<xml xmlns="http://www.w3.org/1999/xhtml">
  <block type="component_event" id="1" x="10" y="20">
    <field name="COMPONENT_SELECTOR">Button1</field>
    <statement name="DO">
      <block type="text_to_speech" id="2">
        <value name="ARG0">
          <block type="text" id="6">
            <field name="TEXT">hello</field>
          </block>
        </value>
      </block>
    </statement>
  </block>
</xml>"#;

    #[test]
    fn from_xml_indexes_nested_blocks() {
        let snap = Snapshot::from_xml(PROGRAM).unwrap();
        assert_eq!(snap.block_count(), 3);
        let ids: Vec<_> = snap.block_ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "6"]);

        let text = snap.block("6").unwrap();
        assert_eq!(text.attr("type"), Some("text"));
        assert!(!text.is_top_level());
        assert!(snap.block("1").unwrap().is_top_level());
    }

    #[test]
    fn parent_chain_reaches_root() {
        let snap = Snapshot::from_xml(PROGRAM).unwrap();
        let mut node = snap.block_node("6").unwrap();
        let mut tags = Vec::new();
        while let Some(parent) = snap.parent(node) {
            tags.push(snap.node(parent).unwrap().tag.clone());
            node = parent;
        }
        assert_eq!(tags, vec!["value", "block", "statement", "block", "xml"]);
        assert_eq!(node, snap.root());
    }

    #[test]
    fn malformed_tree_never_becomes_a_snapshot() {
        let err = Snapshot::from_xml(r#"<xml><block type="x"/></xml>"#).unwrap_err();
        assert!(matches!(
            err,
            TreeError::Malformed(MalformedTree::MissingBlockId(_))
        ));
    }

    #[test]
    fn deserialized_tree_is_validated() {
        let json = r#"{
            "nodes": [
                {"tag": "xml", "children": [1, 2]},
                {"tag": "block", "attributes": {"id": "7"}},
                {"tag": "block", "attributes": {"id": "7"}}
            ],
            "root": 0
        }"#;
        let tree: BlockTree = serde_json::from_str(json).unwrap();
        assert!(matches!(
            Snapshot::new(tree),
            Err(TreeError::Malformed(MalformedTree::DuplicateBlockId(_)))
        ));
    }

    #[test]
    fn snapshot_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Snapshot>();
    }
}
