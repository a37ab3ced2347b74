use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use blockshift_types::{attr, NodeKind};

/// Position of a node inside its [`BlockTree`](crate::BlockTree) arena.
///
/// Node ids are only meaningful within the tree that issued them; the same
/// block has unrelated node ids in two snapshots. Use
/// [`BlockId`](blockshift_types::BlockId) to relate blocks across snapshots.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single node of a block tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Tag name (`block`, `field`, `value`, `statement`, ...).
    pub tag: String,
    /// Attribute name -> value.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Text content. Only meaningful on field nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Children in document order.
    #[serde(default)]
    pub children: Vec<NodeId>,
}

impl Node {
    /// Create a node with no attributes, text, or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::from_tag(&self.tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The raw identifier attribute, if any.
    pub fn id_attr(&self) -> Option<&str> {
        self.attr(attr::ID)
    }

    /// Canvas coordinates, present only on blocks attached directly to the
    /// workspace.
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        Some((self.attr(attr::X)?, self.attr(attr::Y)?))
    }

    /// A block is top-level when it carries both coordinate attributes.
    pub fn is_top_level(&self) -> bool {
        self.coordinates().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_requires_both_coordinates() {
        let both = Node::new("block").with_attr("x", "10").with_attr("y", "20");
        let only_x = Node::new("block").with_attr("x", "10");
        assert!(both.is_top_level());
        assert_eq!(both.coordinates(), Some(("10", "20")));
        assert!(!only_x.is_top_level());
        assert!(!Node::new("block").is_top_level());
    }

    #[test]
    fn kind_follows_tag() {
        assert_eq!(Node::new("field").kind(), NodeKind::Field);
        assert_eq!(Node::new("value").kind(), NodeKind::Wrapper);
    }

    #[test]
    fn json_omits_absent_text() {
        let json = serde_json::to_value(Node::new("block").with_attr("id", "1")).unwrap();
        assert!(json.get("text").is_none());
        assert_eq!(json["attributes"]["id"], "1");
    }
}
