use serde::{Deserialize, Serialize};

/// Tag names of the block grammar.
pub mod tag {
    /// The workspace root element.
    pub const ROOT: &str = "xml";
    /// A block: the only node kind that carries an identifier.
    pub const BLOCK: &str = "block";
    /// A text field owned by a block.
    pub const FIELD: &str = "field";
}

/// Attribute names with fixed meaning.
pub mod attr {
    /// Block identifier.
    pub const ID: &str = "id";
    /// Horizontal canvas coordinate of a top-level block.
    pub const X: &str = "x";
    /// Vertical canvas coordinate of a top-level block.
    pub const Y: &str = "y";

    /// Returns `true` for the canvas coordinate attributes, which are
    /// excluded from every equality check.
    pub fn is_coordinate(name: &str) -> bool {
        name == X || name == Y
    }
}

/// Classification of a tree node, derived from its tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The workspace root.
    Root,
    /// A block carrying an identifier.
    Block,
    /// A text field; carries text content instead of children.
    Field,
    /// Any other node: value sockets, statement slots, mutations, comments.
    Wrapper,
}

impl NodeKind {
    /// Classify a tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            tag::ROOT => Self::Root,
            tag::BLOCK => Self::Block,
            tag::FIELD => Self::Field,
            _ => Self::Wrapper,
        }
    }

    /// Returns `true` for nodes that terminate an upward enclosing-block walk.
    pub fn encloses(&self) -> bool {
        matches!(self, Self::Root | Self::Block)
    }
}
