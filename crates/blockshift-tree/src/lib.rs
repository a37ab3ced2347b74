//! Block trees for blockshift.
//!
//! A snapshot of a block program is a tree of nodes (blocks, fields, and the
//! wrapper nodes between them) stored in an arena. This crate builds the two
//! lookup indices every change detector relies on and wraps tree plus
//! indices into an immutable [`Snapshot`].
//!
//! # Key Types
//!
//! - [`BlockTree`] -- Arena of [`Node`]s rooted at the workspace element
//! - [`TreeIndex`] -- Identifier -> block and child -> parent lookups
//! - [`Snapshot`] -- Tree plus its indices, read-only after construction
//! - [`parse_blocks_xml`] -- Loader for the serialized XML block format

pub mod error;
pub mod index;
pub mod node;
pub mod parse;
pub mod snapshot;
pub mod tree;

pub use error::{MalformedTree, TreeError, TreeResult};
pub use index::TreeIndex;
pub use node::{Node, NodeId};
pub use parse::{parse_blocks_xml, repair_trailing_garbage};
pub use snapshot::Snapshot;
pub use tree::BlockTree;
