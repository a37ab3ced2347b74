//! Foundation types for blockshift.
//!
//! blockshift characterises how a block-based program evolved between two
//! snapshots. This crate holds the small vocabulary shared by every other
//! crate in the workspace.
//!
//! # Key Types
//!
//! - [`BlockId`] -- Stable identifier carried by every block node
//! - [`NodeKind`] -- Classification of a tree node (root, block, field, wrapper)
//! - [`Feature`] -- The six change features extracted per transition

pub mod block_id;
pub mod error;
pub mod feature;
pub mod kind;

pub use block_id::BlockId;
pub use error::TypeError;
pub use feature::Feature;
pub use kind::{attr, tag, NodeKind};
