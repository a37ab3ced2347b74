//! Change classification for blockshift.
//!
//! Given two temporally ordered snapshots of the same block program, decides
//! for every block identity whether it was added, deleted, structurally
//! changed, moved on the canvas, moved to a different enclosing block, or had
//! a text field edited. The result is one [`FeatureRecord`] per transition.
//!
//! # Key Types
//!
//! - [`FeatureExtractor`] -- Runs the detector pipeline over a [`Transition`]
//! - [`BlockDetector`] -- One per-block change detector
//! - [`FeatureRecord`] -- Six independent identifier lists per transition
//! - [`Presence`] -- Added/deleted identifiers from full-set difference
//! - [`LineDiff`] / [`DiffLine`] -- Line-level diff of snapshot text for review

pub mod config;
pub mod detectors;
pub mod equality;
pub mod error;
pub mod extract;
pub mod features;
pub mod presence;
pub mod text_diff;

pub use config::{ExtractConfig, FieldLengthPolicy};
pub use detectors::{
    BlockDetector, BlockPair, ContextMoveDetector, FieldChangeDetector, SpatialMoveDetector,
    StructuralChangeDetector,
};
pub use equality::{blocks_equal, check_same_block, nodes_equal};
pub use error::{DiffError, DiffResult};
pub use extract::{FeatureExtractor, Transition};
pub use features::FeatureRecord;
pub use presence::{common_block_ids, detect_presence, Presence};
pub use text_diff::{diff_lines, DiffLine, LineDiff};
