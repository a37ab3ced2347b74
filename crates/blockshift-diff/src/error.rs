//! Error types for the diff crate.

use blockshift_tree::MalformedTree;
use blockshift_types::BlockId;

/// Errors that abort feature extraction for a transition.
///
/// Neither variant describes expected data variance: both indicate an
/// indexing or calling bug and are surfaced rather than skipped.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// Two blocks compared as "the same block" carry different identifiers.
    #[error("blocks do not share an identifier: {left:?} vs {right:?}")]
    IdentityMismatch {
        left: Option<String>,
        right: Option<String>,
    },

    /// A block expected in both snapshots is missing from one of them.
    #[error("block {0} is not present in both snapshots")]
    BlockNotShared(BlockId),

    /// A snapshot's indices disagree with its tree.
    #[error("malformed tree: {0}")]
    Malformed(#[from] MalformedTree),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
