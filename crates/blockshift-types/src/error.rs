use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("block id must not be empty")]
    EmptyBlockId,

    #[error("unknown feature name: {0}")]
    UnknownFeature(String),
}
