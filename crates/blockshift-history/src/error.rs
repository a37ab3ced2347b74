use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("not a project repository: {0}")]
    NotAProject(String),

    #[error("commit time out of range: {0}")]
    InvalidTimestamp(i64),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("feature extraction failed: {0}")]
    Diff(#[from] blockshift_diff::DiffError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HistoryResult<T> = Result<T, HistoryError>;
