//! Project histories for blockshift.
//!
//! Walks the commit history of a saved block project, turns each commit's
//! blocks file into a [`Snapshot`](blockshift_tree::Snapshot), and runs the
//! feature extractor over every adjacent pair. Also finds projects on disk
//! and exports the results.
//!
//! # Key Types
//!
//! - [`ProjectRepo`] -- Read-only view of a project's git history
//! - [`process_project`] / [`ProjectReport`] / [`ChangeRecord`] -- Per-commit features
//! - [`reduce_field_changes`] / [`count_flags`] -- Post-processing
//! - [`discover_projects`] -- Project search under a user folder
//! - [`HistoryConfig`] -- TOML-loadable settings

pub mod commit;
pub mod config;
pub mod discover;
pub mod error;
pub mod export;
pub mod project;
pub mod reduce;
pub mod repo;

pub use commit::CommitInfo;
pub use config::HistoryConfig;
pub use discover::{discover_projects, DiscoveryReport, ProblemProject};
pub use error::{HistoryError, HistoryResult};
pub use export::{columns, write_csv, write_json, write_playback_json};
pub use project::{
    load_snapshot, process_project, project_username, ChangeRecord, ProjectReport, SkipReason,
    SkippedCommit,
};
pub use reduce::{count_flags, reduce_field_changes, FlagCounts};
pub use repo::ProjectRepo;

// Re-export key types
pub use blockshift_diff::{ExtractConfig, FeatureRecord, FieldLengthPolicy};
pub use blockshift_types::{BlockId, Feature};
