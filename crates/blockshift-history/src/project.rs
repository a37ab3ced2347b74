//! Per-commit feature extraction over a project's history.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use blockshift_diff::{diff_lines, FeatureExtractor, FeatureRecord, Transition};
use blockshift_tree::{repair_trailing_garbage, Snapshot, TreeError};

use crate::commit::CommitInfo;
use crate::config::HistoryConfig;
use crate::error::HistoryResult;
use crate::repo::ProjectRepo;

/// One accepted commit of a project and the changes that led to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Owner of the project, taken from the parent directory name.
    pub username: String,
    pub hash: String,
    pub date: String,
    /// Seconds since the project's first commit.
    pub seconds_elapsed: i64,
    /// Blocks file text as parsed (after any repair).
    pub contents: String,
    /// Features of the transition from the previous accepted commit. `None`
    /// for the first accepted commit.
    pub features: Option<FeatureRecord>,
    /// Rendered line diff against the previous accepted commit, when enabled.
    pub diff: Option<Vec<String>>,
}

/// Why a commit was left out of the history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The commit does not contain the blocks file.
    MissingFile,
    /// The blocks file is empty.
    Empty,
    /// The blocks file is not valid UTF-8.
    NotUtf8(String),
    /// The blocks file is not well-formed XML.
    Unparsable(String),
    /// The XML parses but is not a valid block tree.
    Malformed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFile => write!(f, "blocks file missing"),
            Self::Empty => write!(f, "blocks file empty"),
            Self::NotUtf8(e) => write!(f, "not utf-8: {e}"),
            Self::Unparsable(e) => write!(f, "unparsable: {e}"),
            Self::Malformed(e) => write!(f, "malformed: {e}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCommit {
    pub hash: String,
    pub reason: SkipReason,
}

/// Result of processing one project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub project: PathBuf,
    pub username: String,
    /// Accepted commits, oldest first.
    pub changes: Vec<ChangeRecord>,
    pub skipped: Vec<SkippedCommit>,
}

impl ProjectReport {
    /// Number of commits in the history, accepted or not.
    pub fn commit_count(&self) -> usize {
        self.changes.len() + self.skipped.len()
    }
}

/// Parse one commit's blocks file, repairing trailing junk first if asked.
/// Returns the text that was parsed alongside the snapshot.
pub fn load_snapshot(text: &str, repair: bool) -> Result<(String, Snapshot), SkipReason> {
    let text = if repair {
        repair_trailing_garbage(text).into_owned()
    } else {
        text.to_string()
    };
    match Snapshot::from_xml(&text) {
        Ok(snapshot) => Ok((text, snapshot)),
        Err(TreeError::EmptySource) => Err(SkipReason::Empty),
        Err(TreeError::Xml(e)) => Err(SkipReason::Unparsable(e)),
        Err(TreeError::Malformed(e)) => Err(SkipReason::Malformed(e.to_string())),
    }
}

/// Owner name of a project: the name of the directory holding it.
pub fn project_username(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

struct Accepted {
    commit: CommitInfo,
    text: String,
    snapshot: Snapshot,
}

/// Walk a project's history and extract features for every transition
/// between consecutive usable commits.
///
/// Commits whose blocks file is missing, empty, not UTF-8, or unparsable are
/// skipped and reported; the next usable commit is then compared against the
/// last usable one. Elapsed time is measured from the first commit in the history, even
/// when that commit is skipped.
pub fn process_project(path: &Path, config: &HistoryConfig) -> HistoryResult<ProjectReport> {
    let repo = ProjectRepo::open(path)?;
    let commits = repo.commits()?;
    let username = project_username(path);
    let start = commits.first().map(|c| c.time).unwrap_or_default();

    let mut accepted = Vec::with_capacity(commits.len());
    let mut skipped = Vec::new();
    for commit in commits {
        let loaded = match repo.read_file(&commit.hash, &config.blocks_path)? {
            None => Err(SkipReason::MissingFile),
            Some(bytes) => String::from_utf8(bytes)
                .map_err(|e| SkipReason::NotUtf8(e.utf8_error().to_string()))
                .and_then(|text| load_snapshot(&text, config.repair_trailing_garbage)),
        };
        match loaded {
            Ok((text, snapshot)) => accepted.push(Accepted { commit, text, snapshot }),
            Err(reason) => {
                warn!(
                    project = %path.display(),
                    hash = commit.short_hash(),
                    %reason,
                    "skipping commit"
                );
                skipped.push(SkippedCommit { hash: commit.hash, reason });
            }
        }
    }
    debug!(accepted = accepted.len(), skipped = skipped.len(), "loaded snapshots");

    let extractor = FeatureExtractor::new(config.extract.clone());
    let mut changes = Vec::with_capacity(accepted.len());
    let mut prev: Option<&Accepted> = None;
    for entry in &accepted {
        let (features, diff) = match prev {
            None => (None, None),
            Some(p) => {
                let features = extractor.extract(&Transition::new(&p.snapshot, &entry.snapshot))?;
                let diff = config
                    .text_diff
                    .then(|| diff_lines(&p.text, &entry.text).render());
                (Some(features), diff)
            }
        };
        changes.push(ChangeRecord {
            username: username.clone(),
            hash: entry.commit.hash.clone(),
            date: entry.commit.date.clone(),
            seconds_elapsed: entry.commit.time - start,
            contents: entry.text.clone(),
            features,
            diff,
        });
        prev = Some(entry);
    }

    info!(
        project = %path.display(),
        changes = changes.len(),
        skipped = skipped.len(),
        "processed project"
    );
    Ok(ProjectReport {
        project: path.to_path_buf(),
        username,
        changes,
        skipped,
    })
}
