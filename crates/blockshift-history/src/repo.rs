//! Read-only access to a project's git history via libgit2.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Oid, Repository, Sort};

use crate::commit::CommitInfo;
use crate::error::HistoryResult;

/// Thin wrapper around a git2 `Repository` holding one saved project.
pub struct ProjectRepo {
    repo: Repository,
    root: PathBuf,
}

impl std::fmt::Debug for ProjectRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectRepo").field("root", &self.root).finish()
    }
}

impl ProjectRepo {
    /// Open an existing repository at `path`.
    pub fn open(path: impl Into<PathBuf>) -> HistoryResult<Self> {
        let root: PathBuf = path.into();
        let repo = Repository::open(&root)?;
        Ok(Self { repo, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Commits reachable from HEAD, oldest first. An empty repository has
    /// no commits.
    pub fn commits(&self) -> HistoryResult<Vec<CommitInfo>> {
        if self.repo.is_empty()? {
            return Ok(Vec::new());
        }
        let mut walk = self.repo.revwalk()?;
        walk.push_head()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;

        let mut commits = Vec::new();
        for oid in walk {
            let commit = self.repo.find_commit(oid?)?;
            let time = commit.time();
            commits.push(CommitInfo::new(
                commit.id().to_string(),
                time.seconds(),
                time.offset_minutes(),
            )?);
        }
        Ok(commits)
    }

    /// Raw contents of `path` as of commit `hash`, read from the object
    /// database without touching the working tree. `None` if the file does
    /// not exist in that commit.
    pub fn read_file(&self, hash: &str, path: &str) -> HistoryResult<Option<Vec<u8>>> {
        let commit = self.repo.find_commit(Oid::from_str(hash)?)?;
        let tree = commit.tree()?;
        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;
        Ok(Some(blob.content().to_vec()))
    }
}
