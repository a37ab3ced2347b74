//! Locate projects under a folder of per-user directories.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::HistoryConfig;

/// A project that could not be inspected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemProject {
    pub path: PathBuf,
    pub error: String,
}

/// Matching projects and the ones that could not be read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    pub projects: Vec<PathBuf>,
    pub problems: Vec<ProblemProject>,
}

/// Find projects laid out as `<folder>/<user>/<project>` whose form file
/// satisfies `matches`.
///
/// Users listed in `config.ignore_users` are skipped. A directory that
/// cannot be listed, or a project whose form file cannot be read, is
/// recorded as a problem and the search goes on. Results are in path order.
pub fn discover_projects<F>(folder: &Path, config: &HistoryConfig, matches: F) -> DiscoveryReport
where
    F: Fn(&str) -> bool,
{
    let mut report = DiscoveryReport::default();
    let walker = WalkDir::new(folder)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(folder).to_path_buf();
                warn!(path = %path.display(), error = %e, "cannot list directory");
                report.problems.push(ProblemProject {
                    path,
                    error: e.to_string(),
                });
                continue;
            }
        };
        let project = entry.path();
        if !entry.file_type().is_dir() || is_ignored(project, config) {
            continue;
        }
        match std::fs::read_to_string(project.join(&config.form_path)) {
            Ok(form) if matches(&form) => {
                debug!(project = %project.display(), "project matches");
                report.projects.push(project.to_path_buf());
            }
            Ok(_) => {}
            Err(e) => {
                warn!(project = %project.display(), error = %e, "cannot read form file");
                report.problems.push(ProblemProject {
                    path: project.to_path_buf(),
                    error: e.to_string(),
                });
            }
        }
    }
    report
}

fn is_ignored(project: &Path, config: &HistoryConfig) -> bool {
    project
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| config.ignore_users.iter().any(|u| *u == name))
}
