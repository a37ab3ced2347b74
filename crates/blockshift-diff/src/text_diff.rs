//! Line-level diff of snapshot text, for human review next to the
//! extracted features.
//!
//! Uses the `similar` crate (Myers diff algorithm). Unlike a patch, the
//! listing keeps every line so a reviewer sees the whole document.

use similar::{ChangeTag, TextDiff};

/// Full line listing of two snapshot texts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineDiff {
    pub lines: Vec<DiffLine>,
}

/// A single line of a [`LineDiff`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// Present in both texts.
    Same(String),
    /// Present only in the new text.
    Added(String),
    /// Present only in the old text.
    Removed(String),
}

impl DiffLine {
    /// Render with a two-character marker: `"  "`, `"+ "`, or `"- "`.
    pub fn render(&self) -> String {
        match self {
            DiffLine::Same(text) => format!("  {text}"),
            DiffLine::Added(text) => format!("+ {text}"),
            DiffLine::Removed(text) => format!("- {text}"),
        }
    }
}

impl LineDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_unchanged(&self) -> bool {
        self.lines.iter().all(|l| matches!(l, DiffLine::Same(_)))
    }

    pub fn additions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Added(_)))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, DiffLine::Removed(_)))
            .count()
    }

    /// One rendered string per line.
    pub fn render(&self) -> Vec<String> {
        self.lines.iter().map(DiffLine::render).collect()
    }
}

/// Diff two texts line by line.
pub fn diff_lines(old: &str, new: &str) -> LineDiff {
    let text_diff = TextDiff::from_lines(old, new);
    let lines = text_diff
        .iter_all_changes()
        .map(|change| {
            let text = change.value().trim_end_matches(&['\r', '\n'][..]).to_string();
            match change.tag() {
                ChangeTag::Equal => DiffLine::Same(text),
                ChangeTag::Insert => DiffLine::Added(text),
                ChangeTag::Delete => DiffLine::Removed(text),
            }
        })
        .collect();
    LineDiff { lines }
}
