use std::path::Path;

use serde::{Deserialize, Serialize};

use blockshift_diff::ExtractConfig;

use crate::error::HistoryResult;

/// Settings for walking and analysing project histories.
///
/// Every key is optional in the TOML form; missing keys take the defaults
/// below.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Blocks file inside each commit.
    pub blocks_path: String,
    /// Project form file, searched for a marker during discovery.
    pub form_path: String,
    /// Cut junk after the closing root tag before parsing.
    pub repair_trailing_garbage: bool,
    /// Attach a line diff of the blocks file to every change record.
    pub text_diff: bool,
    /// User directories skipped during discovery.
    pub ignore_users: Vec<String>,
    /// Feature extractor settings.
    pub extract: ExtractConfig,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            blocks_path: "Screen1/blocks.xml".into(),
            form_path: "Screen1/form.json".into(),
            repair_trailing_garbage: true,
            text_diff: true,
            ignore_users: Vec::new(),
            extract: ExtractConfig::default(),
        }
    }
}

impl HistoryConfig {
    pub fn from_toml_str(s: &str) -> HistoryResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> HistoryResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
