use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// One of the six change features extracted for every transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    /// Blocks present only in the current snapshot.
    Added,
    /// Blocks present only in the previous snapshot.
    Deleted,
    /// Top-level blocks whose canvas coordinates changed.
    MovedInSpace,
    /// Blocks whose enclosing block changed.
    MovedInContext,
    /// Blocks whose fields changed.
    FieldsChanged,
    /// Blocks whose own attributes or immediate child structure changed.
    Changed,
}

impl Feature {
    /// All features, in export column order.
    pub const ALL: [Feature; 6] = [
        Feature::Added,
        Feature::Deleted,
        Feature::MovedInSpace,
        Feature::MovedInContext,
        Feature::FieldsChanged,
        Feature::Changed,
    ];

    /// Short command-line name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::MovedInSpace => "moved-in-space",
            Self::MovedInContext => "moved-in-context",
            Self::FieldsChanged => "fields-changed",
            Self::Changed => "changed",
        }
    }

    /// Column name of the boolean flag in exported records.
    pub fn flag_column(&self) -> &'static str {
        match self {
            Self::Added => "blocksAddedFlag",
            Self::Deleted => "blocksDeletedFlag",
            Self::MovedInSpace => "blocksMovedInSpaceFlag",
            Self::MovedInContext => "blocksMovedContextFlag",
            Self::FieldsChanged => "blocksFieldsChangedFlag",
            Self::Changed => "blocksChangedFlag",
        }
    }

    /// Column name of the identifier list in exported records.
    pub fn list_column(&self) -> &'static str {
        match self {
            Self::Added => "blocksAddedList",
            Self::Deleted => "blocksDeletedList",
            Self::MovedInSpace => "blocksMovedInSpaceList",
            Self::MovedInContext => "blocksMovedContextList",
            Self::FieldsChanged => "blocksFieldsChangedList",
            Self::Changed => "blocksChangedList",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s || f.flag_column() == s)
            .ok_or_else(|| TypeError::UnknownFeature(s.to_owned()))
    }
}
