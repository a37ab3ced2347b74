use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Stable identifier of a block node.
///
/// Block identifiers are assigned by the editor that produced the snapshot
/// and are never recomputed here: two snapshots that both contain a block
/// with the same `BlockId` are describing the same evolving block.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Wrap an identifier without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse an identifier read from snapshot data. Empty identifiers are
    /// rejected.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.is_empty() {
            return Err(TypeError::EmptyBlockId);
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for BlockId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Borrow<str> for BlockId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BlockId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.0)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(BlockId::parse(""), Err(TypeError::EmptyBlockId));
    }

    #[test]
    fn display_is_raw_identifier() {
        let id = BlockId::new("42");
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "BlockId(42)");
    }

    #[test]
    fn serde_is_transparent() {
        let id = BlockId::new("7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"7\"");
        let back: BlockId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn borrow_allows_str_lookup() {
        let mut set = std::collections::BTreeSet::new();
        set.insert(BlockId::new("3"));
        assert!(set.contains("3"));
    }

    proptest! {
        #[test]
        fn parse_accepts_any_non_empty(s in ".+") {
            let id: BlockId = s.parse().unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }
    }
}
