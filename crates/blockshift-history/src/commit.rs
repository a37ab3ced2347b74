use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, HistoryResult};

/// One commit of a project history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full commit hash.
    pub hash: String,
    /// Commit time, Unix seconds.
    pub time: i64,
    /// Commit time as `yyyy-mm-dd hh:mm:ss` in the committer's offset.
    pub date: String,
}

impl CommitInfo {
    /// Build from a raw git timestamp and its UTC offset in minutes.
    pub fn new(hash: impl Into<String>, time: i64, offset_minutes: i32) -> HistoryResult<Self> {
        Ok(Self {
            hash: hash.into(),
            time,
            date: format_date(time, offset_minutes)?,
        })
    }

    /// First seven characters of the hash.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

fn format_date(time: i64, offset_minutes: i32) -> HistoryResult<String> {
    let offset = FixedOffset::east_opt(offset_minutes * 60)
        .ok_or(HistoryError::InvalidTimestamp(time))?;
    let utc = DateTime::from_timestamp(time, 0).ok_or(HistoryError::InvalidTimestamp(time))?;
    Ok(utc.with_timezone(&offset).format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_uses_committer_offset() {
        // 2016-02-01T13:20:34Z committed at -05:00.
        let commit = CommitInfo::new("abcdef0123", 1_454_332_834, -300).unwrap();
        assert_eq!(commit.date, "2016-02-01 08:20:34");
        assert_eq!(commit.short_hash(), "abcdef0");
    }

    #[test]
    fn short_hash_of_short_input() {
        let commit = CommitInfo::new("abc", 0, 0).unwrap();
        assert_eq!(commit.short_hash(), "abc");
        assert_eq!(commit.date, "1970-01-01 00:00:00");
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(matches!(
            CommitInfo::new("abc", 0, 60 * 48),
            Err(HistoryError::InvalidTimestamp(0))
        ));
    }
}
