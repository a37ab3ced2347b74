//! CSV and JSON output of change records.

use std::borrow::Cow;
use std::io::Write;

use serde_json::{json, Map, Value};

use blockshift_types::Feature;

use crate::error::HistoryResult;
use crate::project::ChangeRecord;

const LEADING_COLUMNS: [&str; 4] = ["username", "date", "seconds_elapsed", "hash"];
const DIFF_COLUMN: &str = "diff";
const LIST_SEPARATOR: &str = ";";

/// Column names, in output order.
pub fn columns(with_diff: bool) -> Vec<&'static str> {
    let mut cols: Vec<&str> = LEADING_COLUMNS.to_vec();
    for feature in Feature::ALL {
        cols.push(feature.flag_column());
        cols.push(feature.list_column());
    }
    if with_diff {
        cols.push(DIFF_COLUMN);
    }
    cols
}

fn quote(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn csv_row(record: &ChangeRecord, with_diff: bool) -> Vec<String> {
    let mut row = vec![
        record.username.clone(),
        record.date.clone(),
        record.seconds_elapsed.to_string(),
        record.hash.clone(),
    ];
    for feature in Feature::ALL {
        match &record.features {
            Some(features) => {
                row.push(features.flag(feature).to_string());
                let ids: Vec<&str> = features.list(feature).iter().map(|id| id.as_str()).collect();
                row.push(ids.join(LIST_SEPARATOR));
            }
            None => row.extend([String::new(), String::new()]),
        }
    }
    if with_diff {
        row.push(record.diff.as_ref().map(|d| d.join("\n")).unwrap_or_default());
    }
    row
}

/// Write `changes` as CSV with a header row.
///
/// Flags are `true`/`false`, lists are `;`-joined identifiers. The first
/// record of a project has no transition, so its feature cells are empty.
pub fn write_csv<W: Write>(
    changes: &[ChangeRecord],
    with_diff: bool,
    mut out: W,
) -> HistoryResult<()> {
    writeln!(out, "{}", columns(with_diff).join(","))?;
    for record in changes {
        let row = csv_row(record, with_diff);
        let cells: Vec<Cow<'_, str>> = row.iter().map(|c| quote(c)).collect();
        writeln!(out, "{}", cells.join(","))?;
    }
    Ok(())
}

fn json_row(record: &ChangeRecord, with_diff: bool) -> Value {
    let mut row = Map::new();
    row.insert("username".into(), json!(record.username));
    row.insert("date".into(), json!(record.date));
    row.insert("seconds_elapsed".into(), json!(record.seconds_elapsed));
    row.insert("hash".into(), json!(record.hash));
    for feature in Feature::ALL {
        let (flag, list) = match &record.features {
            Some(features) => (json!(features.flag(feature)), json!(features.list(feature))),
            None => (Value::Null, Value::Null),
        };
        row.insert(feature.flag_column().into(), flag);
        row.insert(feature.list_column().into(), list);
    }
    if with_diff {
        row.insert(DIFF_COLUMN.into(), json!(record.diff));
    }
    Value::Object(row)
}

/// Write `changes` as a pretty-printed JSON array keyed by column name.
pub fn write_json<W: Write>(
    changes: &[ChangeRecord],
    with_diff: bool,
    mut out: W,
) -> HistoryResult<()> {
    let rows: Vec<Value> = changes.iter().map(|r| json_row(r, with_diff)).collect();
    serde_json::to_writer_pretty(&mut out, &rows)?;
    writeln!(out)?;
    Ok(())
}

/// Write the blocks text of every record for replaying a session.
pub fn write_playback_json<W: Write>(changes: &[ChangeRecord], mut out: W) -> HistoryResult<()> {
    let frames: Vec<Value> = changes
        .iter()
        .map(|r| {
            json!({
                "seconds_elapsed": r.seconds_elapsed,
                "date": r.date,
                "hash": r.hash,
                "blocks": r.contents,
            })
        })
        .collect();
    serde_json::to_writer_pretty(&mut out, &frames)?;
    writeln!(out)?;
    Ok(())
}
