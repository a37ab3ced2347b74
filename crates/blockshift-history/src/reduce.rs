//! Post-processing of change records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use blockshift_types::Feature;

use crate::project::ChangeRecord;

/// Collapse runs of field edits.
///
/// Saving while typing produces one commit per keystroke. When a record and
/// the one after it both report field changes on a shared block, the earlier
/// record is dropped so only the final value of the edit survives.
pub fn reduce_field_changes(changes: &[ChangeRecord]) -> Vec<ChangeRecord> {
    changes
        .iter()
        .enumerate()
        .filter(|(i, record)| {
            changes
                .get(i + 1)
                .map_or(true, |next| !share_field_edit(record, next))
        })
        .map(|(_, record)| record.clone())
        .collect()
}

fn share_field_edit(a: &ChangeRecord, b: &ChangeRecord) -> bool {
    let (Some(a), Some(b)) = (&a.features, &b.features) else {
        return false;
    };
    a.fields_changed
        .iter()
        .any(|id| b.fields_changed.contains(id))
}

/// How many records flag each feature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCounts {
    pub counts: BTreeMap<Feature, usize>,
    /// Number of records counted, including each project's first snapshot.
    pub records: usize,
    /// Number of records that carry features, i.e. `records` minus the
    /// first snapshot of each project.
    pub transitions: usize,
}

impl FlagCounts {
    pub fn get(&self, feature: Feature) -> usize {
        self.counts.get(&feature).copied().unwrap_or(0)
    }

    /// Sum of all feature counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Add another project's counts to these.
    pub fn merge(&mut self, other: &FlagCounts) {
        for (feature, n) in &other.counts {
            *self.counts.entry(*feature).or_default() += n;
        }
        self.records += other.records;
        self.transitions += other.transitions;
    }
}

/// Count flagged features across `changes`.
pub fn count_flags(changes: &[ChangeRecord]) -> FlagCounts {
    let mut counts = FlagCounts {
        records: changes.len(),
        ..FlagCounts::default()
    };
    for features in changes.iter().filter_map(|c| c.features.as_ref()) {
        counts.transitions += 1;
        for feature in features.flagged() {
            *counts.counts.entry(feature).or_default() += 1;
        }
    }
    counts
}
