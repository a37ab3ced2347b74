use serde::{Deserialize, Serialize};

/// What the field detector does when a block has a different number of
/// fields in the two snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLengthPolicy {
    /// Compare fields positionally up to the shorter list; trailing fields
    /// are not looked at. A block that only gains or loses a field is then
    /// reported by neither the field nor the structural detector.
    #[default]
    Ignore,
    /// Report a differing field count as a field change.
    Flag,
}

/// Configuration for the feature extractor.
///
/// The set of per-block detectors is fixed: every transition runs all four
/// once per common identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Field detector behaviour on field-count mismatch.
    pub field_length_policy: FieldLengthPolicy,
}
