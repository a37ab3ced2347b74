use serde::{Deserialize, Serialize};

use blockshift_types::{BlockId, Feature};

/// The change features of one transition.
///
/// Each list is computed independently, so one block may appear in several
/// (changed and moved in space, say). Flags are not stored: a feature's flag
/// is set iff its list is non-empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub added: Vec<BlockId>,
    pub deleted: Vec<BlockId>,
    pub moved_in_space: Vec<BlockId>,
    pub moved_in_context: Vec<BlockId>,
    pub fields_changed: Vec<BlockId>,
    pub changed: Vec<BlockId>,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// The identifiers listed under `feature`.
    pub fn list(&self, feature: Feature) -> &[BlockId] {
        match feature {
            Feature::Added => &self.added,
            Feature::Deleted => &self.deleted,
            Feature::MovedInSpace => &self.moved_in_space,
            Feature::MovedInContext => &self.moved_in_context,
            Feature::FieldsChanged => &self.fields_changed,
            Feature::Changed => &self.changed,
        }
    }

    pub(crate) fn list_mut(&mut self, feature: Feature) -> &mut Vec<BlockId> {
        match feature {
            Feature::Added => &mut self.added,
            Feature::Deleted => &mut self.deleted,
            Feature::MovedInSpace => &mut self.moved_in_space,
            Feature::MovedInContext => &mut self.moved_in_context,
            Feature::FieldsChanged => &mut self.fields_changed,
            Feature::Changed => &mut self.changed,
        }
    }

    /// `true` iff the list for `feature` is non-empty.
    pub fn flag(&self, feature: Feature) -> bool {
        !self.list(feature).is_empty()
    }

    /// Features whose flag is set, in export order.
    pub fn flagged(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL.into_iter().filter(|f| self.flag(*f))
    }

    /// Returns `true` if `id` is listed under `feature`.
    pub fn contains(&self, feature: Feature, id: &str) -> bool {
        self.list(feature).iter().any(|b| b.as_str() == id)
    }

    /// Returns `true` if no feature is flagged.
    pub fn is_empty(&self) -> bool {
        self.flagged().next().is_none()
    }
}
