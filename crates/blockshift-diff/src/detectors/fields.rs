use blockshift_types::{Feature, NodeKind};

use crate::config::FieldLengthPolicy;
use crate::detectors::{children_where, BlockDetector, BlockPair};
use crate::equality::check_same_block;
use crate::error::DiffResult;

/// Field change: the text of one of the block's own fields differs.
///
/// Direct field children are paired positionally. With
/// [`FieldLengthPolicy::Ignore`] pairing stops at the shorter list.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldChangeDetector {
    policy: FieldLengthPolicy,
}

impl FieldChangeDetector {
    pub fn new(policy: FieldLengthPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FieldLengthPolicy {
        self.policy
    }
}

impl BlockDetector for FieldChangeDetector {
    fn feature(&self) -> Feature {
        Feature::FieldsChanged
    }

    fn detect(&self, pair: &BlockPair<'_>) -> DiffResult<bool> {
        check_same_block(pair.prev_block, pair.cur_block)?;

        let is_field = |k: NodeKind| k == NodeKind::Field;
        let before = children_where(pair.prev, pair.prev_node, is_field);
        let after = children_where(pair.cur, pair.cur_node, is_field);

        let edited = before.iter().zip(&after).any(|(a, b)| a.text != b.text);
        let resized = self.policy == FieldLengthPolicy::Flag && before.len() != after.len();
        Ok(edited || resized)
    }
}
