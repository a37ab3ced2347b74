use blockshift_types::{Feature, NodeKind};

use crate::detectors::{children_where, BlockDetector, BlockPair};
use crate::equality::{blocks_equal, nodes_equal};
use crate::error::DiffResult;

/// Structural change: the block itself, or its immediate non-field children,
/// differ between the snapshots.
///
/// Children are compared one level deep and positionally. A block is only
/// ever nested through a wrapper node (value socket, statement slot, next
/// link), so comparing the wrappers' tags and attributes catches
/// rearrangement and substitution without a recursive tree diff. Field
/// children are left to [`FieldChangeDetector`](crate::FieldChangeDetector).
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralChangeDetector;

impl BlockDetector for StructuralChangeDetector {
    fn feature(&self) -> Feature {
        Feature::Changed
    }

    fn detect(&self, pair: &BlockPair<'_>) -> DiffResult<bool> {
        if !blocks_equal(pair.prev_block, pair.cur_block)? {
            return Ok(true);
        }

        let not_field = |k: NodeKind| k != NodeKind::Field;
        let before = children_where(pair.prev, pair.prev_node, not_field);
        let after = children_where(pair.cur, pair.cur_node, not_field);
        if before.len() != after.len() {
            return Ok(true);
        }

        let unchanged = before
            .iter()
            .zip(&after)
            .all(|(a, b)| nodes_equal(a, b));
        Ok(!unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::testing::run;

    fn changed(prev: &str, cur: &str, id: &str) -> bool {
        run(&StructuralChangeDetector, prev, cur, id)
    }

    #[test]
    fn unchanged_block() {
        let xml = r#"<xml><block type="text" id="1" x="0" y="0"><field name="TEXT">a</field></block></xml>"#;
        assert!(!changed(xml, xml, "1"));
    }

    #[test]
    fn pure_motion_is_not_a_change() {
        let a = r#"<xml><block type="text" id="1" x="0" y="0"/></xml>"#;
        let b = r#"<xml><block type="text" id="1" x="50" y="70"/></xml>"#;
        assert!(!changed(a, b, "1"));
    }

    #[test]
    fn own_attribute_change() {
        let a = r#"<xml><block type="logic_boolean" id="1"/></xml>"#;
        let b = r#"<xml><block type="logic_negate" id="1"/></xml>"#;
        assert!(changed(a, b, "1"));
    }

    #[test]
    fn field_edit_is_not_a_structural_change() {
        let a = r#"<xml><block type="text" id="1"><field name="TEXT">hello</field></block></xml>"#;
        let b = r#"<xml><block type="text" id="1"><field name="TEXT">world</field></block></xml>"#;
        assert!(!changed(a, b, "1"));
    }

    #[test]
    fn gained_socket_is_a_change() {
        let a = r#"<xml><block type="lists_create_with" id="1"><mutation items="1"/></block></xml>"#;
        let b = r#"<xml><block type="lists_create_with" id="1"><mutation items="1"/><value name="ADD0"/></block></xml>"#;
        assert!(changed(a, b, "1"));
    }

    #[test]
    fn child_attribute_change() {
        let a = r#"<xml><block type="lists_create_with" id="1"><mutation items="1"/></block></xml>"#;
        let b = r#"<xml><block type="lists_create_with" id="1"><mutation items="2"/></block></xml>"#;
        assert!(changed(a, b, "1"));
    }

    #[test]
    fn swapped_children_are_a_change() {
        let a = r#"<xml><block type="if" id="1"><value name="IF0"/><statement name="DO0"/></block></xml>"#;
        let b = r#"<xml><block type="if" id="1"><statement name="DO0"/><value name="IF0"/></block></xml>"#;
        assert!(changed(a, b, "1"));
    }

    #[test]
    fn grandchild_change_is_not_seen() {
        let a = r#"<xml><block type="say" id="1"><value name="ARG0"><block type="text" id="2"/></value></block></xml>"#;
        let b = r#"<xml><block type="say" id="1"><value name="ARG0"><block type="math_number" id="2"/></value></block></xml>"#;
        assert!(!changed(a, b, "1"));
        assert!(changed(a, b, "2"));
    }

    #[test]
    fn gaining_a_field_is_not_a_structural_change() {
        let a = r#"<xml><block type="text" id="1"/></xml>"#;
        let b = r#"<xml><block type="text" id="1"><field name="TEXT">x</field></block></xml>"#;
        assert!(!changed(a, b, "1"));
    }
}
