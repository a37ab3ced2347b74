//! Position-insensitive equality of single nodes.
//!
//! Equality here is shallow: it looks at one node's tag, attributes, and (for
//! fields) text, never at its children. Canvas coordinates are always
//! ignored; motion is the spatial detector's concern.

use blockshift_tree::Node;
use blockshift_types::{attr, NodeKind};

use crate::error::{DiffError, DiffResult};

/// Fail with [`DiffError::IdentityMismatch`] unless `a` and `b` carry the
/// same identifier attribute.
pub fn check_same_block(a: &Node, b: &Node) -> DiffResult<()> {
    if a.id_attr() != b.id_attr() {
        return Err(DiffError::IdentityMismatch {
            left: a.id_attr().map(str::to_owned),
            right: b.id_attr().map(str::to_owned),
        });
    }
    Ok(())
}

/// Block Equality: [`nodes_equal`] guarded by the shared-identity
/// precondition.
pub fn blocks_equal(a: &Node, b: &Node) -> DiffResult<bool> {
    check_same_block(a, b)?;
    Ok(nodes_equal(a, b))
}

/// Compare two nodes ignoring coordinates and children.
///
/// Equal iff the tags match, the non-coordinate attribute sets hold the same
/// names with the same values, and, for fields, the text matches.
pub fn nodes_equal(a: &Node, b: &Node) -> bool {
    let same_text = a.kind() != NodeKind::Field || a.text == b.text;
    a.tag == b.tag && same_text && attributes_equal(a, b)
}

fn attributes_equal(a: &Node, b: &Node) -> bool {
    // BTreeMap iteration is sorted, so equal maps yield equal sequences.
    significant_attributes(a).eq(significant_attributes(b))
}

fn significant_attributes(n: &Node) -> impl Iterator<Item = (&String, &String)> + '_ {
    n.attributes
        .iter()
        .filter(|(name, _)| !attr::is_coordinate(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str) -> Node {
        Node::new("block").with_attr("id", id).with_attr("type", "text")
    }

    #[test]
    fn identical_blocks_are_equal() {
        assert_eq!(blocks_equal(&block("1"), &block("1")), Ok(true));
    }

    #[test]
    fn coordinates_are_ignored() {
        let a = block("1").with_attr("x", "10").with_attr("y", "20");
        let b = block("1").with_attr("x", "99").with_attr("y", "0");
        let nested = block("1");
        assert_eq!(blocks_equal(&a, &b), Ok(true));
        assert_eq!(blocks_equal(&a, &nested), Ok(true));
    }

    #[test]
    fn differing_attribute_value_is_unequal() {
        let b = Node::new("block").with_attr("id", "1").with_attr("type", "math_number");
        assert_eq!(blocks_equal(&block("1"), &b), Ok(false));
    }

    #[test]
    fn extra_attribute_is_unequal() {
        let b = block("1").with_attr("collapsed", "true");
        assert_eq!(blocks_equal(&block("1"), &b), Ok(false));
        assert_eq!(blocks_equal(&b, &block("1")), Ok(false));
    }

    #[test]
    fn differing_tag_is_unequal() {
        let a = Node::new("value").with_attr("name", "ARG0");
        let b = Node::new("statement").with_attr("name", "ARG0");
        assert!(!nodes_equal(&a, &b));
    }

    #[test]
    fn field_text_is_compared() {
        let a = Node::new("field").with_attr("name", "TEXT").with_text("hello");
        let b = Node::new("field").with_attr("name", "TEXT").with_text("world");
        let c = Node::new("field").with_attr("name", "TEXT");
        assert!(nodes_equal(&a, &a.clone()));
        assert!(!nodes_equal(&a, &b));
        assert!(!nodes_equal(&a, &c));
    }

    #[test]
    fn non_field_text_is_ignored() {
        let a = Node::new("comment").with_text("note");
        let b = Node::new("comment").with_text("other note");
        assert!(nodes_equal(&a, &b));
    }

    #[test]
    fn mismatched_identity_is_an_error() {
        let err = blocks_equal(&block("1"), &block("2")).unwrap_err();
        assert_eq!(
            err,
            DiffError::IdentityMismatch {
                left: Some("1".into()),
                right: Some("2".into()),
            }
        );
    }

    #[test]
    fn id_less_nodes_pass_identity_check() {
        let a = Node::new("value").with_attr("name", "ARG0");
        assert!(check_same_block(&a, &a.clone()).is_ok());
    }
}
