//! Loader for the serialized XML block format.

use std::borrow::Cow;

use blockshift_types::NodeKind;

use crate::error::{TreeError, TreeResult};
use crate::node::Node;
use crate::tree::BlockTree;

const ROOT_CLOSE: &str = "</xml>";

/// Truncate anything after the closing workspace tag.
///
/// Some saved projects carry junk after `</xml>`. Text without a closing
/// tag gets one appended so a cleanly truncated file still parses.
pub fn repair_trailing_garbage(text: &str) -> Cow<'_, str> {
    match text.find(ROOT_CLOSE) {
        Some(pos) => Cow::Borrowed(&text[..pos + ROOT_CLOSE.len()]),
        None if text.trim().is_empty() => Cow::Borrowed(text),
        None => Cow::Owned(format!("{text}{ROOT_CLOSE}")),
    }
}

/// Parse XML block text into a [`BlockTree`].
///
/// Element nodes become tree nodes under their local (namespace-free) tag
/// name. Field elements keep their text; all other text, comments, and
/// processing instructions are dropped. The result is not validated; pass
/// it to [`Snapshot::new`](crate::Snapshot::new) for that.
pub fn parse_blocks_xml(text: &str) -> TreeResult<BlockTree> {
    if text.trim().is_empty() {
        return Err(TreeError::EmptySource);
    }
    let doc = roxmltree::Document::parse(text).map_err(|e| TreeError::Xml(e.to_string()))?;

    let root_el = doc.root_element();
    let mut tree = BlockTree::new(element_to_node(root_el));
    let mut stack = vec![(root_el, tree.root())];

    while let Some((el, id)) = stack.pop() {
        for child in el.children().filter(roxmltree::Node::is_element) {
            let child_id = tree.push(id, element_to_node(child))?;
            stack.push((child, child_id));
        }
    }

    Ok(tree)
}

fn element_to_node(el: roxmltree::Node<'_, '_>) -> Node {
    let tag = el.tag_name().name();
    let mut node = Node::new(tag);
    for a in el.attributes() {
        node.attributes.insert(a.name().to_owned(), a.value().to_owned());
    }
    if NodeKind::from_tag(tag) == NodeKind::Field {
        node.text = el.text().map(str::to_owned);
    }
    node
}
