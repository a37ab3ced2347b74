//! Presence: which block identities appear or disappear across a transition.

use blockshift_tree::Snapshot;
use blockshift_types::BlockId;

/// Blocks deleted and added between two snapshots.
///
/// Both lists come out sorted by identifier, but callers should treat them
/// as sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Presence {
    /// Present in the previous snapshot only.
    pub deleted: Vec<BlockId>,
    /// Present in the current snapshot only.
    pub added: Vec<BlockId>,
}

impl Presence {
    /// Returns `true` if no block appeared or disappeared.
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.added.is_empty()
    }
}

/// Set difference of the two snapshots' full identifier sets.
pub fn detect_presence(prev: &Snapshot, cur: &Snapshot) -> Presence {
    Presence {
        deleted: only_in(prev, cur),
        added: only_in(cur, prev),
    }
}

/// Identifiers present in both snapshots, sorted. Only these are handed to
/// the per-block detectors.
pub fn common_block_ids<'a>(prev: &'a Snapshot, cur: &Snapshot) -> Vec<&'a BlockId> {
    prev.block_ids()
        .filter(|id| cur.contains_block(id.as_str()))
        .collect()
}

fn only_in(this: &Snapshot, other: &Snapshot) -> Vec<BlockId> {
    this.block_ids()
        .filter(|id| !other.contains_block(id.as_str()))
        .cloned()
        .collect()
}
