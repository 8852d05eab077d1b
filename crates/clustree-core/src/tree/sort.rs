// ── Sibling ordering ──
//
// Total order over sibling nodes, independent of input order:
//   1. folders before leaves,
//   2. among folders, organizational (subcategory / auto type group)
//      before content (cluster) folders,
//   3. case-insensitive display name.
// Strict weak ordering, so repeated builds from identical input always
// produce identical sibling order.

use std::cmp::Ordering;

use crate::model::tree::TreeNode;

/// Sort key for one sibling. Precomputed per node so a sibling list can be
/// sorted without re-lowercasing names on every comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct SiblingKey {
    rank: u8,
    name: String,
}

pub(crate) fn sibling_key(node: &TreeNode) -> SiblingKey {
    let rank = if !node.is_folder {
        2
    } else if node.is_organizational() {
        0
    } else {
        1
    };
    SiblingKey {
        rank,
        name: node.display_name.to_lowercase(),
    }
}

/// Compare two siblings. Exposed for property tests; the builder sorts
/// via [`sibling_key`].
pub fn compare(a: &TreeNode, b: &TreeNode) -> Ordering {
    sibling_key(a).cmp(&sibling_key(b))
}
