// ── Cluster graph input model ──
//
// The server computes, per recursive compatible group, a flat aggregate
// of how member resources cluster by type and key. One node per level;
// the graph root describes the group itself and carries no key fragment.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::cluster_key::KeyFragment;
use super::type_meta::ResourceTypeId;

/// Sentinel name the server sends when group members disagree on what a
/// clustered resource is called.
pub const NAME_DISAGREEMENT: &str = "...";

/// One level of the server-computed aggregate graph. Read-only input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterGraphNode {
    /// Display name, or [`NAME_DISAGREEMENT`].
    pub name: String,
    /// Identifies this node relative to its parent. `None` only at the
    /// graph root.
    pub key_fragment: Option<KeyFragment>,
    /// Group members that contributed a matching resource at this path.
    pub members: u32,
    /// Group members that could have contributed. Always the ambient group
    /// size at this path, so comparable across siblings.
    pub cluster_size: u32,
    pub children: Vec<ClusterGraphNode>,
}

impl ClusterGraphNode {
    /// Collect every resource type id appearing anywhere in the graph.
    ///
    /// This is the pre-pass that seeds the type metadata fetch: the fetch
    /// must cover the complete set before the build runs.
    pub fn type_ids(&self) -> BTreeSet<ResourceTypeId> {
        let mut ids = BTreeSet::new();
        self.collect_type_ids(&mut ids);
        ids
    }

    fn collect_type_ids(&self, ids: &mut BTreeSet<ResourceTypeId>) {
        if let Some(ref fragment) = self.key_fragment {
            ids.insert(fragment.resource_type_id);
        }
        for child in &self.children {
            child.collect_type_ids(ids);
        }
    }

    /// `true` when the group has no recursive children at all.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
