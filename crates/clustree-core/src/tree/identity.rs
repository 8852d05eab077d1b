// ── Node identity derivation ──
//
// Every node id is derived deterministically from its position in the
// tree, so rebuilding from identical input reproduces identical ids.
// Synthetic folder ids fold the attach-parent id into the string: two
// branches containing the same non-singleton type, or the same
// subcategory name, get distinct ids instead of silently colliding in
// any id-indexed structure.

use crate::model::cluster_key::{ClusterKey, escape};
use crate::model::tree::NodeId;
use crate::model::type_meta::{GroupCategory, GroupInfo, ResourceTypeId};

/// Fixed sentinel id of the synthetic root, one per build.
pub const ROOT_ID: &str = "__root__";

pub fn root() -> NodeId {
    NodeId::new(ROOT_ID)
}

/// Id of the group-top node. Compatible groups reuse their group-root
/// cluster key encoding so bookmark lookups resolve to the top node;
/// mixed groups get a plain `grp:` sentinel.
pub fn group_top(group: &GroupInfo) -> NodeId {
    match group.category {
        GroupCategory::Compatible => NodeId::new(ClusterKey::root(group.id).encode()),
        GroupCategory::Mixed => NodeId::new(format!("grp:{}", group.id)),
    }
}

/// Cluster node ids are the cluster key itself: no two distinct paths
/// produce the same key.
pub fn cluster(key: &ClusterKey) -> NodeId {
    NodeId::new(key.encode())
}

/// Auto type group folder, scoped by the node it attaches under.
pub fn auto_type_group(attach_parent: &NodeId, type_id: ResourceTypeId) -> NodeId {
    NodeId::new(format!("{attach_parent}/rt:{type_id}"))
}

/// Subcategory folder, scoped by its parent. The name is escaped with the
/// cluster key rules so a `/` or `:` inside a subcategory label cannot
/// fake a deeper path.
pub fn subcategory(parent: &NodeId, name: &str) -> NodeId {
    NodeId::new(format!("{parent}/sc:{}", escape(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::cluster_key::KeyFragment;

    #[test]
    fn cluster_ids_are_key_encodings() {
        let key = ClusterKey::root(4).child(KeyFragment::new(9, "ds"));
        assert_eq!(cluster(&key).as_str(), "g4:9:ds");
    }

    #[test]
    fn synthetic_ids_differ_across_branches() {
        let left = NodeId::new("g1:10:a");
        let right = NodeId::new("g1:10:b");
        // Same type id under different parents: no collision.
        assert_ne!(
            auto_type_group(&left, ResourceTypeId(77)),
            auto_type_group(&right, ResourceTypeId(77))
        );
        // Same subcategory name under different parents: no collision.
        assert_ne!(subcategory(&left, "Runtime"), subcategory(&right, "Runtime"));
    }

    #[test]
    fn subcategory_names_cannot_fake_nesting() {
        let parent = NodeId::new("g1");
        let tricky = subcategory(&parent, "Runtime/sc:Deployments");
        let nested = subcategory(&subcategory(&parent, "Runtime"), "Deployments");
        assert_ne!(tricky, nested);
    }

    #[test]
    fn group_top_id_by_category() {
        let compat = GroupInfo {
            id: 12.into(),
            name: "c".into(),
            category: GroupCategory::Compatible,
            resource_type_id: Some(1.into()),
        };
        let mixed = GroupInfo {
            id: 12.into(),
            name: "m".into(),
            category: GroupCategory::Mixed,
            resource_type_id: None,
        };
        assert_eq!(group_top(&compat).as_str(), "g12");
        assert_eq!(group_top(&mixed).as_str(), "grp:12");
    }
}
