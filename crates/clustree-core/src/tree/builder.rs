// ── Recursive tree construction ──
//
// Consumes the server's flat cluster graph plus type metadata and produces
// the arena-backed GroupTree. Per graph level:
//
//   1. group children by resource type (one ordered pass),
//   2. resolve each type's attach point: subcategory chain folders
//      (find-or-create, so sibling types sharing a prefix reuse the same
//      folder), then an auto type group wrapper unless the type is a
//      singleton,
//   3. create one cluster node per child and recurse into its subtree,
//   4. sort every sibling list finalized at this level.
//
// Pure function over its inputs: no I/O, no shared state, a fresh node
// arena per call.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::CoreError;
use crate::model::cluster_key::ClusterKey;
use crate::model::graph::{ClusterGraphNode, NAME_DISAGREEMENT};
use crate::model::tree::{GroupTree, NodeId, NodeKind, TreeNode};
use crate::model::type_meta::{GroupCategory, GroupInfo, ResourceTypeId, ResourceTypeMeta};

use super::{identity, membership, sort};

/// Builds a [`GroupTree`] from one group's cluster graph and the metadata
/// for every resource type the graph references.
pub struct TreeBuilder<'a> {
    types: &'a HashMap<ResourceTypeId, ResourceTypeMeta>,
    nodes: IndexMap<NodeId, TreeNode>,
}

impl<'a> TreeBuilder<'a> {
    /// Build the tree for a compatible (recursively clustered) group.
    ///
    /// Fails if the graph references a type id missing from `types`, or if
    /// the graph violates its own invariants. An empty graph is not an
    /// error: the result is just Root + the group-top node.
    pub fn build(
        group: &GroupInfo,
        graph: &ClusterGraphNode,
        types: &'a HashMap<ResourceTypeId, ResourceTypeMeta>,
    ) -> Result<GroupTree, CoreError> {
        if let Some(type_id) = group.resource_type_id {
            if !types.contains_key(&type_id) {
                return Err(CoreError::MissingTypeMetadata { type_id });
            }
        }
        if graph.members > graph.cluster_size {
            return Err(CoreError::MalformedGraph {
                detail: format!(
                    "members {} exceeds cluster size {} at the graph root",
                    graph.members, graph.cluster_size
                ),
            });
        }

        let mut builder = Self {
            types,
            nodes: IndexMap::new(),
        };

        let root_id = builder.insert_root();
        let root_key = ClusterKey::root(group.id);
        let top_id = identity::group_top(group);
        builder.insert(TreeNode {
            id: top_id.clone(),
            parent_id: Some(root_id.clone()),
            display_name: group.name.clone(),
            is_folder: !graph.children.is_empty(),
            children: Vec::new(),
            kind: NodeKind::GroupTop {
                cluster_key: Some(root_key.clone()),
            },
        });
        builder.attach(&root_id, top_id.clone());

        builder.build_children(&top_id, &root_key, graph)?;

        debug!(group = %group.id, nodes = builder.nodes.len(), "built cluster tree");
        Ok(GroupTree::new(builder.nodes, root_id, top_id))
    }

    /// Build the trivial tree for a mixed group.
    ///
    /// Mixed groups are never recursively clustered: the tree is Root plus
    /// a single group-top node carrying no cluster key.
    pub fn build_mixed(group: &GroupInfo) -> GroupTree {
        debug_assert_eq!(group.category, GroupCategory::Mixed);

        let root_id = identity::root();
        let top_id = identity::group_top(group);

        let mut nodes = IndexMap::new();
        nodes.insert(
            root_id.clone(),
            TreeNode {
                id: root_id.clone(),
                parent_id: None,
                display_name: String::new(),
                is_folder: true,
                children: vec![top_id.clone()],
                kind: NodeKind::Root,
            },
        );
        nodes.insert(
            top_id.clone(),
            TreeNode {
                id: top_id.clone(),
                parent_id: Some(root_id.clone()),
                display_name: group.name.clone(),
                is_folder: false,
                children: Vec::new(),
                kind: NodeKind::GroupTop { cluster_key: None },
            },
        );

        GroupTree::new(nodes, root_id, top_id)
    }

    // ── Recursion ────────────────────────────────────────────────────

    fn build_children(
        &mut self,
        parent_id: &NodeId,
        parent_key: &ClusterKey,
        graph_node: &ClusterGraphNode,
    ) -> Result<(), CoreError> {
        if graph_node.children.is_empty() {
            return Ok(());
        }

        // First pass: group the children by resource type. Order within a
        // type preserves input order; final order is assigned by the sort
        // below.
        let mut by_type: IndexMap<ResourceTypeId, Vec<&ClusterGraphNode>> = IndexMap::new();
        for child in &graph_node.children {
            let fragment = child.key_fragment.as_ref().ok_or_else(|| {
                CoreError::MalformedGraph {
                    detail: format!("non-root node {:?} has no key fragment", child.name),
                }
            })?;
            if child.members > child.cluster_size {
                return Err(CoreError::MalformedGraph {
                    detail: format!(
                        "members {} exceeds cluster size {} at {:?}",
                        child.members, child.cluster_size, child.name
                    ),
                });
            }
            by_type
                .entry(fragment.resource_type_id)
                .or_default()
                .push(child);
        }

        // Second pass: process each set of like-typed children. Sibling
        // lists touched at this level are sorted only after every type has
        // been placed, because types sharing a subcategory prefix append
        // into the same folder.
        let mut sort_pending: Vec<NodeId> = Vec::new();

        for (type_id, children) in by_type {
            let meta = self
                .types
                .get(&type_id)
                .ok_or(CoreError::MissingTypeMetadata { type_id })?;

            // Walk the subcategory chain, reusing folders created for
            // sibling types with a shared prefix.
            let mut attach_id = parent_id.clone();
            for chain_name in &meta.subcategory_chain {
                let sub_id = identity::subcategory(&attach_id, chain_name);
                if !self.nodes.contains_key(&sub_id) {
                    self.insert(TreeNode {
                        id: sub_id.clone(),
                        parent_id: Some(attach_id.clone()),
                        display_name: chain_name.clone(),
                        is_folder: true,
                        children: Vec::new(),
                        kind: NodeKind::Subcategory,
                    });
                    self.attach(&attach_id, sub_id.clone());
                    sort_pending.push(sub_id.clone());
                }
                attach_id = sub_id;
            }

            // Singleton types attach their cluster nodes directly; all
            // other types get one auto type group folder as wrapper.
            let cluster_parent = if meta.singleton {
                attach_id
            } else {
                let auto_id = identity::auto_type_group(&attach_id, type_id);
                self.insert(TreeNode {
                    id: auto_id.clone(),
                    parent_id: Some(attach_id.clone()),
                    display_name: pluralize(&meta.name),
                    is_folder: true,
                    children: Vec::new(),
                    kind: NodeKind::AutoTypeGroup { type_id },
                });
                self.attach(&attach_id, auto_id.clone());
                sort_pending.push(auto_id.clone());
                auto_id
            };

            for child in children {
                self.build_cluster_node(&cluster_parent, parent_key, type_id, meta, child)?;
            }
        }

        sort_pending.push(parent_id.clone());
        for id in &sort_pending {
            self.sort_children_of(id);
        }
        Ok(())
    }

    fn build_cluster_node(
        &mut self,
        attach_id: &NodeId,
        parent_key: &ClusterKey,
        type_id: ResourceTypeId,
        meta: &ResourceTypeMeta,
        child: &ClusterGraphNode,
    ) -> Result<(), CoreError> {
        let fragment = child.key_fragment.clone().ok_or_else(|| {
            CoreError::MalformedGraph {
                detail: format!("non-root node {:?} has no key fragment", child.name),
            }
        })?;
        let key = parent_key.child(fragment);
        let id = identity::cluster(&key);

        // When members disagree on the resource name the server sends only
        // the sentinel; substitute a synthesized name.
        let resolved_name = if child.name == NAME_DISAGREEMENT {
            format!("Group of {}", meta.name)
        } else {
            child.name.clone()
        };

        let partial = membership::annotate(child.members, child.cluster_size, &resolved_name);
        let display_name = match &partial {
            Some(p) => membership::partial_display_name(&resolved_name, p.percent),
            None => resolved_name,
        };

        self.insert(TreeNode {
            id: id.clone(),
            parent_id: Some(attach_id.clone()),
            display_name,
            is_folder: !child.children.is_empty(),
            children: Vec::new(),
            kind: NodeKind::Cluster {
                cluster_key: key.clone(),
                type_id,
                partial,
            },
        });
        self.attach(attach_id, id.clone());

        self.build_children(&id, &key, child)
    }

    // ── Arena plumbing ───────────────────────────────────────────────

    fn insert_root(&mut self) -> NodeId {
        let root_id = identity::root();
        self.insert(TreeNode {
            id: root_id.clone(),
            parent_id: None,
            // Never rendered; the widget shows the group-top node as the
            // visible top of the tree.
            display_name: String::new(),
            is_folder: true,
            children: Vec::new(),
            kind: NodeKind::Root,
        });
        root_id
    }

    fn insert(&mut self, node: TreeNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    fn attach(&mut self, parent_id: &NodeId, child_id: NodeId) {
        let parent = self
            .nodes
            .get_mut(parent_id)
            .expect("attach target inserted before its children");
        parent.children.push(child_id);
    }

    fn sort_children_of(&mut self, id: &NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let mut keyed: Vec<(sort::SiblingKey, NodeId)> = node
            .children
            .iter()
            .filter_map(|child_id| {
                self.nodes
                    .get(child_id)
                    .map(|child| (sort::sibling_key(child), child_id.clone()))
            })
            .collect();
        keyed.sort();
        if let Some(node) = self.nodes.get_mut(id) {
            node.children = keyed.into_iter().map(|(_, child_id)| child_id).collect();
        }
    }
}

/// Display-name pluralization for auto type group folders
/// (`"WAR"` becomes `"WARs"`, `"Repository"` becomes `"Repositories"`).
fn pluralize(name: &str) -> String {
    if let Some(stem) = name.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if penultimate.is_some_and(|c| !"aeiouAEIOU".contains(c)) {
            return format!("{stem}ies");
        }
    }
    if name.ends_with('s')
        || name.ends_with('x')
        || name.ends_with("ch")
        || name.ends_with("sh")
    {
        return format!("{name}es");
    }
    format!("{name}s")
}
