// ── Output tree model ──
//
// The built tree is a flat, id-indexed arena: nodes are records, edges are
// id references. No live parent/child pointers, so the whole thing is
// trivially serializable and safe to hand across threads. A tree is built
// once and replaced wholesale; nodes are never mutated after construction.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::cluster_key::ClusterKey;
use super::type_meta::ResourceTypeId;

// ── NodeId ──────────────────────────────────────────────────────────

/// Globally unique, deterministic node identifier.
///
/// Cluster nodes use their [`ClusterKey`] encoding; synthetic folders fold
/// the full ancestor path into the id so that equal discriminators on
/// different branches can never collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Partial membership ──────────────────────────────────────────────

/// Annotation attached to a cluster node representing fewer than the full
/// set of group members. Absent on fully-represented clusters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialMembership {
    /// `round(100 * members / cluster_size)`.
    pub percent: u8,
    /// Hover text, e.g. `"1 out of 2 group members have Bar child resources"`.
    pub message: String,
}

// ── TreeNode ────────────────────────────────────────────────────────

/// What a tree node represents. Closed set; consumers match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Synthetic root; exactly one per tree, no parent.
    Root,
    /// The group itself. Compatible groups carry the group-root
    /// [`ClusterKey`]; mixed groups carry none.
    GroupTop { cluster_key: Option<ClusterKey> },
    /// Real grouped resources at one type+key path.
    Cluster {
        cluster_key: ClusterKey,
        type_id: ResourceTypeId,
        partial: Option<PartialMembership>,
    },
    /// Synthetic folder wrapping all cluster nodes of one non-singleton
    /// type under a given parent.
    AutoTypeGroup { type_id: ResourceTypeId },
    /// Synthetic folder for one hop of a subcategory chain. Carries
    /// neither a cluster key nor a resource type.
    Subcategory,
}

/// One node of the built tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    /// `None` only on the root node.
    pub parent_id: Option<NodeId>,
    pub display_name: String,
    pub is_folder: bool,
    /// Direct children in final display order.
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

impl TreeNode {
    /// The node's cluster key, when it represents real grouped resources.
    pub fn cluster_key(&self) -> Option<&ClusterKey> {
        match &self.kind {
            NodeKind::GroupTop { cluster_key } => cluster_key.as_ref(),
            NodeKind::Cluster { cluster_key, .. } => Some(cluster_key),
            _ => None,
        }
    }

    /// The resource type behind this node, if any.
    pub fn type_id(&self) -> Option<ResourceTypeId> {
        match &self.kind {
            NodeKind::Cluster { type_id, .. } | NodeKind::AutoTypeGroup { type_id } => {
                Some(*type_id)
            }
            _ => None,
        }
    }

    /// `true` when this cluster node represents fewer than the full set of
    /// group members.
    pub fn is_partial(&self) -> bool {
        matches!(
            &self.kind,
            NodeKind::Cluster {
                partial: Some(_),
                ..
            }
        )
    }

    /// Organizational folders (subcategory / auto type group) sort before
    /// content folders; the sorter is the only consumer of this.
    pub(crate) fn is_organizational(&self) -> bool {
        matches!(self.kind, NodeKind::AutoTypeGroup { .. } | NodeKind::Subcategory)
    }
}

// ── GroupTree ───────────────────────────────────────────────────────

/// The built, immutable tree for one group selection.
///
/// Nodes live in an insertion-ordered, id-indexed arena. Lookups by id are
/// O(1); [`flatten`](Self::flatten) yields the deterministic pre-order
/// list the rendering widget consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupTree {
    nodes: IndexMap<NodeId, TreeNode>,
    root_id: NodeId,
    group_node_id: NodeId,
    built_at: DateTime<Utc>,
}

impl GroupTree {
    pub(crate) fn new(
        nodes: IndexMap<NodeId, TreeNode>,
        root_id: NodeId,
        group_node_id: NodeId,
    ) -> Self {
        Self {
            nodes,
            root_id,
            group_node_id,
            built_at: Utc::now(),
        }
    }

    pub fn get(&self, id: &NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn root_id(&self) -> &NodeId {
        &self.root_id
    }

    /// The node representing the group itself (the root's only child).
    pub fn group_node_id(&self) -> &NodeId {
        &self.group_node_id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Iterate nodes in arena insertion order.
    pub fn iter(&self) -> indexmap::map::Values<'_, NodeId, TreeNode> {
        self.nodes.values()
    }

    /// Deterministic pre-order traversal from the root, children in final
    /// display order. This is the flat list handed to rendering widgets.
    pub fn flatten(&self) -> Vec<&TreeNode> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![&self.root_id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                out.push(node);
                for child in node.children.iter().rev() {
                    stack.push(child);
                }
            }
        }
        out
    }

    /// Find the node carrying the given cluster key, if any. Used by
    /// rendering widgets to restore a bookmarked selection.
    pub fn find_by_cluster_key(&self, key: &ClusterKey) -> Option<&TreeNode> {
        self.nodes
            .values()
            .find(|node| node.cluster_key() == Some(key))
    }

    /// Walk `parent_id` links from `id` up to (and excluding) the root.
    /// The returned chain starts at `id`'s parent and ends at the root.
    /// Returns `None` if `id` is unknown.
    pub fn ancestors(&self, id: &NodeId) -> Option<Vec<&TreeNode>> {
        let mut node = self.nodes.get(id)?;
        let mut chain = Vec::new();
        while let Some(parent_id) = &node.parent_id {
            let parent = self.nodes.get(parent_id)?;
            chain.push(parent);
            node = parent;
        }
        Some(chain)
    }
}

impl<'a> IntoIterator for &'a GroupTree {
    type Item = &'a TreeNode;
    type IntoIter = indexmap::map::Values<'a, NodeId, TreeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
