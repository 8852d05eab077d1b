//! Canonical domain types for the cluster-tree core.
//!
//! Inputs ([`ClusterGraphNode`], [`ResourceTypeMeta`], [`GroupInfo`]) are
//! read-only once constructed; the output [`GroupTree`] is rebuilt from
//! scratch on every fetch and never mutated afterwards.

pub mod cluster_key;
pub mod graph;
pub mod tree;
pub mod type_meta;

pub use cluster_key::{ClusterKey, KeyFragment, KeyParseError};
pub use graph::ClusterGraphNode;
pub use tree::{GroupTree, NodeId, NodeKind, PartialMembership, TreeNode};
pub use type_meta::{
    GroupCategory, GroupId, GroupInfo, ResourceCategory, ResourceTypeId, ResourceTypeMeta,
};
