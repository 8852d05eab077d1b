//! Cluster-tree core: the layer between `clustree-api` and tree-rendering
//! consumers.
//!
//! This crate owns the domain model and the one piece of non-trivial logic
//! in the console: turning a flat, server-computed aggregate description of
//! a recursive (auto-clustering) resource group into a navigable tree.
//!
//! - **[`TreeBuilder`]** — the recursive construction. Consumes a
//!   [`ClusterGraphNode`] plus type metadata and produces a [`GroupTree`]:
//!   synthesized type-group and subcategory folders, stable per-node
//!   identities, partial-membership annotations, deterministic sibling
//!   order. A pure function over its inputs; no I/O.
//!
//! - **[`ClusterTreeService`]** — thin orchestration. Fetches group info,
//!   the cluster graph, and type metadata through a [`ClusterSource`],
//!   discards stale responses by request sequence number, and publishes the
//!   built tree through a `tokio::sync::watch` channel.
//!
//! - **Domain model** ([`model`]) — [`ClusterKey`] (bookmarkable path
//!   identity with a lossless URL-safe encoding), the read-only graph and
//!   type-metadata inputs, and the arena-backed output tree.

pub mod convert;
pub mod error;
pub mod model;
pub mod service;
pub mod tree;

pub use error::CoreError;
pub use service::{ClusterSource, ClusterTreeService};
pub use tree::builder::TreeBuilder;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ClusterGraphNode, ClusterKey, GroupCategory, GroupId, GroupInfo, GroupTree, KeyFragment,
    NodeId, NodeKind, PartialMembership, ResourceCategory, ResourceTypeId, ResourceTypeMeta,
    TreeNode,
};
