//! Async HTTP client for the management server endpoints that feed the
//! cluster-tree core.
//!
//! Two collaborator surfaces are exposed:
//!
//! - **Cluster graph service** — `GET v1/groups/{id}` and
//!   `GET v1/groups/{id}/cluster-graph`, returning the flat aggregate
//!   description of a recursive resource group.
//! - **Resource type metadata cache** — `GET v1/resource-types?ids=…`,
//!   returning per-type metadata (category, subcategory, singleton flag)
//!   for a requested id set.
//!
//! This crate owns the wire shapes and transport only. Domain modelling and
//! the tree-building algorithm live in `clustree-core`.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ConsoleClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{ClusterGraphDto, GroupDto, ResourceTypeDto};
