// ── Group and resource type metadata ──
//
// Server-assigned integral identities wrapped in newtypes, plus the
// per-type metadata the builder needs to shape the tree (singleton flag,
// subcategory chain). The chain arrives pipe-delimited on the wire and is
// parsed into an ordered list once, at the conversion boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Identities ──────────────────────────────────────────────────────

/// Server-assigned id of a resource group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupId(pub i32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for GroupId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Server-assigned id of a resource type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResourceTypeId(pub i32);

impl fmt::Display for ResourceTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ResourceTypeId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

// ── Resource types ──────────────────────────────────────────────────

/// Broad category of a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceCategory {
    Platform,
    Server,
    Service,
}

/// Per-type metadata from the resource type metadata cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeMeta {
    pub id: ResourceTypeId,
    pub name: String,
    pub category: ResourceCategory,
    /// At most one instance of a singleton type can exist per parent, so
    /// its cluster nodes never get an auto type group wrapper.
    pub singleton: bool,
    /// Ordered subcategory folder names, outermost first. Empty when the
    /// plugin declares no subcategory.
    pub subcategory_chain: Vec<String>,
}

// ── Groups ──────────────────────────────────────────────────────────

/// Category of a resource group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupCategory {
    /// All direct members share one resource type; supports recursive
    /// cluster expansion.
    Compatible,
    /// Members may be of unrelated types; never recursively clustered.
    Mixed,
}

/// The resource group a tree is built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub id: GroupId,
    pub name: String,
    pub category: GroupCategory,
    /// The member type of a compatible group. `None` for mixed groups.
    pub resource_type_id: Option<ResourceTypeId>,
}
