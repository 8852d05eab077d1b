//! Wire types for the management server's group and type-metadata endpoints.
//!
//! All types match the JSON responses from `/v1/` endpoints. Field names
//! use camelCase via `#[serde(rename_all = "camelCase")]`.

use serde::{Deserialize, Serialize};

// ── Groups ───────────────────────────────────────────────────────────

/// Resource group overview — from `GET /v1/groups/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDto {
    pub id: i32,
    pub name: String,
    /// One of: `COMPATIBLE`, `MIXED`.
    pub category: String,
    /// The single member type of a compatible group. Absent for mixed groups.
    pub resource_type_id: Option<i32>,
}

// ── Cluster graph ────────────────────────────────────────────────────

/// One level of the server-computed aggregate graph — from
/// `GET /v1/groups/{id}/cluster-graph`.
///
/// The server answers with the graph root, whose `resourceTypeId` /
/// `resourceKey` pair is absent; every deeper node carries one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterGraphDto {
    /// Display name, or the sentinel `"..."` when members disagree.
    pub name: String,
    pub resource_type_id: Option<i32>,
    pub resource_key: Option<String>,
    /// Group members that contributed a matching resource at this path.
    pub members: u32,
    /// Group members that could have contributed (ambient group size).
    pub cluster_size: u32,
    #[serde(default)]
    pub children: Vec<ClusterGraphDto>,
}

// ── Resource types ───────────────────────────────────────────────────

/// Resource type metadata — from `GET /v1/resource-types?ids=…`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTypeDto {
    pub id: i32,
    pub name: String,
    /// One of: `PLATFORM`, `SERVER`, `SERVICE`.
    pub category: String,
    pub singleton: bool,
    /// Pipe-delimited subcategory hierarchy (e.g. `"Runtime|Deployments"`).
    /// Parsed into a structured chain at the core boundary, never here.
    pub subcategory: Option<String>,
}
