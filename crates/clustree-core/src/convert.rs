// ── Wire-to-domain conversion ──
//
// All DTO parsing happens here, once, at the boundary: enum strings become
// enums, the pipe-delimited subcategory string becomes an ordered chain,
// and half-present type/key pairs on graph nodes are rejected instead of
// leaking `Option` pairs into the builder. The rest of the crate never
// touches a DTO.

use std::collections::{BTreeSet, HashMap};

use clustree_api::{ClusterGraphDto, ConsoleClient, GroupDto, ResourceTypeDto};
use tracing::warn;

use crate::error::CoreError;
use crate::model::{
    ClusterGraphNode, GroupCategory, GroupId, GroupInfo, KeyFragment, ResourceCategory,
    ResourceTypeId, ResourceTypeMeta,
};
use crate::service::ClusterSource;

// ── Groups ──────────────────────────────────────────────────────────

impl TryFrom<GroupDto> for GroupInfo {
    type Error = CoreError;

    fn try_from(dto: GroupDto) -> Result<Self, CoreError> {
        let category = match dto.category.as_str() {
            "COMPATIBLE" => GroupCategory::Compatible,
            "MIXED" => GroupCategory::Mixed,
            other => {
                return Err(CoreError::Internal(format!(
                    "unknown group category {other:?} on group {}",
                    dto.id
                )));
            }
        };
        Ok(GroupInfo {
            id: GroupId(dto.id),
            name: dto.name,
            category,
            resource_type_id: dto.resource_type_id.map(ResourceTypeId),
        })
    }
}

// ── Cluster graph ───────────────────────────────────────────────────

impl TryFrom<ClusterGraphDto> for ClusterGraphNode {
    type Error = CoreError;

    /// Recursive conversion of one graph level.
    ///
    /// The `resourceTypeId` / `resourceKey` pair must be either fully
    /// present (any non-root node) or fully absent (the root); a
    /// half-present pair is a malformed graph.
    fn try_from(dto: ClusterGraphDto) -> Result<Self, CoreError> {
        let key_fragment = match (dto.resource_type_id, dto.resource_key) {
            (Some(type_id), Some(key)) => Some(KeyFragment::new(type_id, key)),
            (None, None) => None,
            (type_id, key) => {
                return Err(CoreError::MalformedGraph {
                    detail: format!(
                        "node {:?} has a half-present type/key pair \
                         (resourceTypeId={type_id:?}, resourceKey={key:?})",
                        dto.name
                    ),
                });
            }
        };

        let children = dto
            .children
            .into_iter()
            .map(ClusterGraphNode::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClusterGraphNode {
            name: dto.name,
            key_fragment,
            members: dto.members,
            cluster_size: dto.cluster_size,
            children,
        })
    }
}

// ── Resource types ──────────────────────────────────────────────────

impl TryFrom<ResourceTypeDto> for ResourceTypeMeta {
    type Error = CoreError;

    fn try_from(dto: ResourceTypeDto) -> Result<Self, CoreError> {
        let category = match dto.category.as_str() {
            "PLATFORM" => ResourceCategory::Platform,
            "SERVER" => ResourceCategory::Server,
            "SERVICE" => ResourceCategory::Service,
            other => {
                return Err(CoreError::Internal(format!(
                    "unknown resource category {other:?} on type {}",
                    dto.id
                )));
            }
        };
        Ok(ResourceTypeMeta {
            id: ResourceTypeId(dto.id),
            name: dto.name,
            category,
            singleton: dto.singleton,
            subcategory_chain: parse_subcategory_chain(dto.subcategory.as_deref()),
        })
    }
}

/// Split a pipe-delimited subcategory string into an ordered chain,
/// outermost first. Empty segments (leading/trailing/doubled pipes) are
/// dropped.
fn parse_subcategory_chain(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split('|')
        .map(str::trim)
        .filter(|seg| !seg.is_empty())
        .map(str::to_owned)
        .collect()
}

// ── ClusterSource over the HTTP client ──────────────────────────────

impl ClusterSource for ConsoleClient {
    async fn group_info(&self, id: GroupId) -> Result<GroupInfo, CoreError> {
        let dto = self.get_group(id.0).await?;
        GroupInfo::try_from(dto)
    }

    async fn cluster_graph(&self, id: GroupId) -> Result<ClusterGraphNode, CoreError> {
        let dto = self.get_cluster_graph(id.0).await?;
        ClusterGraphNode::try_from(dto)
    }

    async fn type_metadata(
        &self,
        ids: &BTreeSet<ResourceTypeId>,
    ) -> Result<HashMap<ResourceTypeId, ResourceTypeMeta>, CoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_ids: Vec<i32> = ids.iter().map(|id| id.0).collect();
        let dtos = self.get_resource_types(&raw_ids).await?;

        let mut metas = HashMap::with_capacity(dtos.len());
        for dto in dtos {
            let meta = ResourceTypeMeta::try_from(dto)?;
            metas.insert(meta.id, meta);
        }

        // The server promises an entry per requested id; an incomplete
        // answer surfaces as a build error later, so flag it at the source.
        for id in ids {
            if !metas.contains_key(id) {
                warn!(type_id = %id, "resource type metadata missing from server response");
            }
        }

        Ok(metas)
    }
}
