// ── Selection orchestration ──
//
// Thin async layer between the data source and the builder. One selection
// means: fetch group info; for a mixed group build the trivial tree; for a
// compatible group fetch the cluster graph, seed and fetch the type
// metadata it references, and run the builder. The result is published
// through a watch channel, so renderers just hold a receiver and redraw on
// change.
//
// Selections can overlap: a user clicking a second group while the first
// is still loading must never see the first group's tree arrive late and
// clobber the second. Every selection takes a sequence number up front and
// re-checks it after each await; a superseded selection returns `Ok(None)`
// without publishing. Losing a race is not an error.

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;
use crate::model::{
    ClusterGraphNode, GroupCategory, GroupId, GroupInfo, GroupTree, ResourceTypeId,
    ResourceTypeMeta,
};
use crate::tree::builder::TreeBuilder;

// ── Data source abstraction ─────────────────────────────────────────

/// Where the service gets its inputs. Implemented for
/// [`clustree_api::ConsoleClient`]; tests substitute an in-memory source.
pub trait ClusterSource: Send + Sync {
    /// Fetch the group's overview record.
    fn group_info(
        &self,
        id: GroupId,
    ) -> impl Future<Output = Result<GroupInfo, CoreError>> + Send;

    /// Fetch the server-computed aggregate cluster graph for the group.
    fn cluster_graph(
        &self,
        id: GroupId,
    ) -> impl Future<Output = Result<ClusterGraphNode, CoreError>> + Send;

    /// Fetch metadata for a set of resource types. The returned map should
    /// cover every requested id; gaps become
    /// [`CoreError::MissingTypeMetadata`] at build time.
    fn type_metadata(
        &self,
        ids: &BTreeSet<ResourceTypeId>,
    ) -> impl Future<Output = Result<HashMap<ResourceTypeId, ResourceTypeMeta>, CoreError>> + Send;
}

// ── Service ─────────────────────────────────────────────────────────

/// Orchestrates group selections and publishes the built tree.
pub struct ClusterTreeService<S> {
    source: S,
    seq: AtomicU64,
    tree_tx: watch::Sender<Option<Arc<GroupTree>>>,
}

impl<S: ClusterSource> ClusterTreeService<S> {
    pub fn new(source: S) -> Self {
        let (tree_tx, _rx) = watch::channel(None);
        Self {
            source,
            seq: AtomicU64::new(0),
            tree_tx,
        }
    }

    /// Subscribe to tree publications. The receiver observes `None` until
    /// the first selection completes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<GroupTree>>> {
        self.tree_tx.subscribe()
    }

    /// The most recently published tree, if any.
    pub fn current(&self) -> Option<Arc<GroupTree>> {
        self.tree_tx.borrow().clone()
    }

    /// Select a group: fetch its inputs, build its tree, publish it.
    ///
    /// Returns `Ok(None)` when a newer selection started while this one
    /// was in flight; the superseded selection publishes nothing. Fetch
    /// and build failures propagate as errors even when superseded.
    pub async fn select_group(
        &self,
        group_id: GroupId,
    ) -> Result<Option<Arc<GroupTree>>, CoreError> {
        let my_seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(group = %group_id, seq = my_seq, "selecting group");

        let group = self.source.group_info(group_id).await?;
        if self.superseded(my_seq, group_id) {
            return Ok(None);
        }

        let tree = if group.category == GroupCategory::Mixed {
            TreeBuilder::build_mixed(&group)
        } else {
            let graph = self.source.cluster_graph(group_id).await?;
            if self.superseded(my_seq, group_id) {
                return Ok(None);
            }

            // Seed the metadata fetch with every type the graph mentions,
            // plus the group's own member type (referenced even when the
            // graph has no children).
            let mut type_ids = graph.type_ids();
            if let Some(type_id) = group.resource_type_id {
                type_ids.insert(type_id);
            }
            let types = self.source.type_metadata(&type_ids).await?;
            if self.superseded(my_seq, group_id) {
                return Ok(None);
            }

            TreeBuilder::build(&group, &graph, &types)?
        };

        let tree = Arc::new(tree);
        self.tree_tx.send_replace(Some(Arc::clone(&tree)));
        debug!(group = %group_id, seq = my_seq, nodes = tree.len(), "published cluster tree");
        Ok(Some(tree))
    }

    fn superseded(&self, my_seq: u64, group_id: GroupId) -> bool {
        let latest = self.seq.load(Ordering::SeqCst);
        if latest != my_seq {
            debug!(group = %group_id, seq = my_seq, latest, "selection superseded, discarding");
            return true;
        }
        false
    }
}
