use async_trait::async_trait;
use crs_types::{IndexEntry, NamedQuery};
use tracing::trace;

use crate::error::IndexResult;

/// Membership index keyed by named queries.
///
/// All implementations must satisfy these invariants:
/// - At most one entry per (query, id). `add` refuses a second one and
///   `remove` refuses to act when it finds more than one.
/// - Operations on an unregistered query fail with `UnknownQuery`.
/// - Uniqueness is enforced per query only; the same id may belong to any
///   number of queries.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Bind `key` to a storage location. Re-registering a key overwrites it.
    async fn register_query(&self, key: &str, namespace: &str, location: &str)
        -> IndexResult<()>;

    /// All registered bindings, ordered by key.
    async fn queries(&self) -> IndexResult<Vec<NamedQuery>>;

    /// Record `id` as a member of `query_key`.
    async fn add(&self, query_key: &str, id: &str) -> IndexResult<()>;

    /// Remove `id` from `query_key`. Removing an absent id succeeds.
    async fn remove(&self, query_key: &str, id: &str) -> IndexResult<()>;

    /// Identifiers currently indexed under `query_key`.
    async fn members(&self, query_key: &str) -> IndexResult<Vec<String>>;

    /// Returns `true` if `id` is indexed under `query_key`.
    async fn contains(&self, query_key: &str, id: &str) -> IndexResult<bool> {
        Ok(self.members(query_key).await?.iter().any(|m| m == id))
    }

    /// Every membership entry for `id`, in query key order.
    async fn entries_for(&self, id: &str) -> IndexResult<Vec<IndexEntry>> {
        let mut entries = Vec::new();
        for query in self.queries().await? {
            if self.contains(&query.key, id).await? {
                entries.push(IndexEntry::new(query.key, id));
            }
        }
        Ok(entries)
    }

    /// Remove `id` from every registered query, in key order.
    ///
    /// The first failure stops the sweep and is returned; queries after it are
    /// left untouched.
    async fn remove_from_all(&self, id: &str) -> IndexResult<()> {
        trace!(id, "removing record id from all queries");
        for query in self.queries().await? {
            self.remove(&query.key, id).await?;
        }
        Ok(())
    }
}
