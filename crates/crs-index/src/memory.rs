//! In-memory index backend.
//!
//! Membership lists are kept per query key. Two keys bound to the same route
//! still hold independent members, and uniqueness is checked per key only.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use crs_types::NamedQuery;
use tracing::trace;

use crate::error::{IndexError, IndexResult};
use crate::traits::IndexStore;

/// In-memory index store.
pub struct InMemoryIndexStore {
    /// Registered bindings, keyed by query key.
    queries: RwLock<BTreeMap<String, NamedQuery>>,
    /// Member ids per query key. A `Vec` so duplicates are representable.
    collections: RwLock<HashMap<String, Vec<String>>>,
    closed: AtomicBool,
}

impl InMemoryIndexStore {
    /// Create an index with no registered queries.
    pub fn new() -> Self {
        Self {
            queries: RwLock::new(BTreeMap::new()),
            collections: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Total membership entries across all queries.
    pub fn entry_count(&self) -> usize {
        self.collections
            .read()
            .expect("lock poisoned")
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Append a membership entry without the duplicate check.
    ///
    /// Used to seed an index from an existing dump.
    pub fn insert_unchecked(&self, query_key: &str, id: &str) -> IndexResult<()> {
        self.require_registered(query_key)?;
        let mut collections = self.collections.write().expect("lock poisoned");
        collections
            .entry(query_key.to_string())
            .or_default()
            .push(id.to_string());
        Ok(())
    }

    /// Disconnect the index. Subsequent calls fail with `Unavailable`.
    pub fn close(&self) {
        trace!("closing in-memory index store");
        self.closed.store(true, Ordering::SeqCst);
    }

    fn ensure_open(&self) -> IndexResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(IndexError::Unavailable(
                "a connection to the index store has not been established".into(),
            ));
        }
        Ok(())
    }

    /// The route `query_key` is bound to, or `UnknownQuery`.
    fn require_registered(&self, query_key: &str) -> IndexResult<String> {
        let queries = self.queries.read().expect("lock poisoned");
        queries
            .get(query_key)
            .map(NamedQuery::route)
            .ok_or_else(|| IndexError::UnknownQuery(query_key.to_string()))
    }

    /// Shared validation for `add` and `remove`.
    fn resolve(&self, query_key: &str, id: &str) -> IndexResult<String> {
        self.ensure_open()?;
        if id.is_empty() {
            trace!(query_key, "rejecting empty record id");
            return Err(IndexError::InvalidInput("record id is empty".into()));
        }
        self.require_registered(query_key)
    }
}

impl Default for InMemoryIndexStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexStore for InMemoryIndexStore {
    async fn register_query(
        &self,
        key: &str,
        namespace: &str,
        location: &str,
    ) -> IndexResult<()> {
        self.ensure_open()?;
        trace!(key, namespace, location, "registering query");
        let query = NamedQuery::new(key, namespace, location);
        if query.has_empty_field() {
            return Err(IndexError::InvalidInput(
                "the query is invalid and cannot be registered".into(),
            ));
        }
        let mut queries = self.queries.write().expect("lock poisoned");
        queries.insert(key.to_string(), query);
        Ok(())
    }

    async fn queries(&self) -> IndexResult<Vec<NamedQuery>> {
        self.ensure_open()?;
        let queries = self.queries.read().expect("lock poisoned");
        Ok(queries.values().cloned().collect())
    }

    async fn add(&self, query_key: &str, id: &str) -> IndexResult<()> {
        let route = self.resolve(query_key, id)?;
        trace!(query_key, id, %route, "indexing record id");

        let mut collections = self.collections.write().expect("lock poisoned");
        let members = collections.entry(query_key.to_string()).or_default();
        if members.iter().any(|m| m == id) {
            return Err(IndexError::AlreadyIndexed {
                query: query_key.to_string(),
                id: id.to_string(),
            });
        }
        members.push(id.to_string());
        Ok(())
    }

    async fn remove(&self, query_key: &str, id: &str) -> IndexResult<()> {
        let route = self.resolve(query_key, id)?;
        trace!(query_key, id, %route, "removing record id");

        let mut collections = self.collections.write().expect("lock poisoned");
        let Some(members) = collections.get_mut(query_key) else {
            return Ok(());
        };
        let count = members.iter().filter(|m| *m == id).count();
        if count > 1 {
            return Err(IndexError::NotUnique {
                query: query_key.to_string(),
                id: id.to_string(),
                count,
            });
        }
        members.retain(|m| m != id);
        Ok(())
    }

    async fn members(&self, query_key: &str) -> IndexResult<Vec<String>> {
        self.ensure_open()?;
        self.require_registered(query_key)?;
        let collections = self.collections.read().expect("lock poisoned");
        Ok(collections.get(query_key).cloned().unwrap_or_default())
    }
}

impl std::fmt::Debug for InMemoryIndexStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let query_count = self.queries.read().expect("lock poisoned").len();
        f.debug_struct("InMemoryIndexStore")
            .field("queries", &query_count)
            .field("entries", &self.entry_count())
            .finish()
    }
}
