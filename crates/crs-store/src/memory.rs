use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use crs_idgen::IdGenerator;
use crs_types::Record;
use tracing::trace;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;
use crate::validate::{require_id, validate_payload};

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. Records are grouped by identifier in a
/// `Vec` so that a duplicated identifier is representable and detectable, the
/// same way a document collection without a unique index would hold it.
/// All state sits behind a `RwLock`; records are cloned on read.
pub struct InMemoryObjectStore {
    generator: Arc<dyn IdGenerator>,
    records: RwLock<HashMap<String, Vec<Record>>>,
    closed: AtomicBool,
}

impl InMemoryObjectStore {
    /// Create a new empty store that draws identifiers from `generator`.
    pub fn new(generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            generator,
            records: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .expect("lock poisoned")
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total payload bytes across all stored records.
    pub fn total_bytes(&self) -> u64 {
        self.records
            .read()
            .expect("lock poisoned")
            .values()
            .flatten()
            .map(Record::size)
            .sum()
    }

    /// Append a record as-is, bypassing validation and identifier generation.
    ///
    /// Used to seed a store from an existing dump. Nothing stops the seeded
    /// identifier from colliding with one already present.
    pub fn insert_unchecked(&self, record: Record) {
        let mut map = self.records.write().expect("lock poisoned");
        map.entry(record.id.clone()).or_default().push(record);
    }

    /// Disconnect the store. Subsequent calls fail with `Unavailable`.
    pub fn close(&self) {
        trace!("closing in-memory object store");
        self.closed.store(true, Ordering::SeqCst);
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "a connection to the object store has not been established".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn store(
        &self,
        document_id: &str,
        checksum: u32,
        payload: Vec<u8>,
    ) -> StoreResult<String> {
        validate_payload(document_id, checksum, &payload)?;
        self.ensure_open()?;

        let id = self.generator.generate().await?;
        trace!(%id, document_id, size = payload.len(), "storing record");

        let record = Record::new(id.clone(), document_id, checksum, payload);
        let mut map = self.records.write().expect("lock poisoned");
        map.entry(id.clone()).or_default().push(record);
        Ok(id)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Record>> {
        require_id(id)?;
        self.ensure_open()?;
        trace!(id, "getting record");

        let map = self.records.read().expect("lock poisoned");
        match map.get(id).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([record]) => Ok(Some(record.clone())),
            Some(many) => Err(StoreError::NotUnique {
                id: id.to_string(),
                count: many.len(),
            }),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        require_id(id)?;
        self.ensure_open()?;
        trace!(id, "deleting record");

        let mut map = self.records.write().expect("lock poisoned");
        let count = map.get(id).map_or(0, Vec::len);
        if count > 1 {
            trace!(id, count, "refusing to delete a non-unique record id");
            return Err(StoreError::NotUnique {
                id: id.to_string(),
                count,
            });
        }
        map.remove(id);
        Ok(())
    }

    async fn exists(&self, id: &str) -> StoreResult<bool> {
        require_id(id)?;
        self.ensure_open()?;
        let map = self.records.read().expect("lock poisoned");
        Ok(map.get(id).is_some_and(|records| !records.is_empty()))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("record_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crs_idgen::{CacheBackedIdGenerator, GeneratorConfig, GeneratorResult, InMemoryCache};
    use crs_types::{crc32, ErrorKind};
    use proptest::prelude::*;
    use std::sync::atomic::AtomicU64;

    fn make_store() -> InMemoryObjectStore {
        let cache = Arc::new(InMemoryCache::new());
        let generator = CacheBackedIdGenerator::new(cache, GeneratorConfig::default()).unwrap();
        InMemoryObjectStore::new(Arc::new(generator))
    }

    /// Hands out the same identifier every time.
    struct ConstantIds(&'static str);

    #[async_trait]
    impl IdGenerator for ConstantIds {
        async fn generate(&self) -> GeneratorResult<String> {
            Ok(self.0.to_string())
        }
    }

    /// Counts how many identifiers were requested.
    struct CountingIds(AtomicU64);

    #[async_trait]
    impl IdGenerator for CountingIds {
        async fn generate(&self) -> GeneratorResult<String> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            Ok(format!("id-{n}"))
        }
    }

    // -----------------------------------------------------------------------
    // Core CRUD
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn store_and_get() {
        let store = make_store();
        let id = store
            .store("docId", crc32(b"test"), b"test".to_vec())
            .await
            .unwrap();
        assert!(!id.is_empty());

        let record = store.get(&id).await.unwrap().expect("should exist");
        assert_eq!(record.id, id);
        assert_eq!(record.document_id, "docId");
        assert_eq!(record.checksum, crc32(b"test"));
        assert_eq!(record.payload, b"test");
    }

    #[tokio::test]
    async fn each_store_gets_a_fresh_id() {
        let store = make_store();
        let a = store.store("doc", crc32(b"same"), b"same".to_vec()).await.unwrap();
        let b = store.store("doc", crc32(b"same"), b"same".to_vec()).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = make_store();
        assert!(store.get("never-stored").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_present_then_missing() {
        let store = make_store();
        let id = store.store("doc", crc32(b"bye"), b"bye".to_vec()).await.unwrap();
        assert!(store.exists(&id).await.unwrap());
        store.delete(&id).await.unwrap();
        assert!(!store.exists(&id).await.unwrap());
        assert!(store.get(&id).await.unwrap().is_none());
        // Delete-if-exists.
        store.delete(&id).await.unwrap();
    }

    #[tokio::test]
    async fn delete_only_touches_matching_id() {
        let store = make_store();
        let keep = store.store("doc", crc32(b"a"), b"a".to_vec()).await.unwrap();
        let gone = store.store("doc", crc32(b"b"), b"b".to_vec()).await.unwrap();
        store.delete(&gone).await.unwrap();
        assert!(store.get(&keep).await.unwrap().is_some());
        assert_eq!(store.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Write-time validation
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn rejected_writes_do_not_consume_ids() {
        let generator = Arc::new(CountingIds(AtomicU64::new(0)));
        let store = InMemoryObjectStore::new(generator.clone());

        let err = store.store("", crc32(b"x"), b"x".to_vec()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err = store.store("doc", 0, Vec::new()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        let err = store.store("doc", crc32(b"x") ^ 1, b"x".to_vec()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);

        assert_eq!(generator.0.load(Ordering::SeqCst), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn empty_id_is_invalid_input() {
        let store = make_store();
        assert_eq!(store.get("").await.unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(store.delete("").await.unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(store.exists("").await.unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn exhausted_generator_is_unavailable() {
        let cache = Arc::new(InMemoryCache::new());
        cache.close();
        let config = GeneratorConfig {
            max_attempts: 2,
            ..GeneratorConfig::default()
        };
        let generator = CacheBackedIdGenerator::new(cache, config).unwrap();
        let store = InMemoryObjectStore::new(Arc::new(generator));
        let err = store.store("doc", crc32(b"x"), b"x".to_vec()).await.unwrap_err();
        assert!(matches!(err, StoreError::Generator(_)));
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(store.is_empty());
    }

    // -----------------------------------------------------------------------
    // Multiplicity invariant
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn colliding_ids_are_stored_then_detected() {
        let store = InMemoryObjectStore::new(Arc::new(ConstantIds("dup")));
        store.store("a", crc32(b"1"), b"1".to_vec()).await.unwrap();
        store.store("b", crc32(b"2"), b"2".to_vec()).await.unwrap();
        assert_eq!(store.len(), 2);

        let err = store.get("dup").await.unwrap_err();
        assert!(matches!(err, StoreError::NotUnique { count: 2, .. }));
        assert_eq!(err.kind(), ErrorKind::IllegalState);

        let err = store.delete("dup").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalState);
        // Nothing was removed.
        assert_eq!(store.len(), 2);
        // Presence check does not enforce multiplicity.
        assert!(store.exists("dup").await.unwrap());
    }

    #[tokio::test]
    async fn seeded_records_are_readable() {
        let store = make_store();
        let record = Record::new("seeded", "doc", crc32(b"s"), b"s".to_vec());
        store.insert_unchecked(record.clone());
        assert_eq!(store.get("seeded").await.unwrap(), Some(record));
    }

    // -----------------------------------------------------------------------
    // Availability
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn closed_store_is_unavailable() {
        let store = make_store();
        let id = store.store("doc", crc32(b"x"), b"x".to_vec()).await.unwrap();
        store.close();
        assert_eq!(store.get(&id).await.unwrap_err().kind(), ErrorKind::Unavailable);
        assert_eq!(store.delete(&id).await.unwrap_err().kind(), ErrorKind::Unavailable);
        assert_eq!(store.exists(&id).await.unwrap_err().kind(), ErrorKind::Unavailable);
        let err = store.store("doc", crc32(b"y"), b"y".to_vec()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    // -----------------------------------------------------------------------
    // Utility methods
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn total_bytes() {
        let store = make_store();
        store.store("d", crc32(b"12345"), b"12345".to_vec()).await.unwrap();
        store.store("d", crc32(b"123456789"), b"123456789".to_vec()).await.unwrap();
        assert_eq!(store.total_bytes(), 14);
    }

    #[tokio::test]
    async fn concurrent_stores_are_safe() {
        let store = Arc::new(make_store());
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let payload = vec![i; 16];
                    store.store("doc", crc32(&payload), payload).await.unwrap()
                })
            })
            .collect();

        for h in handles {
            let id = h.await.expect("task should not panic");
            assert!(store.get(&id).await.unwrap().is_some());
        }
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn debug_format() {
        let store = make_store();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryObjectStore"));
        assert!(debug.contains("record_count"));
    }

    // -----------------------------------------------------------------------
    // Checksum property
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn store_accepts_exactly_the_matching_checksum(
            payload in proptest::collection::vec(any::<u8>(), 1..512),
            mask in 1u32..,
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let (fetched, rejected) = rt.block_on(async {
                let store = make_store();
                let id = store
                    .store("doc", crc32(&payload), payload.clone())
                    .await
                    .unwrap();
                let fetched = store.get(&id).await.unwrap();
                let rejected = store
                    .store("doc", crc32(&payload) ^ mask, payload.clone())
                    .await
                    .unwrap_err();
                (fetched, rejected)
            });

            let record = fetched.expect("stored record");
            prop_assert_eq!(&record.payload, &payload);
            prop_assert_eq!(record.checksum, crc32(&payload));
            prop_assert_eq!(rejected.kind(), ErrorKind::MalformedData);
        }
    }
}
