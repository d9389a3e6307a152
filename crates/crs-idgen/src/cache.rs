use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use crs_types::CacheProbe;
use tracing::trace;

use crate::error::{CacheError, CacheResult};

/// TTL-bounded key/value cache.
///
/// The generator uses it to remember recently issued identifiers. Any backend
/// with expiring keys (a networked key/value server, a local map) fits.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Associate `value` with `key` for `ttl_secs` seconds.
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> CacheResult<()>;

    /// Returns `true` if `key` is present and has not expired.
    ///
    /// Returns `Err` when the cache cannot be reached.
    async fn exists(&self, key: &str) -> CacheResult<bool>;
}

/// Longest TTL honoured; larger values are clamped so expiry stays representable.
const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

struct CachedProbe {
    probe: CacheProbe,
    expires_at: Instant,
}

impl CachedProbe {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory, HashMap-based cache.
///
/// Expired entries are dropped lazily on lookup and by [`purge_expired`].
/// After [`close`] every call fails with [`CacheError::Unavailable`], which is
/// how a dropped connection looks to callers.
///
/// [`purge_expired`]: InMemoryCache::purge_expired
/// [`close`]: InMemoryCache::close
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CachedProbe>>,
    closed: AtomicBool,
}

impl InMemoryCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Number of entries held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// The live value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let map = self.entries.read().expect("lock poisoned");
        map.get(key)
            .filter(|cached| cached.is_live(now))
            .map(|cached| cached.probe.value.clone())
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut map = self.entries.write().expect("lock poisoned");
        let before = map.len();
        map.retain(|_, cached| cached.is_live(now));
        before - map.len()
    }

    /// Disconnect the cache. Subsequent calls fail with `Unavailable`.
    pub fn close(&self) {
        trace!("closing in-memory cache");
        self.closed.store(true, Ordering::SeqCst);
    }

    fn ensure_open(&self) -> CacheResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable(
                "a connection to the cache has not been established".into(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> CacheResult<()> {
        self.ensure_open()?;
        trace!(key, ttl_secs, "caching value");
        let cached = CachedProbe {
            probe: CacheProbe::new(key, value, ttl_secs),
            expires_at: Instant::now() + Duration::from_secs(ttl_secs.min(MAX_TTL_SECS)),
        };
        let mut map = self.entries.write().expect("lock poisoned");
        map.insert(key.to_string(), cached);
        Ok(())
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        self.ensure_open()?;
        let now = Instant::now();
        let mut map = self.entries.write().expect("lock poisoned");
        match map.get(key) {
            Some(cached) if cached.is_live(now) => Ok(true),
            Some(_) => {
                map.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

impl std::fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("entry_count", &self.len())
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_exists() {
        let cache = InMemoryCache::new();
        assert!(!cache.exists("k").await.unwrap());
        cache.set("k", "v", 60).await.unwrap();
        assert!(cache.exists("k").await.unwrap());
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn zero_ttl_expires_immediately() {
        let cache = InMemoryCache::new();
        cache.set("k", "v", 0).await.unwrap();
        assert!(cache.get("k").is_none());
        assert!(!cache.exists("k").await.unwrap());
        // The lookup dropped the expired entry.
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn purge_removes_only_expired() {
        let cache = InMemoryCache::new();
        cache.set("old", "v", 0).await.unwrap();
        cache.set("fresh", "v", 60).await.unwrap();
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.exists("fresh").await.unwrap());
    }

    #[tokio::test]
    async fn set_overwrites_value() {
        let cache = InMemoryCache::new();
        cache.set("k", "one", 60).await.unwrap();
        cache.set("k", "two", 60).await.unwrap();
        assert_eq!(cache.get("k").as_deref(), Some("two"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn closed_cache_is_unavailable() {
        let cache = InMemoryCache::new();
        cache.close();
        let err = cache.exists("k").await.unwrap_err();
        assert!(matches!(err, CacheError::Unavailable(_)));
        assert_eq!(err.kind(), crs_types::ErrorKind::Unavailable);
        assert!(cache.set("k", "v", 60).await.is_err());
    }

    #[test]
    fn debug_format() {
        let cache = InMemoryCache::default();
        let debug = format!("{cache:?}");
        assert!(debug.contains("InMemoryCache"));
        assert!(debug.contains("entry_count"));
    }
}
