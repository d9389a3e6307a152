use serde::{Deserialize, Serialize};

/// A transient cache entry used to narrow identifier collisions.
///
/// Owned by the cache. After `ttl_secs` the key may be reused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheProbe {
    pub key: String,
    pub value: String,
    pub ttl_secs: u64,
}

impl CacheProbe {
    pub fn new(key: impl Into<String>, value: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ttl_secs,
        }
    }
}
