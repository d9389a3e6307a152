use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::cache::Cache;
use crate::error::{GeneratorError, GeneratorResult};
use crate::source::{Clock, RandomTokenSource, SystemClock, TokenSource};

/// Produces record identifiers.
///
/// The returned identifier is statistically unique only, bounded by the
/// cache's retention window. Consumers must still reject true duplicates.
#[async_trait]
pub trait IdGenerator: Send + Sync {
    async fn generate(&self) -> GeneratorResult<String>;
}

/// Configuration for [`CacheBackedIdGenerator`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Separator between the timestamp, token and integer components.
    pub delimiter: String,
    /// How long an issued identifier stays in the cache, in seconds.
    pub ttl_secs: u64,
    /// Probe attempts before giving up.
    pub max_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            delimiter: "_".into(),
            ttl_secs: 3600,
            max_attempts: 32,
        }
    }
}

impl GeneratorConfig {
    /// Check that every field is usable.
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.delimiter.is_empty() {
            return Err(GeneratorError::InvalidConfig("delimiter is empty".into()));
        }
        if self.ttl_secs == 0 {
            return Err(GeneratorError::InvalidConfig("ttl_secs must be positive".into()));
        }
        if self.max_attempts == 0 {
            return Err(GeneratorError::InvalidConfig(
                "max_attempts must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Identifier generator that registers every issued identifier in a cache.
///
/// Candidates have the shape `{millis}{delim}{token}{delim}{int}`. A candidate
/// the cache already knows is discarded and all three components are
/// re-sampled. A probe that fails because the cache is unreachable is treated
/// the same way and never surfaced.
pub struct CacheBackedIdGenerator {
    cache: Arc<dyn Cache>,
    config: GeneratorConfig,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenSource>,
}

impl CacheBackedIdGenerator {
    /// Create a generator using the system clock and random UUID tokens.
    pub fn new(cache: Arc<dyn Cache>, config: GeneratorConfig) -> GeneratorResult<Self> {
        Self::with_sources(
            cache,
            config,
            Arc::new(SystemClock),
            Arc::new(RandomTokenSource),
        )
    }

    /// Create a generator with explicit clock and token sources.
    pub fn with_sources(
        cache: Arc<dyn Cache>,
        config: GeneratorConfig,
        clock: Arc<dyn Clock>,
        tokens: Arc<dyn TokenSource>,
    ) -> GeneratorResult<Self> {
        config.validate()?;
        Ok(Self {
            cache,
            config,
            clock,
            tokens,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Sample a fresh candidate. The integer comes from a PRNG re-seeded with
    /// the current millisecond timestamp.
    fn candidate(&self) -> String {
        let millis = self.clock.now_millis();
        let token = self.tokens.next_token();
        let mut rng = StdRng::seed_from_u64(self.clock.now_millis() as u64);
        let salt: i32 = rng.gen();
        let d = &self.config.delimiter;
        format!("{millis}{d}{token}{d}{salt}")
    }
}

#[async_trait]
impl IdGenerator for CacheBackedIdGenerator {
    async fn generate(&self) -> GeneratorResult<String> {
        for attempt in 1..=self.config.max_attempts {
            let candidate = self.candidate();
            match self.cache.exists(&candidate).await {
                Ok(false) => {
                    if let Err(e) = self
                        .cache
                        .set(&candidate, &candidate, self.config.ttl_secs)
                        .await
                    {
                        warn!(id = %candidate, error = %e, "failed to register identifier in cache");
                    }
                    trace!(id = %candidate, attempt, "generated identifier");
                    return Ok(candidate);
                }
                Ok(true) => {
                    trace!(id = %candidate, attempt, "identifier already issued, regenerating");
                }
                Err(e) => {
                    debug!(attempt, error = %e, "cache probe failed, regenerating");
                }
            }
        }
        Err(GeneratorError::Exhausted {
            attempts: self.config.max_attempts,
        })
    }
}

impl std::fmt::Debug for CacheBackedIdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheBackedIdGenerator")
            .field("config", &self.config)
            .finish()
    }
}
