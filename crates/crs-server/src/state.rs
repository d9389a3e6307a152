use std::sync::Arc;

use crs_core::Coordinator;
use crs_idgen::{CacheBackedIdGenerator, InMemoryCache};
use crs_index::{IndexStore, InMemoryIndexStore};
use crs_store::InMemoryObjectStore;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared state handed to every request handler.
///
/// Keeps its own handles to the concrete backends so they can be closed
/// once the server stops.
#[derive(Clone)]
pub struct AppState {
    coordinator: Arc<Coordinator>,
    cache: Arc<InMemoryCache>,
    objects: Arc<InMemoryObjectStore>,
    index: Arc<InMemoryIndexStore>,
}

impl AppState {
    /// Wire the in-memory backends and register the configured named queries.
    pub async fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        let cache = Arc::new(InMemoryCache::new());
        let generator = CacheBackedIdGenerator::new(cache.clone(), config.generator.clone())
            .map_err(|e| ServerError::Config(e.to_string()))?;
        let objects = Arc::new(InMemoryObjectStore::new(Arc::new(generator)));

        let index = Arc::new(InMemoryIndexStore::new());
        for query in &config.queries {
            index
                .register_query(&query.key, &query.namespace, &query.location)
                .await?;
            info!(query = %query, "registered named query");
        }

        let coordinator = Arc::new(Coordinator::new(objects.clone(), index.clone()));
        Ok(Self {
            coordinator,
            cache,
            objects,
            index,
        })
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Disconnect the cache, the object store and the index store.
    pub fn close(&self) {
        info!("closing backends");
        self.cache.close();
        self.objects.close();
        self.index.close();
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cache", &self.cache)
            .field("objects", &self.objects)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crs_idgen::Cache;
    use crs_types::{ErrorKind, NamedQuery};

    #[tokio::test]
    async fn registers_configured_queries() {
        let mut config = ServerConfig::default();
        config.queries.push(NamedQuery::new("archive", "cold", "archive"));
        let state = AppState::from_config(&config).await.unwrap();

        let keys: Vec<String> = state
            .coordinator()
            .index()
            .queries()
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.key)
            .collect();
        assert_eq!(keys, vec!["archive", "preprocessor"]);
    }

    #[tokio::test]
    async fn invalid_generator_config_is_rejected() {
        let mut config = ServerConfig::default();
        config.generator.max_attempts = 0;
        let err = AppState::from_config(&config).await.unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[tokio::test]
    async fn rejected_registration_is_an_index_error() {
        let mut config = ServerConfig::default();
        config.queries.push(NamedQuery::new("broken", "", "nowhere"));
        let err = AppState::from_config(&config).await.unwrap_err();
        assert!(matches!(err, ServerError::Index(_)));
        assert!(err.to_string().starts_with("index error"));
    }

    #[tokio::test]
    async fn close_makes_every_backend_unavailable() {
        let state = AppState::from_config(&ServerConfig::default()).await.unwrap();
        state.close();

        let err = state.coordinator().get("some-id").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        let err = state.coordinator().index().queries().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(state.cache.exists("anything").await.is_err());
    }
}
