use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crs_idgen::GeneratorConfig;
use crs_types::NamedQuery;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Named queries registered into the index store at startup.
    pub queries: Vec<NamedQuery>,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            request_timeout_ms: default_request_timeout_ms(),
            generator: GeneratorConfig::default(),
            queries: vec![NamedQuery::new("preprocessor", "crs", "preprocessor_queue")],
        }
    }
}

impl ServerConfig {
    /// Read and validate a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ServerResult<()> {
        if self.request_timeout_ms == 0 {
            return Err(ServerError::Config("request_timeout_ms must be positive".into()));
        }
        self.generator
            .validate()
            .map_err(|e| ServerError::Config(format!("generator: {e}")))?;

        if self.queries.is_empty() {
            return Err(ServerError::Config("at least one named query is required".into()));
        }
        let mut seen = HashSet::new();
        for query in &self.queries {
            if query.has_empty_field() {
                return Err(ServerError::Config(format!(
                    "named query has an empty field: {query}"
                )));
            }
            if !seen.insert(query.key.as_str()) {
                return Err(ServerError::Config(format!(
                    "duplicate named query key: {}",
                    query.key
                )));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
