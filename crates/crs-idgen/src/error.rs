//! Error types for the identifier generator and its cache.

use crs_types::ErrorKind;

/// Errors from cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The cache could not be reached.
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

impl CacheError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Unavailable
    }
}

/// Convenience alias for cache results.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors from identifier generation.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Every probe either collided or could not reach the cache.
    #[error("no unused identifier found after {attempts} attempts")]
    Exhausted { attempts: u32 },

    /// The generator configuration failed validation.
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
}

impl GeneratorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Exhausted { .. } => ErrorKind::Unavailable,
            Self::InvalidConfig(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Convenience alias for generator results.
pub type GeneratorResult<T> = Result<T, GeneratorError>;
