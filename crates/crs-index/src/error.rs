//! Error types for the index crate.

use crs_types::ErrorKind;

/// Errors that can occur during index operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// A required argument was empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The query key was never registered.
    #[error("the {0} query was not found or is invalid")]
    UnknownQuery(String),

    /// The identifier is already a member of the query.
    #[error("record id {id} is already indexed under {query}")]
    AlreadyIndexed { query: String, id: String },

    /// More than one membership entry exists for the identifier.
    #[error("record id {id} is not unique under {query}: {count} entries")]
    NotUnique {
        query: String,
        id: String,
        count: usize,
    },

    /// The index backend cannot be reached.
    #[error("index store unavailable: {0}")]
    Unavailable(String),
}

impl IndexError {
    /// The failure kind this error maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::UnknownQuery(_) => ErrorKind::UnknownQuery,
            Self::AlreadyIndexed { .. } | Self::NotUnique { .. } => ErrorKind::IllegalState,
            Self::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
