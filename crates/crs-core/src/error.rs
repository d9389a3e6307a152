use crs_index::IndexError;
use crs_store::StoreError;
use crs_types::ErrorKind;

/// Errors surfaced by the coordinator.
///
/// Backend failures are carried through unchanged so callers can still
/// inspect them; [`kind`](CoordinatorError::kind) gives the taxonomy kind.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    /// A required request field was empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The object store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The index store rejected or failed the operation.
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl CoordinatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Store(e) => e.kind(),
            Self::Index(e) => e.kind(),
        }
    }
}

pub type CoordinatorResult<T> = Result<T, CoordinatorError>;
