use crs_idgen::GeneratorError;
use crs_types::ErrorKind;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required argument was empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The payload is unusable (for example, empty).
    #[error("malformed data: {0}")]
    MalformedData(String),

    /// The payload does not match its declared checksum.
    #[error("checksum check failed for document {document_id}: declared {declared:#010x}, computed {computed:#010x}")]
    ChecksumMismatch {
        document_id: String,
        declared: u32,
        computed: u32,
    },

    /// More than one record carries the same identifier.
    #[error("record id is not unique: {id} matches {count} records")]
    NotUnique { id: String, count: usize },

    /// The storage backend cannot be reached.
    #[error("object store unavailable: {0}")]
    Unavailable(String),

    /// No identifier could be obtained for a new record.
    #[error("identifier generation failed: {0}")]
    Generator(#[from] GeneratorError),
}

impl StoreError {
    /// The failure kind this error maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::MalformedData(_) | Self::ChecksumMismatch { .. } => ErrorKind::MalformedData,
            Self::NotUnique { .. } => ErrorKind::IllegalState,
            Self::Unavailable(_) => ErrorKind::Unavailable,
            Self::Generator(e) => e.kind(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
