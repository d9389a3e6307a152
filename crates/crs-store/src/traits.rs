use async_trait::async_trait;
use crs_types::Record;

use crate::error::StoreResult;

/// Checksum-validated record store.
///
/// All implementations must satisfy these invariants:
/// - `store` rejects an empty document id (`InvalidInput`), an empty payload
///   or a payload whose CRC-32 differs from the declared checksum
///   (`MalformedData`) before anything is persisted.
/// - Identifiers come from an [`IdGenerator`](crs_idgen::IdGenerator), never
///   from the caller.
/// - `get` and `delete` treat two or more records under one identifier as an
///   illegal state.
/// - Connection failures are reported as `Unavailable`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Validate and persist a record, returning its new identifier.
    async fn store(&self, document_id: &str, checksum: u32, payload: Vec<u8>)
        -> StoreResult<String>;

    /// Read a record by identifier.
    ///
    /// Returns `Ok(None)` if no record has this identifier.
    async fn get(&self, id: &str) -> StoreResult<Option<Record>>;

    /// Delete the record with this identifier, if there is one.
    ///
    /// Deleting an identifier that does not exist succeeds.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Check whether at least one record has this identifier.
    ///
    /// No multiplicity check is made.
    async fn exists(&self, id: &str) -> StoreResult<bool>;
}
