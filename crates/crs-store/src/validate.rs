//! Write-time checks shared by every backend.

use crs_types::crc32;
use tracing::trace;

use crate::error::{StoreError, StoreResult};

/// Reject an empty record identifier.
pub fn require_id(id: &str) -> StoreResult<()> {
    if id.is_empty() {
        trace!("rejecting empty record id");
        return Err(StoreError::InvalidInput("record id is empty".into()));
    }
    Ok(())
}

/// Check a record about to be written.
///
/// The document id must be non-empty, the payload non-empty, and the
/// payload's CRC-32 equal to `declared`.
pub fn validate_payload(document_id: &str, declared: u32, payload: &[u8]) -> StoreResult<()> {
    if document_id.is_empty() {
        trace!("rejecting record with empty document id");
        return Err(StoreError::InvalidInput("document id is empty".into()));
    }
    if payload.is_empty() {
        trace!(document_id, "rejecting record with empty payload");
        return Err(StoreError::MalformedData(format!(
            "payload for document {document_id} is empty"
        )));
    }
    let computed = crc32(payload);
    if computed != declared {
        trace!(document_id, declared, computed, "payload failed its checksum check");
        return Err(StoreError::ChecksumMismatch {
            document_id: document_id.to_string(),
            declared,
            computed,
        });
    }
    Ok(())
}
