use serde::{Deserialize, Serialize};

/// Compute the CRC-32 (IEEE) checksum of a payload.
///
/// This is the checksum clients declare when storing a record.
pub fn crc32(payload: &[u8]) -> u32 {
    crc32fast::hash(payload)
}

/// A stored binary record.
///
/// The field names are the persisted layout: any backend must round-trip
/// `id`, `documentId`, `checksum` and `payload` exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// System-assigned identifier. Never supplied by the client on create.
    pub id: String,
    /// Caller-supplied identifier of the source document.
    pub document_id: String,
    /// CRC-32 of `payload`, validated when the record was written.
    pub checksum: u32,
    /// Opaque record contents.
    pub payload: Vec<u8>,
}

impl Record {
    /// Create a record from its parts.
    pub fn new(
        id: impl Into<String>,
        document_id: impl Into<String>,
        checksum: u32,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            document_id: document_id.into(),
            checksum,
            payload,
        }
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> u64 {
        self.payload.len() as u64
    }
}
