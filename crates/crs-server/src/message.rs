//! Request and response bodies for the REST endpoints.
//!
//! Payloads travel as lowercase hex strings.

use crs_types::{ErrorKind, Record};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRequest {
    pub document_id: String,
    pub checksum: u32,
    pub payload: String,
    pub query_key: String,
}

impl StoreRequest {
    pub fn decode_payload(&self) -> Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.payload)
    }
}

/// Body of `get` and `delete`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub id: String,
    pub document_id: String,
    pub checksum: u32,
    pub payload: String,
}

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self {
            payload: hex::encode(&record.payload),
            id: record.id,
            document_id: record.document_id,
            checksum: record.checksum,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_request_field_names() {
        let req: StoreRequest = serde_json::from_str(
            r#"{"documentId":"d","checksum":7,"payload":"74657374","queryKey":"q"}"#,
        )
        .unwrap();
        assert_eq!(req.document_id, "d");
        assert_eq!(req.query_key, "q");
        assert_eq!(req.decode_payload().unwrap(), b"test");
    }

    #[test]
    fn bad_hex_fails_to_decode() {
        let req = StoreRequest {
            document_id: "d".into(),
            checksum: 0,
            payload: "zz".into(),
            query_key: "q".into(),
        };
        assert!(req.decode_payload().is_err());
    }

    #[test]
    fn record_response_hex_encodes() {
        let resp = RecordResponse::from(Record::new("id", "doc", 1, vec![0xde, 0xad]));
        assert_eq!(resp.payload, "dead");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["documentId"], "doc");
    }
}
