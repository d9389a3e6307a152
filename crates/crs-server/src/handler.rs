use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use crs_core::{CoordinatorError, Stored};
use crs_types::ErrorKind;
use tracing::{debug, warn};

use crate::message::{
    DeleteResponse, ErrorBody, HealthResponse, IdRequest, RecordResponse, StoreRequest,
};
use crate::state::AppState;

/// A failure rendered as `{kind, message}` with a status derived from the kind.
#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.kind)
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput | ErrorKind::MalformedData | ErrorKind::UnknownQuery => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::IllegalState => StatusCode::CONFLICT,
        ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl From<CoordinatorError> for ApiError {
    fn from(err: CoordinatorError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(ErrorKind::InvalidInput, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(kind = %self.kind, message = %self.message, "request failed");
        } else {
            debug!(kind = %self.kind, message = %self.message, "request rejected");
        }
        let body = ErrorBody {
            kind: self.kind,
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `POST /rest/store`: persist a payload and index it under a named query.
pub async fn store_handler(
    State(state): State<AppState>,
    body: Result<Json<StoreRequest>, JsonRejection>,
) -> Result<Json<Stored>, ApiError> {
    let Json(req) = body?;
    let payload = req.decode_payload().map_err(|e| {
        ApiError::new(
            ErrorKind::MalformedData,
            format!("payload for document {} is not valid hex: {e}", req.document_id),
        )
    })?;
    let stored = state
        .coordinator()
        .store_and_index(&req.document_id, req.checksum, payload, &req.query_key)
        .await?;
    Ok(Json(stored))
}

/// `POST /rest/get`
pub async fn get_handler(
    State(state): State<AppState>,
    body: Result<Json<IdRequest>, JsonRejection>,
) -> Result<Json<RecordResponse>, ApiError> {
    let Json(req) = body?;
    match state.coordinator().get(&req.id).await? {
        Some(record) => Ok(Json(record.into())),
        None => Err(ApiError::new(
            ErrorKind::NotFound,
            format!("no record with id {}", req.id),
        )),
    }
}

/// `POST /rest/delete`: remove the record and every index entry for it.
pub async fn delete_handler(
    State(state): State<AppState>,
    body: Result<Json<IdRequest>, JsonRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Json(req) = body?;
    state.coordinator().delete_everywhere(&req.id).await?;
    Ok(Json(DeleteResponse { id: req.id }))
}
