use crate::services::tag_sync::TagSyncError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use derive_more::derive::Display;
use serde::Serialize;

/// Everything a handler can fail with. Nothing past the handler boundary
/// sees a panic; all of these become an error response.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display("no {entity} with id {id} exists")]
    NotFound { entity: &'static str, id: i64 },

    #[display("{_0}")]
    BadRequest(String),

    #[display("storage error: {_0}")]
    Storage(anyhow::Error),

    #[display("{_0}")]
    PartialReconciliation(TagSyncError),
}

impl ApiError {
    // machine-readable kind, alongside the human-readable message
    fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Storage(_) => "storage",
            ApiError::PartialReconciliation(_) => "partial_reconciliation",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PartialReconciliation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(err)
    }
}

impl From<TagSyncError> for ApiError {
    fn from(err: TagSyncError) -> Self {
        match err {
            // nothing was applied, so this is an ordinary storage failure
            TagSyncError::Storage(e) => ApiError::Storage(e),
            partial => ApiError::PartialReconciliation(partial),
        }
    }
}
