//! API error types mapped to HTTP status codes.
//!
//! Every variant renders as `{"detail": "message"}`, the shape the web
//! client reads.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use faqdesk_core::FaqDeskError;
use faqdesk_search::SearchError;

#[derive(Debug)]
pub enum ApiError {
    /// Duplicate slug or malformed request (400).
    BadRequest(String),
    /// Resource not found (404).
    NotFound(String),
    /// Missing or out-of-range parameter (422).
    Unprocessable(String),
    /// Unexpected server error (500).
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(m)
            | ApiError::NotFound(m)
            | ApiError::Unprocessable(m)
            | ApiError::Internal(m) => m,
        };
        (status, Json(serde_json::json!({ "detail": message }))).into_response()
    }
}

impl From<FaqDeskError> for ApiError {
    fn from(e: FaqDeskError) -> Self {
        match e {
            FaqDeskError::Validation(m) => ApiError::Unprocessable(m),
            FaqDeskError::NotFound(m) => ApiError::NotFound(m),
            FaqDeskError::Conflict(m) => ApiError::BadRequest(m),
            FaqDeskError::Search(e) => e.into(),
            other => {
                tracing::error!("Request failed: {other}");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidTopN(_) | SearchError::InvalidThreshold(_) => {
                ApiError::Unprocessable(e.to_string())
            }
            // Dimension problems come from server config, not the request
            SearchError::InvalidDimension(_) | SearchError::VectorLengthMismatch { .. } => {
                tracing::error!("Search failed: {e}");
                ApiError::Internal(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Unprocessable(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}
