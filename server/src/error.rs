//! Error taxonomy at the HTTP boundary.
//!
//! Every failure leaves a handler as an `ApiError` and becomes a single
//! `{"error": "<message>"}` document with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::model::ErrorBody;
use crate::store::StoreError;

pub const TASK_REQUIRED: &str = "Task is required";
pub const INVALID_TODO_ID: &str = "Invalid todo ID";
pub const INVALID_TODO_PATH: &str = "Invalid URL. Use /todos/{id}";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input was understood but rejected (400).
    #[error("{0}")]
    Validation(&'static str),

    /// The body was not a JSON object of the expected shape (400).
    #[error("Invalid request body")]
    MalformedRequest,

    /// The body exceeded the request size limit (413).
    #[error("Request body too large")]
    BodyTooLarge,

    /// No todo with the requested id (404).
    #[error("Todo not found")]
    NotFound,

    /// No route for the request path (404).
    #[error("Not found")]
    UnknownRoute,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The backing store failed (500).
    #[error("Database error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedRequest => StatusCode::BAD_REQUEST,
            ApiError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound | ApiError::UnknownRoute => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => ApiError::Validation(msg),
            StoreError::Database(e) => ApiError::Storage(e.to_string()),
            StoreError::Write(msg) => ApiError::Storage(msg.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
