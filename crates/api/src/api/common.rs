// Common DTOs and errors for the public API
//
// Error bodies always carry a `message` key: either a plain string or an
// object mapping the offending field to a human-readable explanation.

use crate::storage::StorageError;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned for unknown event ids.
pub const EVENT_NOT_FOUND_MESSAGE: &str = "The event doesn't exist!";

/// Message returned when the store fails. Details stay in the server log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body of an error message: a sentence, or per-field sentences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    Fields(BTreeMap<String, String>),
}

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message, or an object keyed by the invalid field.
    #[schema(value_type = Object, example = json!({"date": "The event date with the correct format is required! The correct format is YYYY-MM-DD!"}))]
    pub message: ErrorMessage,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: ErrorMessage::Text(message.into()),
        }
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        Self {
            message: ErrorMessage::Fields(fields),
        }
    }
}

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "The event has been deleted!")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or malformed
    #[error("invalid field '{field}': {message}")]
    Validation {
        field: &'static str,
        message: Cow<'static, str>,
    },

    /// The request body could not be read at all
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No event with the requested id
    #[error("event not found")]
    NotFound,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation { field, message } => {
                tracing::debug!(field, "Rejected request: {}", message);
                ErrorResponse::field(field, message)
            }
            ApiError::BadRequest(message) => {
                tracing::debug!("Rejected request: {}", message);
                ErrorResponse::new(message)
            }
            ApiError::NotFound => ErrorResponse::new(EVENT_NOT_FOUND_MESSAGE),
            ApiError::Storage(e) => {
                tracing::error!("Storage operation failed: {}", e);
                ErrorResponse::new(INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(body)).into_response()
    }
}
