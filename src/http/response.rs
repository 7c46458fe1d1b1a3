//! Response bodies and error-to-status mapping.
//!
//! Every error response is a JSON object with a single `error` string. Store
//! failures carry only the operation verb so driver detail never reaches the
//! client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::users::Operation;

/// Errors returned from user handlers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Request body could not be decoded.
    #[error("{0}")]
    InvalidInput(String),

    /// Request body exceeds the configured size limit.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Path identifier is not a valid user id.
    #[error("Invalid user ID")]
    InvalidId,

    /// Valid identifier, no such user.
    #[error("User not found")]
    NotFound,

    /// The store failed while performing the operation.
    #[error("Failed to {} user", .0.verb())]
    Store(Operation),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) | ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// `{"error": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}
