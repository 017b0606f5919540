//! # REST API Errors
//!
//! Every failure leaving the API is rendered as an error envelope. Faults
//! are logged here with their detail and reported to the client generically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use super::envelope::Envelope;
use crate::store::StoreError;
use crate::workout::ValidationError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body is not a JSON object
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Create payload lacks one of the required fields
    #[error("Exercise name, duration, calories burned, and workout date are required")]
    MissingFields,

    /// Field constraint violated
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Workout id unknown or malformed
    #[error("Workout not found")]
    NotFound,

    /// No route matches the request
    #[error("Route not found")]
    RouteNotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Unexpected failure; the detail is logged, never sent
    #[error("Internal server error")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::InvalidBody(_) | RestError::MissingFields | RestError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            RestError::NotFound | RestError::RouteNotFound => StatusCode::NOT_FOUND,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => RestError::Validation(e),
            StoreError::NotFound(_) => RestError::NotFound,
            fault => RestError::Internal(fault.to_string()),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if let RestError::Internal(ref detail) = self {
            error!(error = %detail, "request failed");
        }

        let status = self.status_code();
        let body = Json(Envelope::<()>::error(self.to_string()));
        (status, body).into_response()
    }
}
