//! API error type shared by the service and route layers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::database::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Already registered user")]
    DuplicateEmail,

    /// Covers both "meal does not exist" and "meal belongs to someone else".
    /// The two cases are indistinguishable on purpose so meal identifiers
    /// cannot be probed by non-owners.
    #[error("Meal not found")]
    NotFound,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // The only unique key in the schema is users.email
            StoreError::DuplicateKey => ApiError::DuplicateEmail,
            StoreError::Other(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                json!({ "message": self.to_string() }),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, json!({ "error": self.to_string() }))
            }
            ApiError::Validation(reason) => (StatusCode::BAD_REQUEST, json!({ "error": reason })),
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:#}", e);
                // Never leak internals to the client
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
