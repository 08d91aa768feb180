//! Error types for the data access layer
//!
//! The cache itself never fails; these errors originate in the wrapped
//! repositories and pass through the cache decorators unchanged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Repository Error Enum ==
/// Failure reported by a repository (real or cache-decorated).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    /// Entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Backing store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for RepositoryError {
    fn into_response(self) -> Response {
        let status = match &self {
            RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
            RepositoryError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RepositoryError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RepositoryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
pub type Result<T> = std::result::Result<T, RepositoryError>;
