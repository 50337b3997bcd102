//! Error types for the employee server
//!
//! Storage reports plain `StoreError` signals; handlers turn them into
//! `ApiError`, which renders as a status code with a plain-text body.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::storage::EmployeeId;

/// Realm announced in the `WWW-Authenticate` challenge.
pub const AUTH_REALM: &str = "employees";

// == Store Error Enum ==
/// Errors reported by the employee store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No employee has this id
    #[error("employee with id={0} not found")]
    NotFound(EmployeeId),

    /// The last-name filter matched nothing
    #[error("employees with lastName={0} not found")]
    NoneWithLastName(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == API Error Enum ==
/// Error type returned by request handlers and extractors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed body, media type or path
    #[error("{0}")]
    BadRequest(String),

    /// Body is not declared as JSON
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// Unknown identifier or empty last-name match
    #[error("{0}")]
    NotFound(String),

    /// Missing or rejected Basic credentials
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::NotFound(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.to_string();

        if let ApiError::Unauthorized = self {
            let challenge = format!("Basic realm=\"{}\"", AUTH_REALM);
            return (status, [(header::WWW_AUTHENTICATE, challenge)], body).into_response();
        }

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
