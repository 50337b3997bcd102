//! API Extractors
//!
//! Request extractors that enforce the boundary rules of the employee API:
//! Basic credentials, JSON-only bodies without unknown fields, and numeric
//! path identifiers.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, HeaderMap},
};
use axum_extra::{
    headers::{authorization::Basic, Authorization, ContentType, HeaderMapExt},
    TypedHeader,
};
use mime::Mime;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::handlers::AppState;
use crate::error::ApiError;
use crate::storage::EmployeeId;

// == Basic Auth ==
/// Username of a caller whose Basic credentials were verified.
///
/// Taking this extractor as a handler argument gates the route behind
/// authentication. Failures answer 401 with a `WWW-Authenticate` challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuthUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for BasicAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    debug!(reason = %rejection, "request without basic credentials");
                    ApiError::Unauthorized
                })?;

        let username = basic.username().to_owned();
        let password = basic.password().to_owned();

        // bcrypt blocks for tens of milliseconds at cost 12.
        let credentials = Arc::clone(&state.credentials);
        let candidate = username.clone();
        let verified =
            tokio::task::spawn_blocking(move || credentials.verify(&candidate, &password))
                .await
                .map_err(|err| ApiError::Internal(format!("credential check failed: {}", err)))?;

        if !verified {
            warn!(username = %username, "rejected basic credentials");
            return Err(ApiError::Unauthorized);
        }
        Ok(Self(username))
    }
}

// == JSON Body ==
/// JSON request body.
///
/// Unlike `axum::Json`, every failure maps onto the employee API's error
/// taxonomy: a missing or malformed `Content-Type` and any decode failure are
/// `BadRequest`, and a non-JSON media type is `UnsupportedMediaType`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        require_json_content_type(req.headers())?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;
        Ok(Self(value))
    }
}

/// Checks that `Content-Type` parses as a media type whose essence is
/// `application/json`. Well-formed parameters such as `charset` are allowed.
fn require_json_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let content_type = headers
        .typed_try_get::<ContentType>()
        .map_err(|err| ApiError::BadRequest(format!("malformed Content-Type header: {}", err)))?
        .ok_or_else(|| ApiError::BadRequest("missing Content-Type header".to_string()))?;

    let media_type = Mime::from(content_type);
    if media_type.type_() != mime::APPLICATION || media_type.subtype() != mime::JSON {
        debug!(content_type = %media_type, "rejected request body media type");
        return Err(ApiError::UnsupportedMediaType(
            "expect application/json Content-Type".to_string(),
        ));
    }
    Ok(())
}

// == Path Keys ==
/// The `{key}` segment of `/employee/{key}/`.
///
/// All-digit segments are identifiers; anything else is a last name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeKey {
    Id(EmployeeId),
    LastName(String),
}

impl FromStr for EmployeeKey {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse()
                .map(EmployeeKey::Id)
                .map_err(|_| ApiError::BadRequest(format!("employee id {} is out of range", s)));
        }
        Ok(EmployeeKey::LastName(s.to_string()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for EmployeeKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        raw.parse()
    }
}

/// Numeric `{id}` segment for routes that only address records by id.
///
/// A non-numeric segment is answered with 405, since only GET is bound for
/// last-name paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub EmployeeId);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match EmployeeKey::from_request_parts(parts, state).await? {
            EmployeeKey::Id(id) => Ok(Self(id)),
            EmployeeKey::LastName(name) => Err(ApiError::MethodNotAllowed(format!(
                "expect method GET at /employee/{}/, got {}",
                name, parts.method
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_json_content_type_accepted() {
        assert!(require_json_content_type(&headers_with("application/json")).is_ok());
        assert!(require_json_content_type(&headers_with("application/json; charset=utf-8")).is_ok());
        assert!(require_json_content_type(&headers_with("Application/JSON")).is_ok());
    }

    #[test]
    fn test_other_media_type_unsupported() {
        let err = require_json_content_type(&headers_with("text/plain")).unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedMediaType(_)));
    }

    #[test]
    fn test_missing_or_malformed_content_type_is_bad_request() {
        let err = require_json_content_type(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = require_json_content_type(&headers_with("json")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err = require_json_content_type(&headers_with("")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_broken_parameters_are_bad_request() {
        for value in [
            "application/json; charset",
            "application/json; =utf-8",
            "application/json;;;",
        ] {
            let err = require_json_content_type(&headers_with(value)).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)), "{:?}", value);
        }
    }

    #[test]
    fn test_employee_key_parsing() {
        assert_eq!("0".parse::<EmployeeKey>().unwrap(), EmployeeKey::Id(0));
        assert_eq!("42".parse::<EmployeeKey>().unwrap(), EmployeeKey::Id(42));
        assert_eq!(
            "Lee".parse::<EmployeeKey>().unwrap(),
            EmployeeKey::LastName("Lee".to_string())
        );
        assert_eq!(
            "4b".parse::<EmployeeKey>().unwrap(),
            EmployeeKey::LastName("4b".to_string())
        );
        assert_eq!(
            "-1".parse::<EmployeeKey>().unwrap(),
            EmployeeKey::LastName("-1".to_string())
        );
    }

    #[test]
    fn test_employee_key_overflow_is_bad_request() {
        let err = "99999999999999999999999".parse::<EmployeeKey>().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
