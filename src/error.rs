/*
 * Responsibility
 * - IdentityError: why a caller identity could not be extracted
 * - AppError: HTTP-facing error, IntoResponse (HTTP status / JSON error body)
 * - IdentityError -> AppError mapping (always 401, stable machine codes)
 * - Timeout / Internal come from the HTTP-level layers (middleware::http)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("incorrect token format")]
    Format,
    #[error("failed to decode raw claims {claims}")]
    Decode {
        claims: String,
        #[source]
        source: base64::DecodeError,
    },
    #[error("failed to decode claims")]
    Parse(#[source] serde_json::Error),
    #[error("subject claim not found")]
    MissingSubject,
    #[error("invalid {claim} format: expected {expected}, found {found}")]
    TypeMismatch {
        claim: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("field {0} not found")]
    MissingClaim(String),
    #[error("malformed authorization data")]
    MalformedHeader,
    #[error("unknown authorization method {0}")]
    UnsupportedScheme(String),
}

impl IdentityError {
    pub(crate) fn type_mismatch(claim: &str, expected: &'static str, found: &Value) -> Self {
        Self::TypeMismatch {
            claim: claim.to_owned(),
            expected,
            found: json_kind(found),
        }
    }

    /// Machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Format => "INVALID_TOKEN_FORMAT",
            Self::Decode { .. } => "INVALID_TOKEN_ENCODING",
            Self::Parse(_) => "INVALID_TOKEN_CLAIMS",
            Self::MissingSubject => "MISSING_SUBJECT",
            Self::TypeMismatch { .. } => "INVALID_CLAIM_TYPE",
            Self::MissingClaim(_) => "MISSING_CLAIM",
            Self::MalformedHeader => "MALFORMED_AUTHORIZATION",
            Self::UnsupportedScheme(_) => "UNSUPPORTED_AUTH_SCHEME",
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    Unauthorized { code: &'static str, message: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("request timed out")]
    Timeout,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthorized { code, message } => (StatusCode::UNAUTHORIZED, code, message),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{resource} not found."),
            ),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "request timed out".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<IdentityError> for AppError {
    fn from(e: IdentityError) -> Self {
        // The token is client input; every failure is the caller's problem.
        AppError::unauthorized(e.code(), e.to_string())
    }
}
