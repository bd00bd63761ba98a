//! # Client Error Types
//!
//! Consolidated error handling for the API client and the console.
//!
//! ## Error Categories
//!
//! - **Network**: the backend could not be reached at all (DNS, refused
//!   connection, TLS, reset). Front ends show a connectivity message for these.
//! - **Http**: the backend answered with a non-2xx status. Carries the status,
//!   the parsed body and a human-readable message.
//! - **SessionExpired**: a 401 triggered a token refresh and the refresh failed.
//!   The stored session has already been wiped when this is returned.
//! - **Decode**: a JSON body did not match the record a typed method expected.
//! - **Rejected**: a 2xx answer that still refused the operation.
//! - **Validation**, **Storage**, **Config**: local failures unrelated to the backend.
//!
//! A 2xx response whose body is not JSON is *not* an error; see
//! [`crate::services::api::Reply::SoftFailure`].
//!
//! ## Message Derivation
//!
//! For HTTP errors the message is taken from the body in this order:
//!
//! 1. `body.message` (string)
//! 2. `body.error` (string)
//! 3. the status line, e.g. `Request failed with status 503 Service Unavailable`
//!
//! ```rust
//! use client::core::error::ApiError;
//! use serde_json::json;
//!
//! let err = ApiError::from_response(400, json!({"error": "Amount too low"}));
//! assert_eq!(err.to_string(), "Amount too low");
//! assert_eq!(err.status(), Some(400));
//! ```
//!
//! `ApiError` is `Clone` because one refresh outcome is handed to every request
//! that was waiting on it.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Transport failure before any HTTP response was received
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        body: Value,
    },

    /// Refresh failed; the session was cleared and the user must sign in again
    #[error("Session expired, please sign in again: {0}")]
    SessionExpired(Box<ApiError>),

    /// Well-formed JSON that did not match the expected record
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// 2xx answer that still refused the operation (e.g. login without a token)
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Caller input that cannot be sent (e.g. a form that is not a JSON object)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Build an HTTP error from a status code and whatever body could be parsed.
    pub fn from_response(status: u16, body: Value) -> Self {
        let message = Self::message_from_body(&body).unwrap_or_else(|| {
            let reason = StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown Status");
            format!("Request failed with status {} {}", status, reason)
        });

        ApiError::Http {
            status,
            message,
            body,
        }
    }

    fn message_from_body(body: &Value) -> Option<String> {
        ["message", "error"]
            .iter()
            .filter_map(|key| body.get(*key).and_then(Value::as_str))
            .find(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// HTTP status of this error, looking through `SessionExpired`.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::SessionExpired(inner) => inner.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }

    /// True when the failure was connectivity rather than an application answer.
    pub fn is_network(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::SessionExpired(inner) => inner.is_network(),
            _ => false,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired(_))
    }

    /// Wrap a refresh failure for the request that triggered it.
    pub(crate) fn session_expired(refresh_error: ApiError) -> Self {
        match refresh_error {
            already @ ApiError::SessionExpired(_) => already,
            other => ApiError::SessionExpired(Box::new(other)),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_precedence() {
        let both = ApiError::from_response(400, json!({"message": "Bad amount", "error": "ignored"}));
        assert_eq!(both.to_string(), "Bad amount");

        let error_only = ApiError::from_response(409, json!({"error": "Duplicate wallet"}));
        assert_eq!(error_only.to_string(), "Duplicate wallet");

        let neither = ApiError::from_response(503, json!({"detail": "down"}));
        assert!(neither.to_string().contains("503"));
        assert!(neither.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn test_non_string_message_falls_through() {
        let err = ApiError::from_response(422, json!({"message": {"field": "amount"}, "error": "Invalid"}));
        assert_eq!(err.to_string(), "Invalid");

        let err = ApiError::from_response(500, Value::Null);
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_session_expired_looks_through() {
        let refresh = ApiError::from_response(403, json!({"message": "Refresh token revoked"}));
        let err = ApiError::session_expired(refresh);

        assert!(err.is_session_expired());
        assert_eq!(err.status(), Some(403));
        assert!(!err.is_network());
        assert!(err.to_string().contains("Refresh token revoked"));

        let rewrapped = ApiError::session_expired(err.clone());
        assert!(matches!(rewrapped, ApiError::SessionExpired(inner) if !inner.is_session_expired()));
    }

    #[test]
    fn test_network_classification() {
        let err = ApiError::session_expired(ApiError::Network("connection refused".to_string()));
        assert!(err.is_network());
        assert!(!ApiError::from_response(401, Value::Null).is_network());
        assert!(ApiError::from_response(401, Value::Null).is_unauthorized());
    }
}
