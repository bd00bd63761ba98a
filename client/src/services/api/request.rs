//! # Request and Response Shapes
//!
//! - [`RequestOptions`]: the per-call request descriptor (method, body, headers)
//! - [`Attempt`]: which send of a logical request this is
//! - [`Payload`]: a successful response body, parsed or not
//! - [`Reply`]: what typed endpoint methods hand back to callers

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::core::error::{ApiError, Result};

/// Per-call request descriptor.
///
/// The body is already-serialized JSON. Headers given here are applied after the
/// standard ones, so they override `Content-Type`, `Authorization` or the API key.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<String>,
    pub headers: HeaderMap,
    /// Refresh the token and retry once when the first send gets a 401.
    /// Off for login, logout and the refresh call itself.
    pub refresh_on_unauthorized: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
            refresh_on_unauthorized: true,
        }
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Serialize `value` as the JSON body.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(serde_json::to_string(value).map_err(|e| ApiError::Validation(e.to_string()))?);
        Ok(self)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn without_refresh(mut self) -> Self {
        self.refresh_on_unauthorized = false;
        self
    }
}

/// Which send of a logical request is in progress.
///
/// Only `First` may trigger a refresh; a 401 on `AfterRefresh` is returned as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    First,
    AfterRefresh,
}

/// Body of a 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    /// The body was not JSON. Kept verbatim for display.
    Malformed { message: String, raw: String },
}

impl Payload {
    /// Untyped view: malformed bodies become `{success: false, message, raw}`.
    pub fn into_value(self) -> Value {
        match self {
            Payload::Json(value) => value,
            Payload::Malformed { message, raw } => json!({
                "success": false,
                "message": message,
                "raw": raw,
            }),
        }
    }

    /// Typed view. A JSON body that does not match `T` is a decode error; a
    /// malformed body is a soft failure.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Reply<T>> {
        match self {
            Payload::Json(value) => Ok(Reply::Data(serde_json::from_value(value)?)),
            Payload::Malformed { message, raw } => Ok(Reply::SoftFailure { message, raw }),
        }
    }
}

/// Result of a typed endpoint call that reached the backend and got a 2xx.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Data(T),
    /// 2xx with a body that was not JSON
    SoftFailure { message: String, raw: String },
}

impl<T> Reply<T> {
    pub fn data(self) -> Option<T> {
        match self {
            Reply::Data(data) => Some(data),
            Reply::SoftFailure { .. } => None,
        }
    }

    pub fn is_soft_failure(&self) -> bool {
        matches!(self, Reply::SoftFailure { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        match self {
            Reply::Data(data) => Reply::Data(f(data)),
            Reply::SoftFailure { message, raw } => Reply::SoftFailure { message, raw },
        }
    }

    /// Collapse a soft failure into [`ApiError::Decode`] for callers that
    /// cannot use a partial answer.
    pub fn into_result(self) -> Result<T> {
        match self {
            Reply::Data(data) => Ok(data),
            Reply::SoftFailure { message, .. } => Err(ApiError::Decode(message)),
        }
    }
}
