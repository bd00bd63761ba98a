//! # Token Refresh
//!
//! POSTs to the refresh endpoint with the cookie jar (which carries the
//! refresh-token cookie) and the API key; no bearer token is sent.
//!
//! At most one refresh is on the wire at a time. The first caller to need a
//! refresh stores a [`Shared`] future in the [`RefreshSlot`]; every caller that
//! arrives while it is pending awaits a clone of the same future and gets the
//! same outcome. The future itself writes the session, so a successful refresh
//! updates the token exactly once and a failed one clears the session exactly
//! once. The slot is emptied once the outcome is known.
//!
//! The slot also keeps the error of the last failed refresh. A request whose
//! 401 arrives after that failure already cleared the session fails with it
//! instead of resending without a token.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::sync::Arc;
use reqwest::header::HeaderMap;
use reqwest::Client;
use shared::{AuthResponse, UserInfo};

use super::client::{self, ApiClient};
use super::endpoints;
use super::request::Payload;
use crate::core::error::{ApiError, Result};

/// Outcome of a successful refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshResult {
    pub access_token: String,
    pub user: Option<UserInfo>,
}

type SharedRefresh = Shared<BoxFuture<'static, Result<RefreshResult>>>;

/// Holder for the in-flight refresh, if any.
#[derive(Default)]
pub(crate) struct RefreshSlot {
    pending: Mutex<Option<SharedRefresh>>,
    /// Written by the refresh future before it touches the session
    last_failure: Arc<Mutex<Option<ApiError>>>,
}

impl RefreshSlot {
    /// Join the pending refresh, or install the one `start` builds.
    /// Returns the future and whether it was freshly started.
    fn join_or_start(&self, start: impl FnOnce() -> SharedRefresh) -> (SharedRefresh, bool) {
        let mut pending = self.pending.lock();

        // A finished future left behind by a cancelled caller is stale
        if let Some(existing) = pending.as_ref().filter(|p| p.peek().is_none()) {
            return (existing.clone(), false);
        }

        let fresh = start();
        *pending = Some(fresh.clone());
        (fresh, true)
    }

    fn finish(&self, done: &SharedRefresh) {
        let mut pending = self.pending.lock();
        if pending.as_ref().is_some_and(|p| p.ptr_eq(done)) {
            *pending = None;
        }
    }

    pub(crate) fn in_flight(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Error of the most recent refresh, if it failed
    pub(crate) fn last_failure(&self) -> Option<ApiError> {
        self.last_failure.lock().clone()
    }

    pub(crate) fn forget_failure(&self) {
        *self.last_failure.lock() = None;
    }
}

impl ApiClient {
    /// Refresh the access token, sharing any refresh already in flight.
    ///
    /// On success the new token (and user, when returned) is stored and the
    /// login timestamp renewed. On failure the whole session is cleared before
    /// the error is returned.
    pub async fn refresh_token(&self) -> Result<RefreshResult> {
        let (pending, started) = self.refresh.join_or_start(|| self.start_refresh());
        if !started {
            tracing::debug!("Joining in-flight token refresh");
        }

        let outcome = pending.clone().await;
        self.refresh.finish(&pending);
        outcome
    }

    fn start_refresh(&self) -> SharedRefresh {
        let http = self.http.clone();
        let url = self.config.endpoint_url(endpoints::REFRESH);
        let headers = self.standard_headers(None);
        let session = self.session.clone();
        let cookies = self.cookies.clone();
        let origin = self.origin.clone();
        let last_failure = self.refresh.last_failure.clone();

        async move {
            let outcome = match headers {
                Ok(headers) => post_refresh(&http, &url, headers).await,
                Err(e) => Err(e),
            };

            // A session that cannot be fully written is as unusable as a refused refresh
            let outcome = outcome.and_then(|result| {
                session.begin(&result.access_token, result.user.as_ref())?;
                Ok(result)
            });

            match outcome {
                Ok(result) => {
                    *last_failure.lock() = None;
                    if let Err(e) = client::persist_cookies(&cookies, &origin, &session) {
                        tracing::warn!(error = %e, "Failed to save refreshed cookies");
                    }
                    tracing::info!(user_updated = result.user.is_some(), "Access token refreshed");
                    Ok(result)
                }
                Err(error) => {
                    tracing::warn!(error = %error, "Token refresh failed, clearing session");
                    *last_failure.lock() = Some(error.clone());
                    if let Err(clear_error) = session.clear() {
                        tracing::error!(error = %clear_error, "Failed to clear session after refresh failure");
                    }
                    Err(error)
                }
            }
        }
        .boxed()
        .shared()
    }
}

async fn post_refresh(http: &Client, url: &str, headers: HeaderMap) -> Result<RefreshResult> {
    let response = http.post(url).headers(headers).send().await?;

    let value = match ApiClient::read_payload(response).await? {
        Payload::Json(value) => value,
        Payload::Malformed { message, .. } => return Err(ApiError::Decode(message)),
    };

    let auth: AuthResponse = serde_json::from_value(value)?;
    let access_token = auth
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Rejected(
                auth.message
                    .clone()
                    .unwrap_or_else(|| "refresh response did not include an access token".to_string()),
            )
        })?;

    Ok(RefreshResult {
        access_token,
        user: auth.user,
    })
}
