//! # API Client
//!
//! Authenticated JSON HTTP client for the investment platform backend.
//!
//! ## Request Lifecycle
//!
//! ```text
//! INITIAL ──send──▶ SENT ──┬─ 2xx ───────────▶ SUCCESS (JSON, or soft failure)
//!                          ├─ non-2xx ───────▶ HTTP_ERROR
//!                          ├─ transport ─────▶ NETWORK_ERROR
//!                          ├─ 401, first ────▶ REFRESHING ──┬─ ok ──▶ RETRY_SENT ──▶ SUCCESS | HTTP_ERROR
//!                          │                                └─ err ─▶ REFRESH_FAILED (session cleared)
//!                          └─ 401, session already cleared ─▶ REFRESH_FAILED (no resend)
//! ```
//!
//! Every send attaches:
//!
//! - `Content-Type: application/json`
//! - `Authorization: Bearer <token>` (empty token when signed out)
//! - `x-api-key: <static key>`
//!
//! Cookies are kept in the client's cookie jar, which is how the refresh
//! token (an HTTP-only cookie set at login) reaches the refresh endpoint. The
//! jar's cookies for the API origin are saved in the session after login and
//! after every refresh, and loaded back when a client is built, so a session
//! persisted in a file can still refresh in a later process.

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::{
    AdminDashboard, AdminSignupRequest, ApiEnvelope, AuthResponse, DashboardSummary,
    DepositRequest, InvestRequest, Investment, Transaction, TransactionFilter, UserInfo,
    UserSummary, WalletAddress, WalletAddressInput, WithdrawRequest,
};
use std::sync::Arc;
use std::time::Instant;

use super::endpoints::Settlement;
use super::refresh::RefreshSlot;
use super::request::{Attempt, Payload, Reply, RequestOptions};
use crate::config::ClientConfig;
use crate::core::error::{ApiError, Result};
use crate::core::service::{AdminService, ApiService};
use crate::session::Session;

/// Header carrying the static API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the backend API.
///
/// Owns the connection pool, the configuration, the session and the in-flight
/// refresh slot. Share one instance (by reference or `Arc`) between every caller
/// so concurrent 401s collapse into one refresh.
pub struct ApiClient {
    pub(crate) http: Client,
    pub(crate) config: ClientConfig,
    pub(crate) api_key: HeaderValue,
    pub(crate) session: Session,
    pub(crate) refresh: RefreshSlot,
    pub(crate) cookies: Arc<Jar>,
    /// Base URL parsed once; cookies are saved and restored against it
    pub(crate) origin: Url,
}

impl ApiClient {
    /// Create a client. Fails if the configuration does not validate.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self> {
        config.validate().map_err(ApiError::Config)?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ApiError::Config("INVEST_API_KEY contains invalid characters".to_string()))?;
        api_key.set_sensitive(true);

        let origin = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("INVEST_API_URL is not a valid URL: {}", e)))?;

        let cookies = Arc::new(Jar::default());
        if let Some(saved) = session.cookies()? {
            restore_cookies(&cookies, &origin, &saved);
            tracing::debug!("Restored saved cookies");
        }

        let mut builder = Client::builder().cookie_provider(cookies.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            api_key,
            session,
            refresh: RefreshSlot::default(),
            cookies,
            origin,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // ==================== SESSION ACCESSORS ====================

    pub fn token(&self) -> Result<Option<String>> {
        self.session.token()
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.session.set_token(token)
    }

    pub fn user(&self) -> Result<Option<UserInfo>> {
        self.session.user()
    }

    pub fn set_user(&self, user: &UserInfo) -> Result<()> {
        self.session.set_user(user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_admin()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.session.has_role(role)
    }

    pub fn login_timestamp(&self) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        self.session.login_timestamp()
    }

    pub fn remembered_username(&self) -> Result<Option<String>> {
        self.session.remembered_username()
    }

    /// Drop the token, user and login time. The remembered username is kept.
    pub fn clear_auth(&self) -> Result<()> {
        self.session.clear()
    }

    /// Save the jar's cookies for the API origin into the session.
    pub(crate) fn persist_cookies(&self) -> Result<()> {
        persist_cookies(&self.cookies, &self.origin, &self.session)
    }

    // ==================== REQUESTS ====================

    /// Send a request and return the JSON body.
    ///
    /// - 2xx: the parsed body, `{}` when empty, or `{success: false, message, raw}`
    ///   when the body is not JSON
    /// - 401 on the first send: refresh once, then resend once
    /// - other non-2xx: [`ApiError::Http`]
    /// - transport failure: [`ApiError::Network`]
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        Ok(self.execute(endpoint, &options).await?.into_value())
    }

    /// Send a request and decode the body into `T`.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Reply<T>> {
        self.execute(endpoint, &options).await?.decode()
    }

    #[tracing::instrument(
        name = "api_request",
        skip(self, options),
        fields(method = %options.method, endpoint = %endpoint, request_id = %uuid::Uuid::new_v4())
    )]
    pub(crate) async fn execute(&self, endpoint: &str, options: &RequestOptions) -> Result<Payload> {
        let mut attempt = Attempt::First;

        loop {
            // Re-read on every send so a refresh by another caller is picked up
            let sent_token = self.session.token()?;
            let start = Instant::now();

            let response = self
                .build_request(endpoint, options, sent_token.as_deref())?
                .send()
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, ?attempt, "Network error");
                    ApiError::from(e)
                })?;

            let status = response.status();
            tracing::debug!(
                status = status.as_u16(),
                ?attempt,
                duration_ms = start.elapsed().as_millis(),
                "Response received"
            );

            if status == StatusCode::UNAUTHORIZED
                && attempt == Attempt::First
                && options.refresh_on_unauthorized
            {
                let current_token = self.session.token()?;
                if current_token == sent_token {
                    tracing::info!("Access token rejected, refreshing");
                    self.refresh_token()
                        .await
                        .map_err(ApiError::session_expired)?;
                } else if current_token.is_none() {
                    // Signed out while in flight; a resend would go out without a token
                    let cause = self.refresh.last_failure().unwrap_or_else(|| {
                        ApiError::Rejected("session ended while the request was in flight".to_string())
                    });
                    tracing::warn!(error = %cause, "Session cleared while request was in flight");
                    return Err(ApiError::session_expired(cause));
                } else {
                    tracing::debug!("Token replaced while request was in flight, retrying");
                }
                attempt = Attempt::AfterRefresh;
                continue;
            }

            return Self::read_payload(response).await;
        }
    }

    fn build_request(
        &self,
        endpoint: &str,
        options: &RequestOptions,
        token: Option<&str>,
    ) -> Result<RequestBuilder> {
        let url = self.config.endpoint_url(endpoint);
        let mut headers = self.standard_headers(Some(token.unwrap_or_default()))?;
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        let mut builder = self
            .http
            .request(options.method.clone(), url)
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(body.clone());
        }
        Ok(builder)
    }

    /// Content type, API key and (when `bearer` is given) the authorization header.
    pub(crate) fn standard_headers(&self, bearer: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, self.api_key.clone());

        if let Some(token) = bearer {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                ApiError::Storage("stored access token is not a valid header value".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Turn a final response into a payload or an HTTP error.
    pub(crate) async fn read_payload(response: Response) -> Result<Payload> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let body = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text).unwrap_or(Value::String(text))
            };
            let error = ApiError::from_response(status.as_u16(), body);
            tracing::warn!(status = status.as_u16(), error = %error, "Request failed");
            return Err(error);
        }

        if text.trim().is_empty() {
            return Ok(Payload::Json(Value::Object(Map::new())));
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(Payload::Json(value)),
            Err(e) => {
                tracing::warn!(error = %e, bytes = text.len(), "Successful response was not JSON");
                Ok(Payload::Malformed {
                    message: format!("Invalid JSON response from server: {}", e),
                    raw: text,
                })
            }
        }
    }
}

/// Write the jar's `Cookie` header for `origin` into the session.
pub(crate) fn persist_cookies(cookies: &Jar, origin: &Url, session: &Session) -> Result<()> {
    let header = cookies.cookies(origin);
    session.set_cookies(header.as_ref().and_then(|value| value.to_str().ok()))
}

/// Load a saved `name=value; ...` header back into the jar. Saved cookies lose
/// their attributes, so they are scoped to the whole origin.
fn restore_cookies(cookies: &Jar, origin: &Url, saved: &str) {
    for pair in saved.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
        cookies.add_cookie_str(&format!("{}; Path=/", pair), origin);
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("session", &self.session)
            .finish()
    }
}

// Implement the service traits for ApiClient
#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn login(&self, email: &str, password: &str, remember: bool) -> Result<AuthResponse> {
        super::auth::login(self, email, password, remember).await
    }

    async fn logout(&self) -> Result<()> {
        super::auth::logout(self).await
    }

    async fn get_dashboard_data(&self) -> Result<Reply<ApiEnvelope<DashboardSummary>>> {
        super::dashboard::get_dashboard_data(self).await
    }

    async fn get_wallets(&self) -> Result<Reply<ApiEnvelope<Vec<WalletAddress>>>> {
        super::wallet::get_wallets(self).await
    }

    async fn deposit(&self, request: &DepositRequest) -> Result<Reply<ApiEnvelope<Option<Transaction>>>> {
        super::transactions::deposit(self, request).await
    }

    async fn withdraw(&self, request: &WithdrawRequest) -> Result<Reply<ApiEnvelope<Option<Transaction>>>> {
        super::transactions::withdraw(self, request).await
    }

    async fn invest(&self, request: &InvestRequest) -> Result<Reply<ApiEnvelope<Option<Investment>>>> {
        super::investment::invest(self, request).await
    }

    async fn get_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Reply<ApiEnvelope<Vec<Transaction>>>> {
        super::transactions::get_transactions(self, filter).await
    }
}

#[async_trait::async_trait]
impl AdminService for ApiClient {
    async fn get_admin_dashboard(&self) -> Result<Reply<ApiEnvelope<AdminDashboard>>> {
        super::dashboard::get_admin_dashboard(self).await
    }

    async fn admin_signup(
        &self,
        request: &AdminSignupRequest,
    ) -> Result<Reply<ApiEnvelope<Option<UserSummary>>>> {
        super::auth::admin_signup(self, request).await
    }

    async fn settle(
        &self,
        action: Settlement,
        transaction_id: &str,
    ) -> Result<Reply<ApiEnvelope<Option<Transaction>>>> {
        super::transactions::settle(self, action, transaction_id).await
    }

    async fn add_wallet(
        &self,
        wallet: &WalletAddressInput,
    ) -> Result<Reply<ApiEnvelope<Option<WalletAddress>>>> {
        super::wallet::add_wallet(self, wallet).await
    }

    async fn update_wallet(
        &self,
        wallet_id: &str,
        wallet: &WalletAddressInput,
    ) -> Result<Reply<ApiEnvelope<Option<WalletAddress>>>> {
        super::wallet::update_wallet(self, wallet_id, wallet).await
    }

    async fn delete_wallet(&self, wallet_id: &str) -> Result<Reply<ApiEnvelope<Value>>> {
        super::wallet::delete_wallet(self, wallet_id).await
    }
}
