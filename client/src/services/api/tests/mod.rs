//! # API Client Tests
//!
//! Runs the client against an in-process axum backend bound to an ephemeral
//! port. The mock accepts exactly one access token at a time; anything else
//! gets a 401, which is what drives the refresh path.

mod session;

use super::*;
use crate::config::ClientConfig;
use crate::session::Session;
use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const API_KEY: &str = "test-key";
pub const PASSWORD: &str = "correct-horse";
pub const LOGIN_TOKEN: &str = "login-token";
pub const REFRESH_COOKIE: &str = "refreshToken=r1";

/// How the mock answers `auth/refresh-token`
#[derive(Debug, Clone)]
pub enum RefreshBehavior {
    /// Issue this token and start accepting it
    Issue(String),
    /// Answer with this status and body
    Fail(StatusCode, Value),
}

/// One request as the mock saw it
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub api_key: Option<String>,
    pub cookie: Option<String>,
}

pub struct MockState {
    valid_token: Mutex<String>,
    refresh: Mutex<RefreshBehavior>,
    refresh_delay: Mutex<Duration>,
    refresh_calls: AtomicUsize,
    requests: Mutex<Vec<Recorded>>,
    last_body: Mutex<Option<Value>>,
}

pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            valid_token: Mutex::new("valid-token".to_string()),
            refresh: Mutex::new(RefreshBehavior::Issue("renewed-token".to_string())),
            refresh_delay: Mutex::new(Duration::from_millis(150)),
            refresh_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            last_body: Mutex::new(None),
        });

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/logout", post(logout))
            .route("/api/auth/refresh-token", post(refresh_token))
            .route("/api/user/dashboard", get(dashboard))
            .route("/api/wallets", get(wallets))
            .route("/api/investments", post(investments))
            .route("/api/transactions", get(transactions))
            .route("/api/transactions/deposit", post(deposit))
            .route("/api/admin/deposits/{id}/confirm", post(confirm_deposit))
            .route("/api/admin/wallets/{id}", axum::routing::delete(delete_wallet))
            .route("/api/always-401", get(always_unauthorized))
            .route("/api/slow-401", get(slow_unauthorized))
            .route("/api/broken", get(broken))
            .route("/api/empty", get(empty))
            .route("/api/fail-message", get(fail_message))
            .route("/api/fail-error", get(fail_error))
            .route("/api/fail-plain", get(fail_plain))
            .route("/api/fail-text", get(fail_text))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend crashed");
        });

        Self {
            base_url: format!("http://{}/api/", addr),
            state,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone(), API_KEY)
    }

    /// Client with an empty in-memory session
    pub fn client(&self) -> ApiClient {
        self.client_with(Session::in_memory())
    }

    pub fn client_with(&self, session: Session) -> ApiClient {
        ApiClient::new(self.config(), session).expect("valid test config")
    }

    /// Client whose session holds `token` for a plain user, with the refresh
    /// cookie a login would have set
    pub fn signed_in_client(&self, token: &str) -> ApiClient {
        let client = self.client();
        client.session().begin(token, Some(&test_user("user"))).unwrap();
        self.seed_refresh_cookie(&client);
        client
    }

    pub fn seed_refresh_cookie(&self, client: &ApiClient) {
        client
            .cookies
            .add_cookie_str(&format!("{}; Path=/", REFRESH_COOKIE), &client.origin);
    }

    pub fn accept_token(&self, token: &str) {
        *self.state.valid_token.lock() = token.to_string();
    }

    pub fn refresh_with(&self, behavior: RefreshBehavior) {
        *self.state.refresh.lock() = behavior;
    }

    pub fn refresh_delay(&self, delay: Duration) {
        *self.state.refresh_delay.lock() = delay;
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.state.last_body.lock().clone()
    }
}

pub fn test_user(role: &str) -> shared::UserInfo {
    shared::UserInfo {
        id: "u1".to_string(),
        email: "alice@invest.io".to_string(),
        role: role.to_string(),
    }
}

// ==================== MOCK HANDLERS ====================

type Shared = State<Arc<MockState>>;

async fn record(State(state): Shared, request: Request, next: Next) -> Response {
    let recorded = {
        let headers = request.headers();
        let text = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Recorded {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            authorization: text("authorization"),
            api_key: text("x-api-key"),
            cookie: text("cookie"),
        }
    };
    state.requests.lock().push(recorded);
    next.run(request).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": "Token expired"})),
    )
        .into_response()
}

fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", state.valid_token.lock());
    let sent = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if sent == expected {
        Ok(())
    } else {
        Err(unauthorized())
    }
}

async fn login(State(state): Shared, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    match body["password"].as_str() {
        Some(PASSWORD) => {
            *state.valid_token.lock() = LOGIN_TOKEN.to_string();
            let role = if email.starts_with("admin") { "admin" } else { "user" };
            (
                [(header::SET_COOKIE, format!("{}; Path=/; HttpOnly", REFRESH_COOKIE))],
                Json(json!({
                    "success": true,
                    "message": "Login successful",
                    "accessToken": LOGIN_TOKEN,
                    "user": {"_id": 42, "email": email, "role": role}
                })),
            )
                .into_response()
        }
        Some("locked") => Json(json!({"success": false, "message": "Account locked"})).into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        )
            .into_response(),
    }
}

async fn logout() -> Json<Value> {
    Json(json!({"success": true, "message": "Logged out"}))
}

async fn refresh_token(State(state): Shared, headers: HeaderMap) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    let delay = *state.refresh_delay.lock();
    tokio::time::sleep(delay).await;

    let has_cookie = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|cookie| cookie.split(';').any(|pair| pair.trim() == REFRESH_COOKIE));

    let behavior = state.refresh.lock().clone();
    match behavior {
        RefreshBehavior::Fail(status, body) => (status, Json(body)).into_response(),
        RefreshBehavior::Issue(_) if !has_cookie => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Refresh token missing"})),
        )
            .into_response(),
        RefreshBehavior::Issue(token) => {
            *state.valid_token.lock() = token.clone();
            Json(json!({
                "success": true,
                "accessToken": token,
                "user": {"_id": "u1", "email": "alice@invest.io", "role": "user"}
            }))
            .into_response()
        }
    }
}

async fn dashboard(State(state): Shared, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    Json(json!({
        "success": true,
        "data": {
            "balance": 1250.5,
            "totalDeposit": 1000,
            "totalWithdrawal": 0,
            "totalProfit": "250.5",
            "activeInvestments": [{"_id": "i1", "investmentType": "gold", "amount": 500, "roi": 12}],
            "recentTransactions": []
        }
    }))
    .into_response()
}

async fn wallets(State(state): Shared, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    Json(json!({
        "data": [
            {"_id": "w1", "currency": "BTC", "network": "Bitcoin", "address": "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh"},
            {"_id": "w2", "currency": "USDT", "network": "TRC20", "address": "TXYZabc123"}
        ]
    }))
    .into_response()
}

async fn investments(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    *state.last_body.lock() = Some(body.clone());
    Json(json!({
        "success": true,
        "data": {"_id": "i9", "investmentType": body["investmentType"], "amount": body["amount"], "roi": body["roi"]}
    }))
    .into_response()
}

async fn deposit(State(state): Shared, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    *state.last_body.lock() = Some(body.clone());
    Json(json!({
        "success": true,
        "message": "Deposit submitted",
        "data": {"_id": "d1", "type": "deposit", "amount": body["amount"], "currency": body["currency"], "status": "pending"}
    }))
    .into_response()
}

async fn transactions(State(state): Shared, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    Json(json!({
        "success": true,
        "data": [
            {"_id": "t1", "type": "withdraw", "amount": "75.25", "coin": "ETH", "status": "approved"}
        ]
    }))
    .into_response()
}

async fn confirm_deposit(State(state): Shared, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    Json(json!({
        "success": true,
        "data": {"_id": id, "type": "deposit", "amount": 10, "currency": "BTC", "status": "confirmed"}
    }))
    .into_response()
}

async fn delete_wallet(State(state): Shared, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    Json(json!({"success": true, "message": format!("Wallet {} deleted", id)})).into_response()
}

async fn always_unauthorized() -> Response {
    unauthorized()
}

async fn slow_unauthorized() -> Response {
    tokio::time::sleep(Duration::from_millis(400)).await;
    unauthorized()
}

async fn broken() -> Response {
    (
        [(header::CONTENT_TYPE, "text/html")],
        "<html>not json</html>",
    )
        .into_response()
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

async fn fail_message() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"message": "Amount too small", "error": "ignored"})),
    )
        .into_response()
}

async fn fail_error() -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"success": false, "error": "Validation failed"})),
    )
        .into_response()
}

async fn fail_plain() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn fail_text() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
}
