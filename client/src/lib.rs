//! # Invest Console - Library Root
//!
//! Authenticated API client for the crypto investment platform backend, plus
//! the pieces the `invest` binary needs around it.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                client (this crate)                     │
//! ├────────────────────────────────────────────────────────┤
//! │  Tokio         - Async runtime                         │
//! │  Reqwest       - HTTP client with cookie store         │
//! │  futures       - Shared refresh future                 │
//! │  tracing       - Structured logging                    │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTP (Bearer token + x-api-key + cookies)
//!          ▼
//! ┌─────────────────┐
//! │  Backend API    │
//! └─────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: Command parsing and dispatch for the `invest` binary
//! - **config**: `ClientConfig` loaded from the environment
//! - **core**: `ApiError` and the `ApiService` / `AdminService` traits
//! - **debug**: Logging setup
//! - **services**: `api::ApiClient` and its endpoint modules
//! - **session**: Session store (token, user, login time)
//!
//! ### Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   ├── debug (logging)
//!   ├── config (environment)
//!   └── app (commands)
//!       └── core::service traits
//!           └── services::api::ApiClient
//!               └── session::Session
//! ```
//!
//! ## Token Refresh
//!
//! Every request carries the stored access token. A 401 on the first send
//! triggers one refresh through `auth/refresh-token` (the refresh token is an
//! HTTP-only cookie) and one resend. Concurrent 401s share a single refresh.
//! If the refresh fails the session is cleared and the call fails with
//! [`ApiError::SessionExpired`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use client::{ApiClient, ApiService, ClientConfig, Session};
//!
//! # async fn demo() -> client::Result<()> {
//! let config = ClientConfig::new("http://localhost:5000/api/", "public-key");
//! let api = ApiClient::new(config, Session::in_memory())?;
//!
//! api.login("alice@example.com", "hunter2", false).await?;
//! let wallets = client::services::api::get_wallets(&api).await?;
//! # let _ = wallets;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p client
//! cargo test -p client services::api::tests
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod session;

pub use config::ClientConfig;
pub use crate::core::{AdminService, ApiError, ApiService, Result};
pub use services::api::ApiClient;
pub use session::Session;
