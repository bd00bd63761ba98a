//! # Backend API Client Module
//!
//! HTTP client for the investment platform backend. Handles authentication,
//! token refresh, dashboards, wallets, transactions and investments.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs          - Module exports and documentation
//! ├── client.rs       - ApiClient struct, request pipeline, service trait impls
//! ├── request.rs      - RequestOptions, Payload and Reply
//! ├── refresh.rs      - Access token refresh with de-duplication
//! ├── endpoints.rs    - Endpoint paths
//! ├── payload.rs      - Request body whitelisting
//! ├── auth.rs         - Login, logout, admin signup
//! ├── dashboard.rs    - User and admin dashboards
//! ├── wallet.rs       - Deposit wallet addresses
//! ├── transactions.rs - Deposits, withdrawals, history, settlement
//! └── investment.rs   - Investment plans
//! ```

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod endpoints;
pub mod investment;
pub mod payload;
pub mod refresh;
pub mod request;
pub mod transactions;
pub mod wallet;

#[cfg(test)]
mod tests;

pub use auth::*;
pub use client::{ApiClient, API_KEY_HEADER};
pub use dashboard::*;
pub use endpoints::Settlement;
pub use investment::*;
pub use refresh::RefreshResult;
pub use request::{Attempt, Payload, Reply, RequestOptions};
pub use transactions::*;
pub use wallet::*;
