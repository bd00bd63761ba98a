//! # Services Module
//!
//! External service integrations for the investment console.
//!
//! ```text
//! services/
//! └── api/    - Backend HTTP API client
//!               (authentication, token refresh, dashboards, wallets,
//!                transactions, investments, admin operations)
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │           invest (CLI front end)         │
//! │                                          │
//! │   ┌──────────────┐    ┌──────────────┐   │
//! │   │  ApiClient   │───▶│   Session    │   │
//! │   │  (api/)      │    │  (session/)  │   │
//! │   └──────┬───────┘    └──────────────┘   │
//! └──────────┼───────────────────────────────┘
//!            │ HTTP/JSON + cookies
//!            ▼
//! ┌──────────────────────────────────────────┐
//! │  Backend API  (/api/...)                 │
//! │  auth/*  user/*  wallets  transactions/* │
//! │  investments  admin/*                    │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//!
//! `ApiClient` is `Send + Sync`. Wrap it in an `Arc` to share it between tasks;
//! all tasks then share one cookie jar, one session and one refresh slot.

pub mod api;
