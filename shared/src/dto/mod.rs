//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the backend REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login, admin signup, user info and auth responses
//! - [`envelope`] - The `{success, message, data}` wrapper most endpoints return
//! - [`dashboard`] - User dashboard summary
//! - [`wallet`] - Deposit addresses managed by admins
//! - [`transaction`] - Deposits, withdrawals, statuses and filters
//! - [`investment`] - Investment records and purchase requests
//! - [`admin`] - Admin dashboard and user summaries
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/auth/login
//! Content-Type: application/json
//! x-api-key: <static key>
//!
//! { "email": "alice@example.com", "password": "MyPassword123!" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//! Set-Cookie: refreshToken=...; HttpOnly
//!
//! {
//!   "success": true,
//!   "message": "Login successful",
//!   "accessToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "user": { "id": "64f1", "email": "alice@example.com", "role": "user" }
//! }
//! ```

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod envelope;
pub mod investment;
pub mod transaction;
pub mod wallet;

mod lenient;

pub use admin::*;
pub use auth::*;
pub use dashboard::*;
pub use envelope::*;
pub use investment::*;
pub use transaction::*;
pub use wallet::*;
