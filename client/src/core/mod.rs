//! # Core Abstractions
//!
//! Error types and service traits shared by the client and its front ends.
//!
//! ## Modules
//!
//! - **[`error`]**: Client error type (`ApiError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`ApiService`, `AdminService`)
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use client::config::ClientConfig;
//! use client::core::service::ApiService;
//! use client::services::api::ApiClient;
//! use client::session::Session;
//!
//! # fn main() -> client::core::Result<()> {
//! let config = ClientConfig::new("http://localhost:5000/api/", "key");
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(config, Session::in_memory())?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, Result};
pub use service::{AdminService, ApiService};
