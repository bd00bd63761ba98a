//! # Logging Infrastructure
//!
//! File-based structured logging for the `invest` binary. The library itself
//! only emits `tracing` events; installing a subscriber is left to the binary.
//!
//! ## Usage
//!
//! ```rust,no_run
//! // Keep the guard alive until exit so buffered lines are flushed
//! let _guard = client::debug::init();
//!
//! tracing::info!(endpoint = "wallets", duration_ms = 42, "API call completed");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `client=debug,info`)
//! - `INVEST_LOG_DIR`: Log directory (default: `logs`)

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;
