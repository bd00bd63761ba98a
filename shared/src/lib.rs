//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the investment platform backend and
//! its clients. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login, admin signup, user and session payloads
//!   - **[`dto::dashboard`]**: User dashboard summary
//!   - **[`dto::wallet`]**: Platform deposit addresses
//!   - **[`dto::transaction`]**: Deposits, withdrawals and history filters
//!   - **[`dto::investment`]**: Investment plans and purchases
//!   - **[`dto::admin`]**: Admin console dashboard
//! - **[`utils`]**: Display helpers shared by front ends
//!
//! ## Wire Format
//!
//! The backend speaks **camelCase** JSON. Every DTO carries
//! `#[serde(rename_all = "camelCase")]` so Rust code stays snake_case.
//!
//! Older backend builds used different names for some fields (`_id`, `coin`,
//! `investmentType`, `approved`). Those are accepted on input through serde
//! aliases and adapter records, so a response is normalized exactly once when it
//! is decoded and the rest of the code only ever sees the canonical shape.
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::investment::Investment;
//!
//! let legacy = r#"{"_id": 7, "investmentType": "gold", "amount": "250", "roi": 12}"#;
//! let investment: Investment = serde_json::from_str(legacy).unwrap();
//!
//! assert_eq!(investment.id, "7");
//! assert_eq!(investment.plan, "gold");
//! assert_eq!(investment.amount, 250.0);
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
