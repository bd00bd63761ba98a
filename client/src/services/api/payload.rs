//! Payload shaping for write endpoints.
//!
//! Front-end forms carry more state than the backend accepts (display labels,
//! computed totals, selected plan objects). Each write endpoint forwards only
//! its own fields; everything else a caller passes is dropped here.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::error::{ApiError, Result};

pub const DEPOSIT_FIELDS: &[&str] = &["amount", "currency", "walletAddress", "transactionHash"];
pub const WITHDRAW_FIELDS: &[&str] = &["amount", "currency", "walletAddress"];
pub const INVEST_FIELDS: &[&str] = &[
    "amount",
    "roi",
    "investmentType",
    "investmentStartDate",
    "investmentEndDate",
];
pub const WALLET_FIELDS: &[&str] = &["currency", "network", "address"];
pub const ADMIN_SIGNUP_FIELDS: &[&str] = &["email", "password", "fullName", "role"];

/// Serialize `form` and keep only the `allowed` top-level keys.
pub fn whitelist<T: Serialize + ?Sized>(form: &T, allowed: &[&str]) -> Result<Value> {
    let value = serde_json::to_value(form).map_err(|e| ApiError::Validation(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ApiError::Validation(
            "form must serialize to a JSON object".to_string(),
        ));
    };

    let shaped: Map<String, Value> = fields
        .into_iter()
        .filter(|(key, _)| allowed.contains(&key.as_str()))
        .collect();

    Ok(Value::Object(shaped))
}
