//! # Transaction DTOs
//!
//! Deposits and withdrawals share one record shape. The backend has spelled
//! kinds and statuses several ways over time (`withdraw`/`withdrawal`,
//! `approved`/`confirmed`, capitalized or not), so both enums decode through
//! `From<String>` and keep anything unrecognized in an `Other` variant instead of
//! failing the whole response.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lenient;

/// Direction of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Other(String),
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Other(raw) => raw,
        }
    }
}

impl From<String> for TransactionKind {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "deposit" => TransactionKind::Deposit,
            "withdraw" | "withdrawal" => TransactionKind::Withdrawal,
            _ => TransactionKind::Other(raw),
        }
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement status, decided by an admin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
    Other(String),
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Declined => "declined",
            TransactionStatus::Other(raw) => raw,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, TransactionStatus::Confirmed | TransactionStatus::Declined)
    }
}

impl From<String> for TransactionStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "processing" => TransactionStatus::Pending,
            "confirmed" | "approved" | "completed" | "success" => TransactionStatus::Confirmed,
            "declined" | "rejected" | "failed" => TransactionStatus::Declined,
            _ => TransactionStatus::Other(raw),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deposit or withdrawal as listed in history and admin queues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id_string")]
    pub id: String,
    #[serde(rename = "type", alias = "transactionType")]
    pub kind: TransactionKind,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: f64,
    #[serde(default, alias = "coin", alias = "symbol")]
    pub currency: String,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, alias = "address", skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default, alias = "date", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, alias = "email", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// Deposit submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub amount: f64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

/// Withdrawal submission; the payout address is always supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    pub amount: f64,
    pub currency: String,
    pub wallet_address: String,
}

/// Optional filters for the transaction list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub status: Option<TransactionStatus>,
    pub kind: Option<TransactionKind>,
}

impl TransactionFilter {
    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Query parameters in wire order, unencoded
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(status) = &self.status {
            pairs.push(("status", status.as_str()));
        }
        if let Some(kind) = &self.kind {
            pairs.push(("type", kind.as_str()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_transaction_shape() {
        let json = r#"{
            "_id": 17,
            "transactionType": "Withdraw",
            "amount": "1500",
            "coin": "USDT",
            "status": "Approved",
            "address": "TXabc",
            "date": "2024-03-01"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.id, "17");
        assert_eq!(tx.kind, TransactionKind::Withdrawal);
        assert_eq!(tx.amount, 1500.0);
        assert_eq!(tx.currency, "USDT");
        assert_eq!(tx.status, TransactionStatus::Confirmed);
        assert_eq!(tx.wallet_address.as_deref(), Some("TXabc"));
        assert_eq!(tx.created_at.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_canonical_serialization() {
        let tx: Transaction =
            serde_json::from_str(r#"{"id": "a1", "type": "deposit", "amount": 5, "currency": "BTC"}"#).unwrap();
        assert_eq!(tx.status, TransactionStatus::Pending);

        let out = serde_json::to_value(&tx).unwrap();
        assert_eq!(out["type"], "deposit");
        assert_eq!(out["status"], "pending");
        assert!(out.get("walletAddress").is_none());
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let status = TransactionStatus::from("on-hold".to_string());
        assert_eq!(status, TransactionStatus::Other("on-hold".to_string()));
        assert!(!status.is_final());
        assert_eq!(status.to_string(), "on-hold");
    }

    #[test]
    fn test_filter_pairs() {
        let filter = TransactionFilter::default()
            .with_status(TransactionStatus::Pending)
            .with_kind(TransactionKind::Deposit);
        assert_eq!(filter.pairs(), vec![("status", "pending"), ("type", "deposit")]);
        assert!(TransactionFilter::default().pairs().is_empty());
    }
}
