//! # Investment DTOs
//!
//! Investment records are decoded through [`InvestmentRecord`], which accepts
//! both the current field names and the older ones (`investmentType` for the
//! plan, `investmentStartDate`/`investmentEndDate` for the term), and converts
//! into the canonical [`Investment`].

use serde::{Deserialize, Serialize};

use super::lenient;

/// An investment held by a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "InvestmentRecord")]
pub struct Investment {
    pub id: String,
    pub plan: String,
    pub amount: f64,
    pub roi: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Every spelling of an investment the backend has produced
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvestmentRecord {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id_string")]
    id: String,
    #[serde(default)]
    plan: Option<String>,
    #[serde(default)]
    investment_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    amount: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    roi: f64,
    #[serde(default, alias = "investmentStartDate")]
    start_date: Option<String>,
    #[serde(default, alias = "investmentEndDate")]
    end_date: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl From<InvestmentRecord> for Investment {
    fn from(record: InvestmentRecord) -> Self {
        Self {
            id: record.id,
            plan: record.plan.or(record.investment_type).unwrap_or_default(),
            amount: record.amount,
            roi: record.roi,
            start_date: record.start_date,
            end_date: record.end_date,
            status: record.status,
        }
    }
}

/// Investment purchase form
///
/// Serializes to exactly the fields the investment endpoint accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestRequest {
    pub amount: f64,
    pub roi: f64,
    pub investment_type: String,
    pub investment_start_date: String,
    pub investment_end_date: String,
}
