use serde::{Deserialize, Serialize};

use super::investment::Investment;
use super::lenient;
use super::transaction::Transaction;

/// User dashboard summary
///
/// Totals are computed by the backend; the client only displays them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default, deserialize_with = "lenient::amount")]
    pub balance: f64,
    #[serde(default, alias = "totalDeposits", deserialize_with = "lenient::amount")]
    pub total_deposit: f64,
    #[serde(default, alias = "totalWithdrawals", deserialize_with = "lenient::amount")]
    pub total_withdrawal: f64,
    #[serde(default, alias = "profit", deserialize_with = "lenient::amount")]
    pub total_profit: f64,
    #[serde(default, alias = "investments")]
    pub active_investments: Vec<Investment>,
    #[serde(default, alias = "transactions")]
    pub recent_transactions: Vec<Transaction>,
}

impl DashboardSummary {
    /// Principal currently locked in investments
    pub fn invested_total(&self) -> f64 {
        self.active_investments.iter().map(|i| i.amount).sum()
    }
}
