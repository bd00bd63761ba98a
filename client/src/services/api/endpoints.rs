//! Endpoint paths, relative to the configured base URL (which ends in `/api/`).

use shared::TransactionFilter;

pub const LOGIN: &str = "auth/login";
pub const LOGOUT: &str = "auth/logout";
pub const REFRESH: &str = "auth/refresh-token";

pub const DASHBOARD: &str = "user/dashboard";
pub const WALLETS: &str = "wallets";
pub const DEPOSIT: &str = "transactions/deposit";
pub const WITHDRAW: &str = "transactions/withdraw";
pub const TRANSACTIONS: &str = "transactions";
pub const INVESTMENTS: &str = "investments";

pub const ADMIN_DASHBOARD: &str = "admin/dashboard";
pub const ADMIN_SIGNUP: &str = "admin/signup";
pub const ADMIN_WALLETS: &str = "admin/wallets";

/// Admin decision on a pending deposit or withdrawal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    ConfirmDeposit,
    DeclineDeposit,
    ConfirmWithdrawal,
    DeclineWithdrawal,
}

impl Settlement {
    pub fn path(self, transaction_id: &str) -> String {
        let (collection, action) = match self {
            Settlement::ConfirmDeposit => ("deposits", "confirm"),
            Settlement::DeclineDeposit => ("deposits", "decline"),
            Settlement::ConfirmWithdrawal => ("withdrawals", "confirm"),
            Settlement::DeclineWithdrawal => ("withdrawals", "decline"),
        };
        format!(
            "admin/{}/{}/{}",
            collection,
            urlencoding::encode(transaction_id),
            action
        )
    }
}

pub fn admin_wallet(wallet_id: &str) -> String {
    format!("{}/{}", ADMIN_WALLETS, urlencoding::encode(wallet_id))
}

/// `transactions` with the filter as a query string, or bare when unfiltered.
pub fn transactions(filter: &TransactionFilter) -> String {
    let query = filter
        .pairs()
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        TRANSACTIONS.to_string()
    } else {
        format!("{}?{}", TRANSACTIONS, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{TransactionKind, TransactionStatus};

    #[test]
    fn test_settlement_paths() {
        assert_eq!(Settlement::ConfirmDeposit.path("t1"), "admin/deposits/t1/confirm");
        assert_eq!(Settlement::DeclineWithdrawal.path("t 2"), "admin/withdrawals/t%202/decline");
    }

    #[test]
    fn test_transactions_query() {
        assert_eq!(transactions(&TransactionFilter::default()), "transactions");

        let filter = TransactionFilter::default()
            .with_status(TransactionStatus::Other("on hold".to_string()))
            .with_kind(TransactionKind::Withdrawal);
        assert_eq!(transactions(&filter), "transactions?status=on%20hold&type=withdrawal");
    }

    #[test]
    fn test_admin_wallet_path() {
        assert_eq!(admin_wallet("w/1"), "admin/wallets/w%2F1");
    }
}
