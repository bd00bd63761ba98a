use serde::{Deserialize, Serialize};

use super::lenient;
use super::transaction::Transaction;

fn default_role() -> String {
    "user".to_string()
}

/// One row of the admin user table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id_string")]
    pub id: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Admin console overview
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    #[serde(default)]
    pub users: Vec<UserSummary>,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total_deposits: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total_withdrawals: f64,
    #[serde(default, alias = "pending")]
    pub pending_transactions: Vec<Transaction>,
}

impl AdminDashboard {
    /// Number of users, preferring the backend's count over the page length
    pub fn user_count(&self) -> u64 {
        if self.total_users > 0 {
            self.total_users
        } else {
            self.users.len() as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_count_falls_back_to_rows() {
        let json = r#"{
            "users": [
                {"_id": 1, "email": "a@example.com", "balance": "10"},
                {"_id": 2, "email": "b@example.com", "role": "admin", "name": "Bee"}
            ],
            "pending": [{"id": "t1", "type": "deposit", "amount": 5, "currency": "BTC"}]
        }"#;
        let dashboard: AdminDashboard = serde_json::from_str(json).unwrap();

        assert_eq!(dashboard.user_count(), 2);
        assert_eq!(dashboard.users[0].role, "user");
        assert_eq!(dashboard.users[1].full_name.as_deref(), Some("Bee"));
        assert_eq!(dashboard.pending_transactions.len(), 1);
    }
}
