//! # Service Traits
//!
//! Traits for dependency injection, so front-end code can run against a mock
//! backend in tests.

use async_trait::async_trait;
use serde_json::Value;
use shared::{
    AdminDashboard, AdminSignupRequest, ApiEnvelope, AuthResponse, DashboardSummary,
    DepositRequest, InvestRequest, Investment, Transaction, TransactionFilter, UserSummary,
    WalletAddress, WalletAddressInput, WithdrawRequest,
};

use super::error::Result;
use crate::services::api::{Reply, Settlement};

/// Operations available to any signed-in user.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Sign in and start a session
    async fn login(&self, email: &str, password: &str, remember: bool) -> Result<AuthResponse>;

    /// Sign out; the local session is always cleared
    async fn logout(&self) -> Result<()>;

    async fn get_dashboard_data(&self) -> Result<Reply<ApiEnvelope<DashboardSummary>>>;

    async fn get_wallets(&self) -> Result<Reply<ApiEnvelope<Vec<WalletAddress>>>>;

    async fn deposit(&self, request: &DepositRequest) -> Result<Reply<ApiEnvelope<Option<Transaction>>>>;

    async fn withdraw(&self, request: &WithdrawRequest) -> Result<Reply<ApiEnvelope<Option<Transaction>>>>;

    async fn invest(&self, request: &InvestRequest) -> Result<Reply<ApiEnvelope<Option<Investment>>>>;

    async fn get_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Reply<ApiEnvelope<Vec<Transaction>>>>;
}

/// Admin console operations.
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn get_admin_dashboard(&self) -> Result<Reply<ApiEnvelope<AdminDashboard>>>;

    async fn admin_signup(
        &self,
        request: &AdminSignupRequest,
    ) -> Result<Reply<ApiEnvelope<Option<UserSummary>>>>;

    async fn settle(
        &self,
        action: Settlement,
        transaction_id: &str,
    ) -> Result<Reply<ApiEnvelope<Option<Transaction>>>>;

    async fn add_wallet(
        &self,
        wallet: &WalletAddressInput,
    ) -> Result<Reply<ApiEnvelope<Option<WalletAddress>>>>;

    async fn update_wallet(
        &self,
        wallet_id: &str,
        wallet: &WalletAddressInput,
    ) -> Result<Reply<ApiEnvelope<Option<WalletAddress>>>>;

    async fn delete_wallet(&self, wallet_id: &str) -> Result<Reply<ApiEnvelope<Value>>>;
}
