//! # Dashboard Endpoints
//!
//! User and admin overview screens.

use shared::{AdminDashboard, ApiEnvelope, DashboardSummary};

use super::client::ApiClient;
use super::endpoints;
use super::request::{Reply, RequestOptions};
use crate::core::error::Result;

/// Balance, totals, active investments and recent transactions for the signed-in user.
pub async fn get_dashboard_data(client: &ApiClient) -> Result<Reply<ApiEnvelope<DashboardSummary>>> {
    client.call(endpoints::DASHBOARD, RequestOptions::get()).await
}

/// User table and platform totals for the admin console.
pub async fn get_admin_dashboard(client: &ApiClient) -> Result<Reply<ApiEnvelope<AdminDashboard>>> {
    client.call(endpoints::ADMIN_DASHBOARD, RequestOptions::get()).await
}
