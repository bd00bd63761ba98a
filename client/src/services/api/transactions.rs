//! # Transaction Endpoints
//!
//! Deposit and withdrawal submission, history, and admin settlement.
//! Amounts are settled by the backend; these calls only submit requests.

use serde::Serialize;
use shared::{ApiEnvelope, Transaction, TransactionFilter};

use super::client::ApiClient;
use super::endpoints::{self, Settlement};
use super::payload::{whitelist, DEPOSIT_FIELDS, WITHDRAW_FIELDS};
use super::request::{Reply, RequestOptions};
use crate::core::error::Result;

type TransactionReply = Reply<ApiEnvelope<Option<Transaction>>>;

/// Submit a deposit for admin confirmation.
#[tracing::instrument(skip(client, form))]
pub async fn deposit<F: Serialize + ?Sized>(client: &ApiClient, form: &F) -> Result<TransactionReply> {
    let body = whitelist(form, DEPOSIT_FIELDS)?;
    client
        .call(endpoints::DEPOSIT, RequestOptions::post().with_json(&body)?)
        .await
}

/// Request a withdrawal to the payout address in the form.
#[tracing::instrument(skip(client, form))]
pub async fn withdraw<F: Serialize + ?Sized>(client: &ApiClient, form: &F) -> Result<TransactionReply> {
    let body = whitelist(form, WITHDRAW_FIELDS)?;
    client
        .call(endpoints::WITHDRAW, RequestOptions::post().with_json(&body)?)
        .await
}

/// Transaction history, optionally filtered by status and kind.
pub async fn get_transactions(
    client: &ApiClient,
    filter: &TransactionFilter,
) -> Result<Reply<ApiEnvelope<Vec<Transaction>>>> {
    client
        .call(&endpoints::transactions(filter), RequestOptions::get())
        .await
}

/// Confirm or decline a pending deposit or withdrawal (admin).
#[tracing::instrument(skip(client), fields(transaction_id = %transaction_id))]
pub async fn settle(
    client: &ApiClient,
    action: Settlement,
    transaction_id: &str,
) -> Result<TransactionReply> {
    tracing::info!(?action, "Settling transaction");
    client
        .call(&action.path(transaction_id), RequestOptions::post())
        .await
}

pub async fn confirm_deposit(client: &ApiClient, transaction_id: &str) -> Result<TransactionReply> {
    settle(client, Settlement::ConfirmDeposit, transaction_id).await
}

pub async fn decline_deposit(client: &ApiClient, transaction_id: &str) -> Result<TransactionReply> {
    settle(client, Settlement::DeclineDeposit, transaction_id).await
}

pub async fn confirm_withdrawal(client: &ApiClient, transaction_id: &str) -> Result<TransactionReply> {
    settle(client, Settlement::ConfirmWithdrawal, transaction_id).await
}

pub async fn decline_withdrawal(client: &ApiClient, transaction_id: &str) -> Result<TransactionReply> {
    settle(client, Settlement::DeclineWithdrawal, transaction_id).await
}
