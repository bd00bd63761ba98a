//! # Wallet Address Endpoints
//!
//! Platform deposit addresses. Users list them; admins add, edit and remove them.

use serde::Serialize;
use serde_json::Value;
use shared::{ApiEnvelope, WalletAddress};

use super::client::ApiClient;
use super::endpoints;
use super::payload::{whitelist, WALLET_FIELDS};
use super::request::{Reply, RequestOptions};
use crate::core::error::Result;

/// Deposit addresses, returned as the backend sent them (`{data: [...]}`).
pub async fn get_wallets(client: &ApiClient) -> Result<Reply<ApiEnvelope<Vec<WalletAddress>>>> {
    client.call(endpoints::WALLETS, RequestOptions::get()).await
}

#[tracing::instrument(skip(client, form))]
pub async fn add_wallet<F: Serialize + ?Sized>(
    client: &ApiClient,
    form: &F,
) -> Result<Reply<ApiEnvelope<Option<WalletAddress>>>> {
    let body = whitelist(form, WALLET_FIELDS)?;
    client
        .call(endpoints::ADMIN_WALLETS, RequestOptions::post().with_json(&body)?)
        .await
}

#[tracing::instrument(skip(client, form), fields(wallet_id = %wallet_id))]
pub async fn update_wallet<F: Serialize + ?Sized>(
    client: &ApiClient,
    wallet_id: &str,
    form: &F,
) -> Result<Reply<ApiEnvelope<Option<WalletAddress>>>> {
    let body = whitelist(form, WALLET_FIELDS)?;
    client
        .call(
            &endpoints::admin_wallet(wallet_id),
            RequestOptions::put().with_json(&body)?,
        )
        .await
}

#[tracing::instrument(skip(client), fields(wallet_id = %wallet_id))]
pub async fn delete_wallet(client: &ApiClient, wallet_id: &str) -> Result<Reply<ApiEnvelope<Value>>> {
    client
        .call(&endpoints::admin_wallet(wallet_id), RequestOptions::delete())
        .await
}
