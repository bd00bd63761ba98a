//! # Investment Endpoints

use serde::Serialize;
use shared::{ApiEnvelope, Investment};

use super::client::ApiClient;
use super::endpoints;
use super::payload::{whitelist, INVEST_FIELDS};
use super::request::{Reply, RequestOptions};
use crate::core::error::Result;

/// Buy into an investment plan.
///
/// Forwards exactly `amount`, `roi`, `investmentType`, `investmentStartDate`
/// and `investmentEndDate`; any other field on `form` is dropped.
#[tracing::instrument(skip(client, form))]
pub async fn invest<F: Serialize + ?Sized>(
    client: &ApiClient,
    form: &F,
) -> Result<Reply<ApiEnvelope<Option<Investment>>>> {
    let body = whitelist(form, INVEST_FIELDS)?;
    client
        .call(endpoints::INVESTMENTS, RequestOptions::post().with_json(&body)?)
        .await
}
