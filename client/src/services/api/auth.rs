//! # Authentication Endpoints
//!
//! Login, logout and admin-created accounts. Login and logout never refresh
//! on 401: a rejected login is a wrong password, not an expired token.

use serde::Serialize;
use shared::{ApiEnvelope, AuthResponse, LoginRequest, UserSummary};

use super::client::ApiClient;
use super::endpoints;
use super::payload::{whitelist, ADMIN_SIGNUP_FIELDS};
use super::request::{Reply, RequestOptions};
use crate::core::error::{ApiError, Result};

/// Sign in and start a session.
///
/// Stores the access token, the user, the login time and the refresh-token
/// cookie. With `remember` the email is kept for the next login prompt; without
/// it any remembered email is forgotten.
#[tracing::instrument(skip(client, password), fields(email = %email))]
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
    remember: bool,
) -> Result<AuthResponse> {
    tracing::info!("Attempting login");

    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let options = RequestOptions::post().with_json(&request)?.without_refresh();

    let auth: AuthResponse = client
        .call(endpoints::LOGIN, options)
        .await?
        .into_result()?;

    let Some(token) = auth.access_token.as_deref().filter(|t| !t.is_empty()) else {
        let reason = auth
            .message
            .clone()
            .unwrap_or_else(|| "login response did not include an access token".to_string());
        tracing::warn!(reason = %reason, "Login refused");
        return Err(ApiError::Rejected(reason));
    };

    client.session().begin(token, auth.user.as_ref())?;
    client
        .session()
        .remember_username(remember.then_some(email))?;
    client.persist_cookies()?;
    client.refresh.forget_failure();

    tracing::info!(
        role = auth.user.as_ref().map(|u| u.role.as_str()).unwrap_or("unknown"),
        "Login successful"
    );
    Ok(auth)
}

/// Sign out. The local session is cleared even when the backend call fails;
/// the backend error is still returned so callers can mention it.
#[tracing::instrument(skip(client))]
pub async fn logout(client: &ApiClient) -> Result<()> {
    let outcome = client
        .execute(endpoints::LOGOUT, &RequestOptions::post().without_refresh())
        .await;

    client.clear_auth()?;

    match outcome {
        Ok(_) => {
            tracing::info!("Logged out");
            Ok(())
        }
        Err(error) => {
            tracing::warn!(error = %error, "Backend logout failed; local session cleared");
            Err(error)
        }
    }
}

/// Create an account from the admin console. Requires an admin session; the
/// current session is left untouched.
#[tracing::instrument(skip(client, form))]
pub async fn admin_signup<F: Serialize + ?Sized>(
    client: &ApiClient,
    form: &F,
) -> Result<Reply<ApiEnvelope<Option<UserSummary>>>> {
    let body = whitelist(form, ADMIN_SIGNUP_FIELDS)?;
    client
        .call(endpoints::ADMIN_SIGNUP, RequestOptions::post().with_json(&body)?)
        .await
}
