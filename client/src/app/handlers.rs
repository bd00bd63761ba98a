//! Command dispatch
//!
//! Runs a parsed [`Command`] against the service traits and renders the result
//! as summary lines plus the JSON the backend returned.

use anyhow::{bail, Context};
use serde::Serialize;
use serde_json::{json, Value};
use shared::{format_amount, truncate_address, ApiEnvelope};

use super::Command;
use crate::core::error::ApiError;
use crate::core::service::{AdminService, ApiService};
use crate::services::api::Reply;
use crate::session::Session;

/// What a command produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// Human-readable lines printed before the body
    pub summary: Vec<String>,
    /// Pretty-printed after the summary; `Null` prints nothing
    pub body: Value,
}

impl Outcome {
    fn message(line: impl Into<String>) -> Self {
        Self {
            summary: vec![line.into()],
            body: Value::Null,
        }
    }

    fn with_line(mut self, line: impl Into<String>) -> Self {
        self.summary.push(line.into());
        self
    }

    /// The backend reported `success: false` (soft failure or envelope flag)
    pub fn is_failure(&self) -> bool {
        self.body.get("success").and_then(Value::as_bool) == Some(false)
    }
}

/// Fail unless a session is stored
pub fn require_auth(session: &Session) -> anyhow::Result<()> {
    if !session.is_authenticated() {
        bail!("Not signed in. Run `invest login <email> <password>` first.");
    }
    Ok(())
}

/// Fail unless the stored user has the admin role
pub fn require_admin(session: &Session) -> anyhow::Result<()> {
    require_auth(session)?;
    if !session.is_admin() {
        bail!("This command requires an admin account.");
    }
    Ok(())
}

/// Run a command, applying the auth and admin guards first
pub async fn dispatch<S>(service: &S, session: &Session, command: Command) -> anyhow::Result<Outcome>
where
    S: ApiService + AdminService,
{
    if command.requires_admin() {
        require_admin(session)?;
    } else if command.requires_auth() {
        require_auth(session)?;
    }

    let outcome = match command {
        Command::Login {
            email,
            password,
            remember,
        } => {
            let auth = ApiService::login(service, &email, &password, remember).await?;
            let role = auth
                .user
                .as_ref()
                .map(|u| u.role.clone())
                .unwrap_or_else(|| "user".to_string());
            Outcome::message(format!("Signed in as {} ({})", email, role))
        }
        Command::Logout => {
            ApiService::logout(service)
                .await
                .context("Signed out locally, but the server did not confirm the logout")?;
            Outcome::message("Signed out")
        }
        Command::WhoAmI => {
            let user = session.user()?;
            let since = session
                .login_timestamp()?
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "unknown".to_string());
            Outcome {
                summary: vec![format!("Signed in since {}", since)],
                body: serde_json::to_value(user)?,
            }
        }

        Command::Dashboard => {
            let reply = service.get_dashboard_data().await?;
            let mut outcome = render(&reply)?;
            if let Reply::Data(envelope) = &reply {
                let summary = &envelope.data;
                outcome = outcome
                    .with_line(format!("Balance:     {}", format_amount(summary.balance, "USD")))
                    .with_line(format!("Deposited:   {}", format_amount(summary.total_deposit, "USD")))
                    .with_line(format!("Withdrawn:   {}", format_amount(summary.total_withdrawal, "USD")))
                    .with_line(format!("Profit:      {}", format_amount(summary.total_profit, "USD")))
                    .with_line(format!("Invested:    {}", format_amount(summary.invested_total(), "USD")));
            }
            outcome
        }
        Command::Wallets => {
            let reply = service.get_wallets().await?;
            let mut outcome = render(&reply)?;
            if let Reply::Data(envelope) = &reply {
                for wallet in &envelope.data {
                    outcome = outcome.with_line(format!(
                        "{:<6} {:<10} {}",
                        wallet.currency,
                        wallet.network.as_deref().unwrap_or("-"),
                        truncate_address(&wallet.address)
                    ));
                }
            }
            outcome
        }
        Command::Deposit(request) => {
            let line = format!("Deposit of {} submitted", format_amount(request.amount, &request.currency));
            render_submission(service.deposit(&request).await?, line)?
        }
        Command::Withdraw(request) => {
            let line = format!(
                "Withdrawal of {} to {} requested",
                format_amount(request.amount, &request.currency),
                truncate_address(&request.wallet_address)
            );
            render_submission(service.withdraw(&request).await?, line)?
        }
        Command::Invest(request) => {
            let line = format!("Invested {:.2} in {}", request.amount, request.investment_type);
            render_submission(service.invest(&request).await?, line)?
        }
        Command::Transactions(filter) => {
            let reply = service.get_transactions(&filter).await?;
            let mut outcome = render(&reply)?;
            if let Reply::Data(envelope) = &reply {
                for tx in &envelope.data {
                    outcome = outcome.with_line(format!(
                        "{:<10} {:<10} {:>20}  {}",
                        tx.kind.as_str(),
                        tx.status.as_str(),
                        format_amount(tx.amount, &tx.currency),
                        tx.id
                    ));
                }
            }
            outcome
        }

        Command::AdminDashboard => {
            let reply = service.get_admin_dashboard().await?;
            let mut outcome = render(&reply)?;
            if let Reply::Data(envelope) = &reply {
                let dashboard = &envelope.data;
                outcome = outcome
                    .with_line(format!("Users:       {}", dashboard.user_count()))
                    .with_line(format!("Deposits:    {}", format_amount(dashboard.total_deposits, "USD")))
                    .with_line(format!("Withdrawals: {}", format_amount(dashboard.total_withdrawals, "USD")))
                    .with_line(format!("Pending:     {}", dashboard.pending_transactions.len()));
            }
            outcome
        }
        Command::Settle {
            action,
            transaction_id,
        } => {
            let line = format!("{:?} applied to {}", action, transaction_id);
            render_submission(service.settle(action, &transaction_id).await?, line)?
        }
        Command::AddWallet(wallet) => {
            let line = format!("Added {} wallet {}", wallet.currency, truncate_address(&wallet.address));
            render_submission(service.add_wallet(&wallet).await?, line)?
        }
        Command::UpdateWallet { wallet_id, wallet } => {
            let line = format!("Updated wallet {}", wallet_id);
            render_submission(service.update_wallet(&wallet_id, &wallet).await?, line)?
        }
        Command::DeleteWallet { wallet_id } => {
            let line = format!("Deleted wallet {}", wallet_id);
            render_submission(service.delete_wallet(&wallet_id).await?, line)?
        }
        Command::AdminSignup(request) => {
            let line = format!("Created account {}", request.email);
            render_submission(service.admin_signup(&request).await?, line)?
        }
    };

    Ok(outcome)
}

/// Body of a reply as the backend sent it, or the synthetic soft-failure object
fn render<T: Serialize>(reply: &Reply<T>) -> anyhow::Result<Outcome> {
    let body = match reply {
        Reply::Data(data) => serde_json::to_value(data)?,
        Reply::SoftFailure { message, raw } => json!({
            "success": false,
            "message": message,
            "raw": raw,
        }),
    };
    Ok(Outcome {
        summary: Vec::new(),
        body,
    })
}

/// Render a write and add `line` only when the backend accepted it
fn render_submission<T: Serialize>(
    reply: Reply<ApiEnvelope<T>>,
    line: String,
) -> anyhow::Result<Outcome> {
    let accepted = matches!(&reply, Reply::Data(envelope) if envelope.is_success());
    let outcome = render(&reply)?;
    Ok(if accepted { outcome.with_line(line) } else { outcome })
}

/// User-facing text for a failed command
pub fn describe_error(error: &anyhow::Error, base_url: &str) -> String {
    match error.downcast_ref::<ApiError>() {
        Some(api) if api.is_network() => format!(
            "Cannot reach the server at {}. Check your connection and that the backend is running.\n({})",
            base_url, api
        ),
        Some(ApiError::SessionExpired(_)) => {
            "Your session has expired. Run `invest login <email> <password>` again.".to_string()
        }
        _ => format!("{:#}", error),
    }
}
