//! # Console Commands
//!
//! Command-line front end over [`ApiService`](crate::core::service::ApiService)
//! and [`AdminService`](crate::core::service::AdminService).
//!
//! ```text
//! app/
//! ├── mod.rs       - clap argument tree and the Command it produces
//! └── handlers.rs  - Guards, dispatch and output rendering
//! ```
//!
//! ## Command Flow
//!
//! ```text
//! argv ──Cli::parse──▶ Command ──guard──▶ dispatch ──▶ Outcome (summary lines + JSON)
//!                                 │
//!                                 ├─ require_auth  (everything but login)
//!                                 └─ require_admin (admin ...)
//! ```

pub mod handlers;

pub use handlers::{describe_error, dispatch, require_admin, require_auth, Outcome};

use clap::{Parser, Subcommand};
use shared::{
    AdminSignupRequest, DepositRequest, InvestRequest, TransactionFilter, TransactionKind,
    TransactionStatus, WalletAddressInput, WithdrawRequest,
};

use crate::services::api::Settlement;

#[derive(Debug, Parser)]
#[command(name = "invest", author, version, about = "Console for the crypto investment platform")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command.into()
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        email: String,
        password: String,
        /// Prefill this email at the next login
        #[arg(long, default_value_t = false)]
        remember: bool,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Balance, deposits, withdrawals and active investments
    Dashboard,
    /// Deposit addresses published by the platform
    Wallets,
    /// Report a deposit
    Deposit {
        #[arg(value_parser = parse_amount)]
        amount: f64,
        currency: String,
        /// On-chain transaction hash, when known
        tx_hash: Option<String>,
    },
    /// Request a withdrawal to an address
    Withdraw {
        #[arg(value_parser = parse_amount)]
        amount: f64,
        currency: String,
        address: String,
    },
    /// Open an investment
    Invest {
        #[arg(value_parser = parse_amount)]
        amount: f64,
        #[arg(value_parser = parse_number)]
        roi: f64,
        plan: String,
        start_date: String,
        end_date: String,
    },
    /// Transaction history, optionally filtered
    Transactions {
        /// pending, confirmed or declined (legacy spellings accepted)
        status: Option<String>,
        /// deposit or withdrawal
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
    },
    /// Admin-only commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum AdminCommands {
    /// Platform totals and pending transactions
    Dashboard,
    ConfirmDeposit { id: String },
    DeclineDeposit { id: String },
    ConfirmWithdrawal { id: String },
    DeclineWithdrawal { id: String },
    /// Publish a deposit address
    AddWallet {
        currency: String,
        network: String,
        address: String,
    },
    UpdateWallet {
        id: String,
        currency: String,
        network: String,
        address: String,
    },
    DeleteWallet { id: String },
    /// Create an account
    Signup {
        email: String,
        password: String,
        /// Words are joined with spaces
        full_name: Vec<String>,
    },
}

/// A console command, ready to dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login {
        email: String,
        password: String,
        remember: bool,
    },
    Logout,
    WhoAmI,
    Dashboard,
    Wallets,
    Deposit(DepositRequest),
    Withdraw(WithdrawRequest),
    Invest(InvestRequest),
    Transactions(TransactionFilter),
    AdminDashboard,
    Settle {
        action: Settlement,
        transaction_id: String,
    },
    AddWallet(WalletAddressInput),
    UpdateWallet {
        wallet_id: String,
        wallet: WalletAddressInput,
    },
    DeleteWallet {
        wallet_id: String,
    },
    AdminSignup(AdminSignupRequest),
}

impl Command {
    /// Whether the command needs a stored session
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Command::Login { .. })
    }

    /// Whether the command needs the admin role
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Command::AdminDashboard
                | Command::Settle { .. }
                | Command::AddWallet(_)
                | Command::UpdateWallet { .. }
                | Command::DeleteWallet { .. }
                | Command::AdminSignup(_)
        )
    }
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Login {
                email,
                password,
                remember,
            } => Command::Login {
                email,
                password,
                remember,
            },
            Commands::Logout => Command::Logout,
            Commands::Whoami => Command::WhoAmI,
            Commands::Dashboard => Command::Dashboard,
            Commands::Wallets => Command::Wallets,
            Commands::Deposit {
                amount,
                currency,
                tx_hash,
            } => Command::Deposit(DepositRequest {
                amount,
                currency: currency.to_uppercase(),
                wallet_address: None,
                transaction_hash: tx_hash,
            }),
            Commands::Withdraw {
                amount,
                currency,
                address,
            } => Command::Withdraw(WithdrawRequest {
                amount,
                currency: currency.to_uppercase(),
                wallet_address: address,
            }),
            Commands::Invest {
                amount,
                roi,
                plan,
                start_date,
                end_date,
            } => Command::Invest(InvestRequest {
                amount,
                roi,
                investment_type: plan,
                investment_start_date: start_date,
                investment_end_date: end_date,
            }),
            Commands::Transactions { status, kind } => Command::Transactions(TransactionFilter {
                status: status.map(TransactionStatus::from),
                kind: kind.map(TransactionKind::from),
            }),
            Commands::Admin { command } => command.into(),
        }
    }
}

impl From<AdminCommands> for Command {
    fn from(command: AdminCommands) -> Self {
        let settle = |action, id| Command::Settle {
            action,
            transaction_id: id,
        };
        match command {
            AdminCommands::Dashboard => Command::AdminDashboard,
            AdminCommands::ConfirmDeposit { id } => settle(Settlement::ConfirmDeposit, id),
            AdminCommands::DeclineDeposit { id } => settle(Settlement::DeclineDeposit, id),
            AdminCommands::ConfirmWithdrawal { id } => settle(Settlement::ConfirmWithdrawal, id),
            AdminCommands::DeclineWithdrawal { id } => settle(Settlement::DeclineWithdrawal, id),
            AdminCommands::AddWallet {
                currency,
                network,
                address,
            } => Command::AddWallet(wallet_input(currency, network, address)),
            AdminCommands::UpdateWallet {
                id,
                currency,
                network,
                address,
            } => Command::UpdateWallet {
                wallet_id: id,
                wallet: wallet_input(currency, network, address),
            },
            AdminCommands::DeleteWallet { id } => Command::DeleteWallet { wallet_id: id },
            AdminCommands::Signup {
                email,
                password,
                full_name,
            } => Command::AdminSignup(AdminSignupRequest {
                email,
                password,
                full_name: (!full_name.is_empty()).then(|| full_name.join(" ")),
                role: None,
            }),
        }
    }
}

fn wallet_input(currency: String, network: String, address: String) -> WalletAddressInput {
    WalletAddressInput {
        currency: currency.to_uppercase(),
        network: Some(network),
        address,
    }
}

fn parse_amount(raw: &str) -> Result<f64, String> {
    let amount = parse_number(raw)?;
    if amount <= 0.0 {
        return Err(format!("amount must be positive, got {}", raw));
    }
    Ok(amount)
}

fn parse_number(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("'{}' is not a number", raw))
}
