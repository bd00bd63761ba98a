//! # Invest Console
//!
//! Command-line front end for the investment platform.
//!
//! ## Usage
//!
//! ```bash
//! INVEST_API_KEY=... cargo run --bin invest -- login alice@example.com hunter2 --remember
//! cargo run --bin invest -- dashboard
//! cargo run --bin invest -- admin confirm-deposit 65f1c0
//! ```
//!
//! The session (access token, user, login time and the refresh-token cookie)
//! is kept in `INVEST_SESSION_FILE` so it survives between invocations. An
//! access token that expired since the last run is refreshed on first use.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use client::app::{self, Cli, Outcome};
use client::session::{FileStore, Session};
use client::{ApiClient, ClientConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let command = Cli::parse().into_command();

    // Load environment variables
    dotenvy::dotenv().ok();

    let _log_guard = client::debug::init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Configuration error: {}", message);
            return ExitCode::from(2);
        }
    };
    let base_url = config.base_url.clone();

    match run(config, command).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            if outcome.is_failure() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(error) => {
            tracing::error!(error = %format!("{:#}", error), "Command failed");
            eprintln!("{}", app::describe_error(&error, &base_url));
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ClientConfig, command: app::Command) -> anyhow::Result<Outcome> {
    let store = FileStore::new(config.session_file.clone());
    let session = Session::new(Arc::new(store));
    let client = ApiClient::new(config, session.clone()).context("Failed to create API client")?;

    tracing::info!(base_url = %client.config().base_url, "Client ready");

    app::dispatch(&client, &session, command).await
}

fn print_outcome(outcome: &Outcome) {
    for line in &outcome.summary {
        println!("{}", line);
    }
    if !outcome.body.is_null() {
        match serde_json::to_string_pretty(&outcome.body) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Failed to render response: {}", e),
        }
    }
}
