//! `mailroom` - command-line webmail client
//!
//! Drafts, inbox and account management against a mailroom backend.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod command;
mod prompt;
mod render;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use command::App;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailroom=info,mailroom_core=info,mailroom_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    debug!(command = ?cli.command, "Starting mailroom");

    let mut app = match App::load(&cli).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let during_login = matches!(cli.command, cli::Command::Login { .. });
    match app.execute(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if command::session_lost(&e, during_login) {
                app.forget_session();
                eprintln!("Please log in again with `mailroom login`.");
            }
            ExitCode::FAILURE
        }
    }
}
