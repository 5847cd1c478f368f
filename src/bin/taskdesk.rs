//! Command-line front end for taskdesk.
//!
//! Usage:
//!
//! ```text
//! taskdesk init
//! taskdesk company add "Acme Ltd" 11.111.111/0001-11
//! taskdesk branch add --company 1 22.222.222/0001-22 "São Paulo" SP
//! taskdesk task add "File ICMS" 2024-05-10 --branch 1
//! taskdesk -H task pending
//! taskdesk task close 1
//! ```
//!
//! Configuration is read from `TASKDESK_*` environment variables (see
//! [`taskdesk::config`]). Results are printed as JSON unless `-H` is given.
//! Logs go to stderr and follow `RUST_LOG`.

#[path = "taskdesk/cli.rs"]
mod cli;
#[path = "taskdesk/commands.rs"]
mod commands;


use clap::Parser;
use cli::Cli;
use commands::App;
use std::io::{self, Write};
use std::process::ExitCode;
use taskdesk::config::AppConfig;
use taskdesk::error::AppResult;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut stderr = io::stderr().lock();
            if writeln!(stderr, "error: {err}").is_err() {
                tracing::error!(error = %err, "command failed");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::from_env()?;
    let app = App::open(config, cli.human_readable)?;
    app.run(cli.command).await
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
