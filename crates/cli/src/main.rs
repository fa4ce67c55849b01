mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use embedkit_core::config::{load_dotenv, Config};

use crate::cli::{CliArgs, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Before parsing, so env-backed flags see values from .env.
    load_dotenv();
    let args = CliArgs::parse();

    let config = match args.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    config.log_summary();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &args.command {
        Command::Extract(extract) => commands::run_extract(&config, extract, &mut out).await,
        Command::Describe => commands::run_describe(&config, &mut out),
        Command::Config => commands::run_config(&config, &mut out),
    }
}
