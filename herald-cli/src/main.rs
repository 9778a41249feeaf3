//! Herald CLI
//!
//! Triggers a Jenkins job, waits for the build to finish and posts the
//! result to a Slack channel.
//!
//! Architecture:
//! - Configuration: flags, environment variables, optional TOML file
//! - Repositories: trait seams over the Jenkins and Slack HTTP clients
//! - Pipeline: the trigger → poll → notify driver
//! - Commands: the full run plus one-shot trigger/status/notify helpers

mod commands;
mod config;
mod pipeline;
mod repository;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{Commands, handle_command};
use crate::config::{Config, ConfigArgs};

#[derive(Debug, Parser)]
#[command(name = "herald")]
#[command(about = "Trigger a Jenkins job, wait for the build, report to Slack", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "herald=info,herald_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config)?;

    handle_command(cli.command.unwrap_or(Commands::Run), &config).await
}
