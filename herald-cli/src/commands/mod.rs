//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod jenkins;
mod notify;
mod run;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use herald_core::domain::build::{BuildResult, BuildResultKind};

use crate::config::Config;

/// Top-level CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Trigger the job, wait for the build, notify Slack (default)
    Run,
    /// Trigger the job and exit
    Trigger,
    /// Show the current status of the watched build
    Status {
        /// Print the raw status payload as JSON
        #[arg(long)]
        json: bool,
    },
    /// Post the notification for a given build status
    Notify {
        /// Build status to report, e.g. SUCCESS
        status: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The resolved configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run => run::handle_run(config).await,
        Commands::Trigger => jenkins::handle_trigger(config).await,
        Commands::Status { json } => jenkins::handle_status(config, json).await,
        Commands::Notify { status } => notify::handle_notify(config, BuildResult::from(status)).await,
    }
}

/// Colorize a build result for display
fn colorize_result(result: &BuildResult) -> ColoredString {
    let text = result.as_str();
    match result.kind() {
        BuildResultKind::Success => text.green(),
        BuildResultKind::Unstable => text.yellow(),
        BuildResultKind::Failure => text.red(),
        BuildResultKind::Aborted | BuildResultKind::NotBuilt => text.dimmed(),
        BuildResultKind::Other => text.normal(),
    }
}
