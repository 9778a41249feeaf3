//! Notify command handler

use anyhow::Result;
use colored::*;
use herald_core::domain::build::BuildResult;

use crate::config::Config;
use crate::pipeline::{self, NotificationOutcome};

/// Post the notification for `result` without touching Jenkins
///
/// Unlike a full run, a failed post is an error here: checking the Slack
/// setup is the whole point of the command.
pub async fn handle_notify(config: &Config, result: BuildResult) -> Result<()> {
    config.validate_slack()?;

    let client = config.slack_client();
    match pipeline::notify(&client, &config.slack_channel, &result).await {
        NotificationOutcome::Delivered { echo } => {
            println!("{} Slack notification sent: {}", "✓".green(), echo);
            Ok(())
        }
        NotificationOutcome::Failed { reason } => {
            anyhow::bail!("Slack notification failed: {}", reason)
        }
    }
}
