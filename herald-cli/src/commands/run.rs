//! Full run: trigger → poll → notify

use anyhow::Result;
use colored::*;

use super::colorize_result;
use crate::config::Config;
use crate::pipeline::{self, NotificationOutcome};

/// Run the whole pipeline and print a summary
///
/// A failed build or an undelivered notification still counts as a
/// completed run. Only trigger and poll errors are returned.
pub async fn handle_run(config: &Config) -> Result<()> {
    config.validate()?;

    let outcome = pipeline::run(config).await?;

    let mark = if outcome.result.is_success() {
        "✓".green()
    } else {
        "✗".red()
    };

    println!();
    println!(
        "{} {} {}",
        mark,
        "Pipeline completed with status:".bold(),
        colorize_result(&outcome.result)
    );

    match &outcome.notification {
        NotificationOutcome::Delivered { echo } => {
            println!("{} Slack notification sent: {}", "✓".green(), echo);
        }
        NotificationOutcome::Failed { reason } => {
            println!("{} Slack notification failed: {}", "⚠".yellow(), reason);
        }
    }

    Ok(())
}
