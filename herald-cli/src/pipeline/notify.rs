//! Notify step
//!
//! Best effort: a failed post is logged and recorded in the outcome, never
//! returned as an error.

use herald_core::domain::build::BuildResult;
use tracing::{info, warn};

use crate::repository::Notifier;

/// What happened to the notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// Posted; `echo` is the text the messaging system stored
    Delivered { echo: String },
    /// Not posted; `reason` is the error the messaging client raised
    Failed { reason: String },
}

impl NotificationOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Message posted for a finished build
pub fn render_message(result: &BuildResult) -> String {
    format!("Pipeline Completed with status: *{}* 🚀", result)
}

/// Posts the build result to `channel`
pub async fn notify(
    notifier: &dyn Notifier,
    channel: &str,
    result: &BuildResult,
) -> NotificationOutcome {
    let message = render_message(result);

    match notifier.post(channel, &message).await {
        Ok(echo) => {
            info!("Slack notification sent: {}", echo);
            NotificationOutcome::Delivered { echo }
        }
        Err(e) => {
            warn!("Slack notification failed, error: {}", e);
            NotificationOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
