//! Pipeline driver
//!
//! One run is strictly linear: trigger the job, poll until the build has a
//! result, post that result to Slack. Trigger and poll failures abort the
//! run with a [`RunError`]. Notification failures do not; they show up in
//! [`RunOutcome::notification`].

mod error;
#[cfg(test)]
pub(crate) mod fakes;
mod notify;
mod poller;
mod trigger;

pub use error::RunError;
pub use notify::{NotificationOutcome, notify};
pub use poller::{BuildPoller, PollPolicy, StatusTarget};
pub use trigger::trigger;

use herald_core::domain::build::BuildResult;
use tracing::{info, warn};

use crate::config::Config;
use crate::repository::{BuildServer, Notifier};

/// Settings the driver needs once the clients exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Channel that receives the notification
    pub channel: String,
    pub poll: PollPolicy,
    /// Poll the build created by this trigger instead of `lastBuild`
    pub track_build: bool,
}

/// Result of a completed run
///
/// A failed build is still a completed run; so is a run whose notification
/// could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub result: BuildResult,
    pub notification: NotificationOutcome,
}

/// Runs the whole pipeline against Jenkins and Slack
pub async fn run(config: &Config) -> Result<RunOutcome, RunError> {
    let jenkins = config.jenkins_client();
    let slack = config.slack_client();

    run_with(&jenkins, &slack, &config.pipeline_settings()).await
}

/// Runs the whole pipeline against the given build server and notifier
pub async fn run_with(
    server: &dyn BuildServer,
    notifier: &dyn Notifier,
    settings: &PipelineSettings,
) -> Result<RunOutcome, RunError> {
    let receipt = trigger(server).await?;

    let mut poller = BuildPoller::new(server, settings.poll);

    let target = match (settings.track_build, receipt.queue_url) {
        (true, Some(queue_url)) => {
            let executable = poller.wait_for_executable(&queue_url).await?;
            StatusTarget::Build(executable.url)
        }
        (true, None) => {
            warn!("Trigger response had no queue location, falling back to the status URL");
            StatusTarget::LastBuild
        }
        (false, _) => StatusTarget::LastBuild,
    };

    let result = poller.wait_for_result(&target).await?;
    let notification = notify(notifier, &settings.channel, &result).await;

    info!(
        "Run finished (notification {})",
        if notification.is_delivered() { "sent" } else { "not sent" }
    );
    Ok(RunOutcome {
        result,
        notification,
    })
}
