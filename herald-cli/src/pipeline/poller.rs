//! Build poller
//!
//! Waits for a triggered build to reach a terminal result. Each check is a
//! single status query; between checks the poller sleeps for a fixed
//! interval. Only a "still running" answer is retried. A failed query ends
//! the run.

use herald_core::domain::build::BuildResult;
use herald_core::dto::jenkins::{BuildInfo, QueueExecutable};
use tokio::time::{Duration, Instant, sleep};
use tracing::{debug, error, info};

use crate::pipeline::error::RunError;
use crate::repository::BuildServer;

/// Delay between two status checks unless configured otherwise
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// How long and how often to poll
///
/// Without `max_attempts` and `timeout` the poller waits forever, the same
/// way a human watching the job page would.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Fixed delay between two checks
    pub interval: Duration,
    /// Give up after this many checks
    pub max_attempts: Option<u32>,
    /// Give up when the next delay would end past this much total time
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: None,
            timeout: None,
        }
    }
}

/// Which build to ask about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusTarget {
    /// The configured status URL, normally `lastBuild`
    LastBuild,
    /// One concrete build, by URL
    Build(String),
}

/// Polls a build server until a build has a result
///
/// The attempt limit and the timeout cover everything one poller does, so a
/// queue wait followed by build polling shares a single budget.
pub struct BuildPoller<'a> {
    server: &'a dyn BuildServer,
    pacer: Pacer,
}

impl<'a> BuildPoller<'a> {
    pub fn new(server: &'a dyn BuildServer, policy: PollPolicy) -> Self {
        Self {
            server,
            pacer: Pacer::new(policy),
        }
    }

    /// Waits until the target build reports a non-null `result`
    ///
    /// The returned value is exactly what the build system sent.
    pub async fn wait_for_result(
        &mut self,
        target: &StatusTarget,
    ) -> Result<BuildResult, RunError> {
        info!("Checking build info");

        loop {
            let attempt = self.pacer.next_attempt();
            let build = self.fetch_status(target).await?;

            if let Some(result) = build.result {
                info!("Build finished with status: {}", result);
                return Ok(result);
            }

            match build.number {
                Some(number) => info!("Build #{} in progress (check {})", number, attempt),
                None => info!("Build in progress (check {})", attempt),
            }
            self.pacer.wait().await?;
        }
    }

    /// Waits until a queue item has been turned into a build
    pub async fn wait_for_executable(
        &mut self,
        queue_url: &str,
    ) -> Result<QueueExecutable, RunError> {
        info!("Waiting for {} to leave the queue", queue_url);

        loop {
            let attempt = self.pacer.next_attempt();
            let item = self.server.queue_item(queue_url).await.map_err(|e| {
                error!("Failed to fetch queue item: {}", e);
                RunError::Queue(e)
            })?;

            if item.cancelled {
                error!("Queue item {} was cancelled", queue_url);
                return Err(RunError::QueueItemCancelled {
                    url: queue_url.to_string(),
                });
            }

            if let Some(executable) = item.executable {
                info!("Queue item became build #{}", executable.number);
                return Ok(executable);
            }

            info!(
                "Build still queued (check {}): {}",
                attempt,
                item.why.as_deref().unwrap_or("waiting")
            );
            self.pacer.wait().await?;
        }
    }

    async fn fetch_status(&self, target: &StatusTarget) -> Result<BuildInfo, RunError> {
        let response = match target {
            StatusTarget::LastBuild => self.server.last_build().await,
            StatusTarget::Build(url) => self.server.build(url).await,
        };

        response.map_err(|e| {
            match e.status() {
                Some(status) => error!("Failed to fetch build details, status code: {}", status),
                None => error!("Failed to fetch build details: {}", e),
            }
            RunError::Status(e)
        })
    }
}

/// Attempt counter and clock shared by every loop of one poller
struct Pacer {
    policy: PollPolicy,
    started: Instant,
    attempts: u32,
}

impl Pacer {
    fn new(policy: PollPolicy) -> Self {
        Self {
            policy,
            started: Instant::now(),
            attempts: 0,
        }
    }

    fn next_attempt(&mut self) -> u32 {
        self.attempts += 1;
        self.attempts
    }

    /// Sleeps one interval, or fails if a limit forbids another check
    async fn wait(&self) -> Result<(), RunError> {
        if let Some(max_attempts) = self.policy.max_attempts {
            if self.attempts >= max_attempts {
                error!("Giving up after {} checks", self.attempts);
                return Err(RunError::PollLimitReached {
                    attempts: self.attempts,
                });
            }
        }

        if let Some(timeout) = self.policy.timeout {
            let elapsed = self.started.elapsed();
            if elapsed + self.policy.interval > timeout {
                error!("Giving up after {:?}", elapsed);
                return Err(RunError::PollTimedOut { elapsed });
            }
        }

        debug!("Sleeping {:?} before next check", self.policy.interval);
        sleep(self.policy.interval).await;
        Ok(())
    }
}
