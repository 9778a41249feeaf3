//! Build server repository
//!
//! Handles communication with the build system:
//! - Triggering the job
//! - Reading the status of the last (or a specific) build
//! - Resolving a queue item to the build it started

use async_trait::async_trait;
use herald_client::{JenkinsClient, Result, TriggerReceipt};
use herald_core::dto::jenkins::{BuildInfo, QueueItem};

/// Repository trait for build-system operations
#[async_trait]
pub trait BuildServer: Send + Sync {
    /// Starts a new build of the configured job
    async fn trigger(&self) -> Result<TriggerReceipt>;

    /// Reads the configured status endpoint (the job's last build)
    async fn last_build(&self) -> Result<BuildInfo>;

    /// Reads the status of one specific build
    ///
    /// # Arguments
    /// * `build_url` - Build URL as reported by the queue item
    async fn build(&self, build_url: &str) -> Result<BuildInfo>;

    /// Reads a queue item created by a trigger
    async fn queue_item(&self, queue_url: &str) -> Result<QueueItem>;
}

#[async_trait]
impl BuildServer for JenkinsClient {
    async fn trigger(&self) -> Result<TriggerReceipt> {
        self.trigger_build().await
    }

    async fn last_build(&self) -> Result<BuildInfo> {
        self.last_build_status().await
    }

    async fn build(&self, build_url: &str) -> Result<BuildInfo> {
        self.build_status(build_url).await
    }

    async fn queue_item(&self, queue_url: &str) -> Result<QueueItem> {
        JenkinsClient::queue_item(self, queue_url).await
    }
}
