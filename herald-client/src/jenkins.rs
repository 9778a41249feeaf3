//! Jenkins remote API endpoints

use herald_core::domain::credentials::Credentials;
use herald_core::dto::jenkins::{BuildInfo, QueueItem};
use reqwest::{Client, StatusCode, header};
use tracing::debug;

use crate::error::Result;
use crate::{api_json_url, expect_status, handle_response};

/// The two job URLs a run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JenkinsEndpoints {
    /// e.g. `http://localhost:8080/job/<job>/build`
    pub trigger_url: String,
    /// e.g. `http://localhost:8080/job/<job>/lastBuild/api/json`
    pub status_url: String,
}

impl JenkinsEndpoints {
    pub fn new(trigger_url: impl Into<String>, status_url: impl Into<String>) -> Self {
        Self {
            trigger_url: trigger_url.into(),
            status_url: status_url.into(),
        }
    }
}

/// What Jenkins tells us about a freshly triggered build
///
/// Jenkins does not return a build number from the trigger call. It may
/// return the URL of the queue item the request created, which resolves to
/// the build once an executor picks it up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerReceipt {
    pub queue_url: Option<String>,
}

/// HTTP client for one Jenkins job
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    endpoints: JenkinsEndpoints,
    credentials: Credentials,
    client: Client,
}

impl JenkinsClient {
    /// Create a new Jenkins client
    ///
    /// # Arguments
    /// * `endpoints` - Trigger and status URLs of the job
    /// * `credentials` - Username and API token for basic auth
    pub fn new(endpoints: JenkinsEndpoints, credentials: Credentials) -> Self {
        Self::with_client(endpoints, credentials, Client::new())
    }

    /// Create a new Jenkins client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(endpoints: JenkinsEndpoints, credentials: Credentials, client: Client) -> Self {
        Self {
            endpoints,
            credentials,
            client,
        }
    }

    // =============================================================================
    // Trigger
    // =============================================================================

    /// Start a new build of the job
    ///
    /// Succeeds only on `201 Created`. Every call starts another build.
    ///
    /// # Returns
    /// The queue item location, when Jenkins sent one
    pub async fn trigger_build(&self) -> Result<TriggerReceipt> {
        let url = &self.endpoints.trigger_url;
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.token))
            .send()
            .await?;

        let response = expect_status(response, StatusCode::CREATED).await?;

        let queue_url = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Ok(TriggerReceipt { queue_url })
    }

    // =============================================================================
    // Status
    // =============================================================================

    /// Read the configured status URL (normally the job's last build)
    pub async fn last_build_status(&self) -> Result<BuildInfo> {
        self.fetch_build(&self.endpoints.status_url).await
    }

    /// Read the status of a specific build
    ///
    /// # Arguments
    /// * `build_url` - The build URL as Jenkins reports it, e.g. `.../job/app/42/`
    pub async fn build_status(&self, build_url: &str) -> Result<BuildInfo> {
        self.fetch_build(&api_json_url(build_url)).await
    }

    /// Read a queue item
    ///
    /// # Arguments
    /// * `queue_url` - The `Location` returned by [`JenkinsClient::trigger_build`]
    pub async fn queue_item(&self, queue_url: &str) -> Result<QueueItem> {
        let url = api_json_url(queue_url);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.token))
            .send()
            .await?;

        handle_response(response, StatusCode::OK).await
    }

    async fn fetch_build(&self, url: &str) -> Result<BuildInfo> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.token))
            .send()
            .await?;

        handle_response(response, StatusCode::OK).await
    }
}
