//! Herald HTTP Clients
//!
//! Small, typed async clients for the two APIs a Herald run talks to:
//!
//! - [`JenkinsClient`]: triggers a job and reads build and queue status
//! - [`SlackClient`]: posts messages with `chat.postMessage`
//!
//! # Example
//!
//! ```no_run
//! use herald_client::{JenkinsClient, JenkinsEndpoints};
//! use herald_core::domain::credentials::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JenkinsClient::new(
//!         JenkinsEndpoints::new(
//!             "http://localhost:8080/job/app/build",
//!             "http://localhost:8080/job/app/lastBuild/api/json",
//!         ),
//!         Credentials::new("admin", "api-token"),
//!     );
//!
//!     client.trigger_build().await?;
//!     let info = client.last_build_status().await?;
//!     println!("Last build result: {:?}", info.result);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jenkins;
mod slack;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use jenkins::{JenkinsClient, JenkinsEndpoints, TriggerReceipt};
pub use slack::{DEFAULT_SLACK_API_URL, SlackClient};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

// =============================================================================
// Response Handlers
// =============================================================================

/// Check a response against the one status code the endpoint promises
///
/// Jenkins signals success with specific codes (201 for a trigger, 200 for a
/// status read), so any other code, including other 2xx codes, is an error.
async fn expect_status(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<reqwest::Response> {
    let status = response.status();

    if status != expected {
        let error_text = response
            .text()
            .await
            .ok()
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    Ok(response)
}

/// Check the status code and deserialize the JSON body
async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
    expected: StatusCode,
) -> Result<T> {
    let response = expect_status(response, expected).await?;

    // Read as text first so a bad body reports a parse error, not a transport one
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}

/// Join a Jenkins object URL and its `api/json` suffix
fn api_json_url(object_url: &str) -> String {
    format!("{}/api/json", object_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_json_url_with_trailing_slash() {
        assert_eq!(
            api_json_url("http://localhost:8080/queue/item/4/"),
            "http://localhost:8080/queue/item/4/api/json"
        );
    }

    #[test]
    fn test_api_json_url_without_trailing_slash() {
        assert_eq!(
            api_json_url("http://localhost:8080/job/app/12"),
            "http://localhost:8080/job/app/12/api/json"
        );
    }
}
