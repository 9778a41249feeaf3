//! Slack Web API endpoints

use herald_core::dto::slack::{PostMessage, PostMessageResponse};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::handle_response;

/// Base URL of the public Slack Web API
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";

/// HTTP client for the Slack Web API, authenticated as a bot
#[derive(Clone)]
pub struct SlackClient {
    /// Base URL of the Web API (e.g., "https://slack.com/api")
    api_url: String,
    bot_token: String,
    client: Client,
}

impl SlackClient {
    /// Create a client against the public Slack API
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self::with_api_url(DEFAULT_SLACK_API_URL, bot_token)
    }

    /// Create a client against a different API base URL
    pub fn with_api_url(api_url: impl Into<String>, bot_token: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            client: Client::new(),
        }
    }

    /// Post a message to a channel
    ///
    /// # Arguments
    /// * `channel` - Channel name (`#devops`) or ID (`C0123`)
    /// * `text` - Message text, Slack mrkdwn allowed
    ///
    /// # Returns
    /// Slack's response, including the echo of the stored message
    pub async fn post_message(&self, channel: &str, text: &str) -> Result<PostMessageResponse> {
        if channel.is_empty() {
            return Err(ClientError::InvalidRequest("channel cannot be empty".to_string()));
        }

        let url = format!("{}/chat.postMessage", self.api_url);
        debug!("POST {} (channel {})", url, channel);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.bot_token)
            .json(&PostMessage {
                channel: channel.to_string(),
                text: text.to_string(),
            })
            .send()
            .await?;

        let body: PostMessageResponse = handle_response(response, StatusCode::OK).await?;

        if !body.ok {
            return Err(ClientError::Slack(
                body.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        Ok(body)
    }
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
