//! Notifier repository

use async_trait::async_trait;
use herald_client::{Result, SlackClient};

/// Repository trait for posting chat messages
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Posts `text` to `channel`
    ///
    /// # Returns
    /// The message text as echoed back by the messaging system
    async fn post(&self, channel: &str, text: &str) -> Result<String>;
}

#[async_trait]
impl Notifier for SlackClient {
    async fn post(&self, channel: &str, text: &str) -> Result<String> {
        let response = self.post_message(channel, text).await?;

        Ok(response
            .message
            .map(|message| message.text)
            .unwrap_or_else(|| text.to_string()))
    }
}
