//! Slack Web API DTOs

use serde::{Deserialize, Serialize};

/// Body of a `chat.postMessage` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMessage {
    pub channel: String,
    pub text: String,
}

/// Response of a `chat.postMessage` call
///
/// Slack answers HTTP 200 for most failures and reports them through
/// `ok: false` plus an `error` code such as `invalid_auth`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub message: Option<PostedMessage>,
}

/// Echo of the message Slack stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedMessage {
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response() {
        let resp: PostMessageResponse = serde_json::from_str(
            r#"{"ok":true,"channel":"C123","ts":"1503435956.000247","message":{"text":"hi","type":"message"}}"#,
        )
        .unwrap();
        assert!(resp.ok);
        assert_eq!(resp.message.unwrap().text, "hi");
    }

    #[test]
    fn test_error_response() {
        let resp: PostMessageResponse =
            serde_json::from_str(r#"{"ok":false,"error":"invalid_auth"}"#).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error.as_deref(), Some("invalid_auth"));
        assert!(resp.message.is_none());
    }
}
