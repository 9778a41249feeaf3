//! Configuration module
//!
//! Settings come from three layers, highest priority first: command-line
//! flags, environment variables (both through clap), then an optional TOML
//! file. Anything still missing falls back to a default or fails
//! validation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use herald_client::{DEFAULT_SLACK_API_URL, JenkinsClient, JenkinsEndpoints, SlackClient};
use herald_core::domain::credentials::Credentials;
use serde::Deserialize;

use crate::pipeline::{PipelineSettings, PollPolicy};

/// Channel used when none is configured
pub const DEFAULT_SLACK_CHANNEL: &str = "#devops-updates";

/// Configuration flags shared by every subcommand
#[derive(Debug, Default, Args)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(long, global = true, env = "HERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// URL that starts a build, e.g. http://localhost:8080/job/app/build
    #[arg(long, global = true, env = "JENKINS_TRIGGER_URL")]
    pub trigger_url: Option<String>,

    /// URL of the build to watch, e.g. http://localhost:8080/job/app/lastBuild/api/json
    #[arg(long, global = true, env = "JENKINS_STATUS_URL")]
    pub status_url: Option<String>,

    /// Jenkins user
    #[arg(long, global = true, env = "JENKINS_USER")]
    pub jenkins_user: Option<String>,

    /// Jenkins API token
    #[arg(long, global = true, env = "JENKINS_API_TOKEN", hide_env_values = true)]
    pub jenkins_token: Option<String>,

    /// Slack channel to notify [default: #devops-updates]
    #[arg(long, global = true, env = "SLACK_CHANNEL")]
    pub slack_channel: Option<String>,

    /// Slack bot token
    #[arg(long, global = true, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    pub slack_token: Option<String>,

    /// Slack Web API base URL [default: https://slack.com/api]
    #[arg(long, global = true, env = "SLACK_API_URL")]
    pub slack_api_url: Option<String>,

    /// Seconds between two status checks [default: 10]
    #[arg(long, global = true, env = "POLL_INTERVAL")]
    pub poll_interval: Option<u64>,

    /// Give up after this many status checks [default: unlimited]
    #[arg(long, global = true, env = "MAX_POLL_ATTEMPTS")]
    pub max_attempts: Option<u32>,

    /// Give up after this many seconds of polling [default: unlimited]
    #[arg(long, global = true, env = "POLL_TIMEOUT")]
    pub poll_timeout: Option<u64>,

    /// Follow the queue item of the triggered build instead of lastBuild
    #[arg(long, global = true, env = "TRACK_BUILD")]
    pub track_build: bool,
}

/// Layout of the TOML configuration file
///
/// ```toml
/// [jenkins]
/// trigger_url = "http://localhost:8080/job/app/build"
/// status_url = "http://localhost:8080/job/app/lastBuild/api/json"
/// user = "admin"
/// api_token = "..."
///
/// [slack]
/// channel = "#devops-updates"
/// bot_token = "xoxb-..."
///
/// [poll]
/// interval_secs = 10
/// max_attempts = 360
/// track_build = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub jenkins: JenkinsSection,
    pub slack: SlackSection,
    pub poll: PollSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JenkinsSection {
    pub trigger_url: Option<String>,
    pub status_url: Option<String>,
    pub user: Option<String>,
    pub api_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlackSection {
    pub channel: Option<String>,
    pub bot_token: Option<String>,
    pub api_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollSection {
    pub interval_secs: Option<u64>,
    pub max_attempts: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub track_build: Option<bool>,
}

impl FileConfig {
    /// Reads and parses a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub trigger_url: String,
    pub status_url: String,
    pub credentials: Credentials,
    pub slack_channel: String,
    pub slack_bot_token: String,
    pub slack_api_url: String,
    pub poll: PollPolicy,
    pub track_build: bool,
}

impl Config {
    /// Builds the configuration from flags/env, reading the file they name
    pub fn load(args: ConfigArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        Ok(Self::merge(args, file))
    }

    /// Merges flags/env over file values, then applies defaults
    ///
    /// Missing required values become empty strings and are reported by
    /// [`Config::validate`], so each subcommand only checks what it uses.
    pub fn merge(args: ConfigArgs, file: FileConfig) -> Self {
        let defaults = PollPolicy::default();

        let interval = args
            .poll_interval
            .or(file.poll.interval_secs)
            .map(Duration::from_secs)
            .unwrap_or(defaults.interval);

        Self {
            trigger_url: args
                .trigger_url
                .or(file.jenkins.trigger_url)
                .unwrap_or_default(),
            status_url: args
                .status_url
                .or(file.jenkins.status_url)
                .unwrap_or_default(),
            credentials: Credentials::new(
                args.jenkins_user.or(file.jenkins.user).unwrap_or_default(),
                args.jenkins_token
                    .or(file.jenkins.api_token)
                    .unwrap_or_default(),
            ),
            slack_channel: args
                .slack_channel
                .or(file.slack.channel)
                .unwrap_or_else(|| DEFAULT_SLACK_CHANNEL.to_string()),
            slack_bot_token: args
                .slack_token
                .or(file.slack.bot_token)
                .unwrap_or_default(),
            slack_api_url: args
                .slack_api_url
                .or(file.slack.api_url)
                .unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string()),
            poll: PollPolicy {
                interval,
                max_attempts: args.max_attempts.or(file.poll.max_attempts),
                timeout: args
                    .poll_timeout
                    .or(file.poll.timeout_secs)
                    .map(Duration::from_secs),
            },
            track_build: args.track_build || file.poll.track_build.unwrap_or(false),
        }
    }

    /// Validates everything a full run needs
    pub fn validate(&self) -> Result<()> {
        self.validate_jenkins()?;
        self.validate_slack()?;
        self.validate_poll()
    }

    /// Validates the Jenkins settings
    pub fn validate_jenkins(&self) -> Result<()> {
        require_url("trigger_url (JENKINS_TRIGGER_URL)", &self.trigger_url)?;
        require_url("status_url (JENKINS_STATUS_URL)", &self.status_url)?;

        if self.credentials.username.is_empty() {
            anyhow::bail!("jenkins user (JENKINS_USER) cannot be empty");
        }

        if self.credentials.token.is_empty() {
            anyhow::bail!("jenkins token (JENKINS_API_TOKEN) cannot be empty");
        }

        Ok(())
    }

    /// Validates the Slack settings
    pub fn validate_slack(&self) -> Result<()> {
        if self.slack_channel.is_empty() {
            anyhow::bail!("slack channel (SLACK_CHANNEL) cannot be empty");
        }

        if self.slack_bot_token.is_empty() {
            anyhow::bail!("slack bot token (SLACK_BOT_TOKEN) cannot be empty");
        }

        require_url("slack_api_url (SLACK_API_URL)", &self.slack_api_url)
    }

    fn validate_poll(&self) -> Result<()> {
        if self.poll.interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.poll.max_attempts == Some(0) {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        if self.poll.timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("poll_timeout must be greater than 0");
        }

        Ok(())
    }

    pub fn jenkins_client(&self) -> JenkinsClient {
        JenkinsClient::new(
            JenkinsEndpoints::new(self.trigger_url.clone(), self.status_url.clone()),
            self.credentials.clone(),
        )
    }

    pub fn slack_client(&self) -> SlackClient {
        SlackClient::with_api_url(self.slack_api_url.clone(), self.slack_bot_token.clone())
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            channel: self.slack_channel.clone(),
            poll: self.poll,
            track_build: self.track_build,
        }
    }
}

fn require_url(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", name);
    }

    if !value.starts_with("http://") && !value.starts_with("https://") {
        anyhow::bail!("{} must start with http:// or https://", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn full_args() -> ConfigArgs {
        ConfigArgs {
            trigger_url: Some("http://localhost:8080/job/app/build".to_string()),
            status_url: Some("http://localhost:8080/job/app/lastBuild/api/json".to_string()),
            jenkins_user: Some("admin".to_string()),
            jenkins_token: Some("11aa22bb".to_string()),
            slack_token: Some("xoxb-test".to_string()),
            ..ConfigArgs::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::merge(full_args(), FileConfig::default());

        assert_eq!(config.slack_channel, "#devops-updates");
        assert_eq!(config.slack_api_url, "https://slack.com/api");
        assert_eq!(config.poll.interval, Duration::from_secs(10));
        assert_eq!(config.poll.max_attempts, None);
        assert_eq!(config.poll.timeout, None);
        assert!(!config.track_build);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_args_override_file() {
        let file: FileConfig = toml::from_str(
            r##"
            [jenkins]
            trigger_url = "http://jenkins.internal/job/web/build"
            user = "ci"

            [slack]
            channel = "#builds"

            [poll]
            interval_secs = 30
            max_attempts = 5
            track_build = true
            "##,
        )
        .unwrap();

        let config = Config::merge(full_args(), file);

        assert_eq!(config.trigger_url, "http://localhost:8080/job/app/build");
        assert_eq!(config.credentials.username, "admin");
        assert_eq!(config.slack_channel, "#builds");
        assert_eq!(config.poll.interval, Duration::from_secs(30));
        assert_eq!(config.poll.max_attempts, Some(5));
        assert!(config.track_build);
    }

    #[test]
    fn test_file_only() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [jenkins]
            trigger_url = "https://jenkins.example.com/job/api/build"
            status_url = "https://jenkins.example.com/job/api/lastBuild/api/json"
            user = "ci"
            api_token = "tok"

            [slack]
            bot_token = "xoxb-file"

            [poll]
            timeout_secs = 600
            "#
        )
        .unwrap();

        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
            ..ConfigArgs::default()
        };
        let config = Config::load(args).unwrap();

        assert_eq!(config.credentials, Credentials::new("ci", "tok"));
        assert_eq!(config.slack_bot_token, "xoxb-file");
        assert_eq!(config.poll.timeout, Some(Duration::from_secs(600)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_file_keys_are_rejected() {
        let parsed: std::result::Result<FileConfig, _> = toml::from_str(
            r#"
            [jenkins]
            trigger = "http://localhost:8080/job/app/build"
            "#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_file() {
        let args = ConfigArgs {
            config: Some(PathBuf::from("/nonexistent/herald.toml")),
            ..ConfigArgs::default()
        };
        let err = Config::load(args).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::merge(full_args(), FileConfig::default());

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Invalid URL should fail
        config.trigger_url = "localhost:8080/job/app/build".to_string();
        assert!(config.validate_jenkins().is_err());
        config.trigger_url = "http://localhost:8080/job/app/build".to_string();

        // Missing token should fail
        config.credentials.token = String::new();
        assert!(config.validate_jenkins().is_err());
        config.credentials.token = "11aa22bb".to_string();

        // Slack settings are checked separately
        config.slack_bot_token = String::new();
        assert!(config.validate_jenkins().is_ok());
        assert!(config.validate_slack().is_err());
        assert!(config.validate().is_err());
        config.slack_bot_token = "xoxb-test".to_string();

        // Zero interval should fail
        config.poll.interval = Duration::ZERO;
        assert!(config.validate().is_err());
        config.poll.interval = Duration::from_secs(1);

        config.poll.max_attempts = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_jenkins_settings() {
        let config = Config::merge(ConfigArgs::default(), FileConfig::default());
        let err = config.validate_jenkins().unwrap_err();
        assert!(err.to_string().contains("JENKINS_TRIGGER_URL"));
    }
}
