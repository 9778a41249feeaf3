//! Pipeline errors
//!
//! Everything here aborts a run. Notification failures are not errors at
//! this level; they are reported through `NotificationOutcome`.

use std::time::Duration;

use herald_client::ClientError;
use thiserror::Error;

/// Fatal errors of a trigger → poll → notify run
#[derive(Debug, Error)]
pub enum RunError {
    /// The build system refused or failed the trigger request
    #[error("failed to trigger pipeline")]
    Trigger(#[source] ClientError),

    /// A status query failed
    #[error("failed to fetch build details")]
    Status(#[source] ClientError),

    /// A queue item query failed
    #[error("failed to fetch queue item")]
    Queue(#[source] ClientError),

    /// The queued build was cancelled before it started
    #[error("queue item {url} was cancelled before the build started")]
    QueueItemCancelled { url: String },

    /// The attempt limit ran out while the build was still running
    #[error("build still running after {attempts} status checks")]
    PollLimitReached { attempts: u32 },

    /// The overall poll timeout ran out while the build was still running
    #[error("build still running after {elapsed:?}")]
    PollTimedOut { elapsed: Duration },
}

impl RunError {
    /// HTTP status code behind this error, if it came from an API response
    #[allow(dead_code)]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Trigger(e) | Self::Status(e) | Self::Queue(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_passes_through_client_errors() {
        let err = RunError::Trigger(ClientError::api_error(500, "Server Error"));
        assert_eq!(err.status(), Some(500));

        let err = RunError::PollLimitReached { attempts: 3 };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_error_chain_reads_naturally() {
        let err = anyhow::Error::from(RunError::Status(ClientError::api_error(404, "Not Found")));
        assert_eq!(
            format!("{:#}", err),
            "failed to fetch build details: API error (status 404): Not Found"
        );
    }
}
