//! Build domain types

use serde::{Deserialize, Serialize};

/// Terminal status of a finished build
///
/// Holds the `result` string exactly as the build system reported it. The
/// value is carried from the poller to the notifier untouched; use
/// [`BuildResult::kind`] when a classification is needed for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildResult(String);

impl BuildResult {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw status string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the raw status into one of the statuses Jenkins documents
    pub fn kind(&self) -> BuildResultKind {
        match self.0.as_str() {
            "SUCCESS" => BuildResultKind::Success,
            "UNSTABLE" => BuildResultKind::Unstable,
            "FAILURE" => BuildResultKind::Failure,
            "NOT_BUILT" => BuildResultKind::NotBuilt,
            "ABORTED" => BuildResultKind::Aborted,
            _ => BuildResultKind::Other,
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind() == BuildResultKind::Success
    }
}

impl std::fmt::Display for BuildResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BuildResult {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BuildResult {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Known Jenkins build results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildResultKind {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
    /// Anything Jenkins (or a plugin) reports that is not in the list above
    Other,
}

impl std::fmt::Display for BuildResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildResultKind::Success => write!(f, "Success"),
            BuildResultKind::Unstable => write!(f, "Unstable"),
            BuildResultKind::Failure => write!(f, "Failure"),
            BuildResultKind::NotBuilt => write!(f, "Not built"),
            BuildResultKind::Aborted => write!(f, "Aborted"),
            BuildResultKind::Other => write!(f, "Other"),
        }
    }
}
