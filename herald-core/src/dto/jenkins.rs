//! Jenkins remote API DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::build::BuildResult;

/// Build details from `.../<build>/api/json`
///
/// `result` stays `null` while the build is running and becomes the
/// terminal status once it finishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildInfo {
    #[serde(default)]
    pub result: Option<BuildResult>,
    #[serde(default)]
    pub number: Option<u64>,
    #[serde(default)]
    pub building: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    /// Start time in epoch milliseconds
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Duration in milliseconds, `0` while running
    #[serde(default)]
    pub duration: Option<u64>,
}

impl BuildInfo {
    /// Start time of the build, if Jenkins reported one
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::from_timestamp_millis)
    }
}

/// Queue item from `.../queue/item/<id>/api/json`
///
/// Jenkins returns the queue item URL in the `Location` header of a trigger
/// response. `executable` is filled in once the item leaves the queue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(default)]
    pub why: Option<String>,
    #[serde(default)]
    pub executable: Option<QueueExecutable>,
}

/// The build a queue item turned into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueExecutable {
    pub number: u64,
    pub url: String,
}
