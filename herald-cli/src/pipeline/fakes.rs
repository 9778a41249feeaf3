//! Scripted in-memory build server and notifier for pipeline tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use herald_client::{ClientError, Result, TriggerReceipt};
use herald_core::domain::build::BuildResult;
use herald_core::dto::jenkins::{BuildInfo, QueueExecutable, QueueItem};

use crate::repository::{BuildServer, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Trigger,
    LastBuild,
    Build(String),
    QueueItem(String),
}

/// Build server that replays scripted responses in order
///
/// Running out of scripted responses panics, which fails the test: a step
/// made a call the scenario did not expect.
#[derive(Default)]
pub struct FakeBuildServer {
    trigger: Mutex<VecDeque<Result<TriggerReceipt>>>,
    statuses: Mutex<VecDeque<Result<BuildInfo>>>,
    queue: Mutex<VecDeque<Result<QueueItem>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBuildServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger_ok(self, queue_url: Option<&str>) -> Self {
        self.trigger.lock().unwrap().push_back(Ok(TriggerReceipt {
            queue_url: queue_url.map(str::to_string),
        }));
        self
    }

    pub fn trigger_status(self, status: u16) -> Self {
        self.trigger
            .lock()
            .unwrap()
            .push_back(Err(ClientError::api_error(status, "scripted")));
        self
    }

    pub fn running(self) -> Self {
        self.status(Ok(BuildInfo {
            building: Some(true),
            ..BuildInfo::default()
        }))
    }

    pub fn finished(self, result: &str) -> Self {
        self.status(Ok(BuildInfo {
            result: Some(BuildResult::new(result)),
            building: Some(false),
            ..BuildInfo::default()
        }))
    }

    pub fn status_error(self, status: u16) -> Self {
        self.status(Err(ClientError::api_error(status, "scripted")))
    }

    pub fn status(self, response: Result<BuildInfo>) -> Self {
        self.statuses.lock().unwrap().push_back(response);
        self
    }

    pub fn queued(self) -> Self {
        self.queue_response(Ok(QueueItem {
            why: Some("Waiting for next available executor".to_string()),
            ..QueueItem::default()
        }))
    }

    pub fn dequeued(self, number: u64, url: &str) -> Self {
        self.queue_response(Ok(QueueItem {
            executable: Some(QueueExecutable {
                number,
                url: url.to_string(),
            }),
            ..QueueItem::default()
        }))
    }

    pub fn queue_cancelled(self) -> Self {
        self.queue_response(Ok(QueueItem {
            cancelled: true,
            ..QueueItem::default()
        }))
    }

    pub fn queue_response(self, response: Result<QueueItem>) -> Self {
        self.queue.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::LastBuild | Call::Build(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BuildServer for FakeBuildServer {
    async fn trigger(&self) -> Result<TriggerReceipt> {
        self.record(Call::Trigger);
        self.trigger
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected trigger call")
    }

    async fn last_build(&self) -> Result<BuildInfo> {
        self.record(Call::LastBuild);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected status query")
    }

    async fn build(&self, build_url: &str) -> Result<BuildInfo> {
        self.record(Call::Build(build_url.to_string()));
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected status query")
    }

    async fn queue_item(&self, queue_url: &str) -> Result<QueueItem> {
        self.record(Call::QueueItem(queue_url.to_string()));
        self.queue
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected queue item query")
    }
}

/// Notifier that records messages and optionally fails with a Slack error
#[derive(Default)]
pub struct FakeNotifier {
    fail_with: Option<String>,
    sent: Mutex<Vec<(String, String)>>,
}

impl FakeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: &str) -> Self {
        Self {
            fail_with: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// `(channel, text)` of every post attempt, failed ones included
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn post(&self, channel: &str, text: &str) -> Result<String> {
        self.sent
            .lock()
            .unwrap()
            .push((channel.to_string(), text.to_string()));

        match &self.fail_with {
            Some(error) => Err(ClientError::Slack(error.clone())),
            None => Ok(text.to_string()),
        }
    }
}
