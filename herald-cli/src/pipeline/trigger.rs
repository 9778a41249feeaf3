//! Trigger step

use herald_client::TriggerReceipt;
use tracing::{error, info};

use crate::pipeline::error::RunError;
use crate::repository::BuildServer;

/// Starts one build
///
/// Any status other than `201 Created` aborts the run. There is no retry:
/// a second call would start a second build.
pub async fn trigger(server: &dyn BuildServer) -> Result<TriggerReceipt, RunError> {
    info!("Triggering the pipeline");

    match server.trigger().await {
        Ok(receipt) => {
            info!("Triggered pipeline successfully");
            if let Some(queue_url) = &receipt.queue_url {
                info!("Queued as {}", queue_url);
            }
            Ok(receipt)
        }
        Err(e) => {
            match e.status() {
                Some(status) => error!("Failed to trigger pipeline, status code: {}", status),
                None => error!("Failed to trigger pipeline: {}", e),
            }
            Err(RunError::Trigger(e))
        }
    }
}
