//! Jenkins command handlers
//!
//! One-shot trigger and status commands, without the rest of the pipeline.

use std::fmt::Write;

use anyhow::{Context, Result};
use colored::*;
use herald_core::dto::jenkins::BuildInfo;

use super::colorize_result;
use crate::config::Config;
use crate::pipeline;

/// Trigger the job once
pub async fn handle_trigger(config: &Config) -> Result<()> {
    config.validate_jenkins()?;

    let client = config.jenkins_client();
    let receipt = pipeline::trigger(&client).await?;

    println!("{}", "✓ Build triggered".green());
    if let Some(queue_url) = receipt.queue_url {
        println!("  Queue item: {}", queue_url.dimmed());
    }

    Ok(())
}

/// Query the status URL once
pub async fn handle_status(config: &Config, json: bool) -> Result<()> {
    config.validate_jenkins()?;

    let client = config.jenkins_client();
    let info = client
        .last_build_status()
        .await
        .context("Failed to fetch build details")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", render_build_details(&info));
    }

    Ok(())
}

/// Render build information for the terminal
fn render_build_details(info: &BuildInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Build Details:".bold());

    if let Some(number) = info.number {
        let _ = writeln!(out, "  Number:    #{}", number.to_string().cyan());
    }

    match &info.result {
        Some(result) => {
            let _ = writeln!(out, "  Result:    {}", colorize_result(result));
        }
        None => {
            let _ = writeln!(out, "  Result:    {}", "in progress".yellow());
        }
    }

    if let Some(building) = info.building {
        let building = if building { "yes".yellow() } else { "no".normal() };
        let _ = writeln!(out, "  Building:  {}", building);
    }

    if let Some(started) = info.started_at() {
        let _ = writeln!(out, "  Started:   {}", started.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(duration) = info.duration.filter(|d| *d > 0) {
        let _ = writeln!(out, "  Duration:  {}s", duration / 1000);
    }

    if let Some(url) = &info.url {
        let _ = writeln!(out, "  URL:       {}", url.dimmed());
    }

    out
}
