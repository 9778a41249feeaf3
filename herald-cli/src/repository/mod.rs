//! Repository layer
//!
//! Thin trait seams over the Jenkins and Slack clients. The pipeline talks
//! to these traits only, so tests can swap in scripted in-memory servers.

mod build_server;
mod notifier;

// Re-export traits
pub use build_server::BuildServer;
pub use notifier::Notifier;
