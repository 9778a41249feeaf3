//! Core domain types
//!
//! The values that flow through a single trigger → poll → notify run.
//! Nothing here is persisted; every value lives for one run at most.

pub mod build;
pub mod credentials;
