//! Data Transfer Objects for the external APIs
//!
//! Request and response bodies exchanged with Jenkins and Slack. Only the
//! fields Herald reads are modelled; anything else in a payload is ignored.

pub mod jenkins;
pub mod slack;
