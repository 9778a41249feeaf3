//! Herald Core
//!
//! Core types shared by the Herald client and CLI.
//!
//! This crate contains:
//! - Domain types: the terminal build result and build-system credentials
//! - DTOs: wire shapes of the Jenkins remote API and the Slack Web API

pub mod domain;
pub mod dto;
