//! Alumni API
//!
//! Startup configuration for the `alumni-api` binary.

pub mod config;
