//! surgitrack-cli library root.
//!
//! Re-exports internal modules so that integration tests can exercise the
//! commands directly without going through argument parsing.

pub mod commands;
pub mod config;
