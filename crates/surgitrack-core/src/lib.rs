//! surgitrack-core
//!
//! Pure domain types and record key conventions.
//! No I/O — this is the shared vocabulary of the SurgiTrack system.

pub mod error;
pub mod models;
pub mod record_keys;
