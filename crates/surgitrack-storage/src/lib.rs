//! surgitrack-storage
//!
//! Local JSON record storage. Keys are `/`-separated paths under a data
//! directory, laid out by `surgitrack_core::record_keys`.

pub mod error;
pub mod history;
pub mod json;
pub mod objects;
