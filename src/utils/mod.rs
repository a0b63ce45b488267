//! Utilities Module
//!
//! Secret encryption, logging and store configuration shared across the crate.

pub mod config;
pub mod encryption;
pub mod logging;

pub use config::ProfileStoreConfig;
pub use encryption::KdfParams;
