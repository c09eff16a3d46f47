//! Domain models for tagwatch.
//!
//! This module contains the data structures shared between the Xbox Live
//! client and the monitor loop.
//!
//! ## Submodules
//!
//! - [`outcome`] - Lookup and terminal outcome enums
//! - [`config`] - Per-run monitoring configuration
//! - [`credential`] - Session credential (authorization + reservation id)

mod config;
mod credential;
mod outcome;

// Re-export everything at the models level
pub use config::{MonitorConfig, DEFAULT_RETRY_DELAY_SECS};
pub use credential::SessionCredential;
pub use outcome::{AbortReason, LookupOutcome, TerminalOutcome};
