// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Tagwatch Core
//!
//! Core types, models, and traits for the tagwatch workspace.
//!
//! This crate provides the foundational abstractions used across all other
//! tagwatch crates, including:
//!
//! - Domain models (lookup outcomes, terminal outcomes, session credentials)
//! - Error types
//! - Trait definitions for the reservation service and status reporting
//!
//! ## Key Types
//!
//! - [`LookupOutcome`] - Classified result of a single availability check
//! - [`TerminalOutcome`] - Final result of a monitor/claim run
//! - [`AbortReason`] - Why a run was aborted
//! - [`MonitorConfig`] - Per-run monitoring configuration
//! - [`SessionCredential`] - Bearer authorization plus reservation identifier
//! - [`ReservationService`] - Seam between the monitor loop and the wire
//! - [`StatusSink`] - Write-only channel for human-readable progress

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    AbortReason, LookupOutcome, MonitorConfig, SessionCredential, TerminalOutcome,
    DEFAULT_RETRY_DELAY_SECS,
};

// Re-export traits
pub use traits::{NullSink, ReservationService, StatusSink};
