// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Tagwatch Monitor
//!
//! The availability-monitoring and claim state machine.
//!
//! [`Monitor`] drives a [`tagwatch_core::ReservationService`] in an explicit
//! state loop (lookup → wait → claim) instead of the recursive retry the
//! original tool used, so long monitoring runs cannot grow the call stack and
//! both cancellation and the consecutive-error ceiling are first-class,
//! testable transitions.

pub mod controller;

pub use controller::{Monitor, MAX_CONSECUTIVE_ERRORS};
