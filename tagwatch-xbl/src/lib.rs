// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Tagwatch XBL
//!
//! Xbox Live client for the tagwatch workspace.
//!
//! This crate talks to the three services the tool needs:
//!
//! - [`auth`] - Microsoft account login chain (RPS ticket → user token →
//!   XSTS token) producing a [`tagwatch_core::SessionCredential`]
//! - [`reservation`] - Single-shot gamertag reservation check and claim,
//!   classifying every failure into a [`tagwatch_core::LookupOutcome`]
//! - [`client`] - Shared HTTP client with the headers these endpoints expect
//!
//! No retry logic lives here. The reservation check is a pure classifier;
//! the monitor crate owns the retry policy.

pub mod auth;
pub mod client;
pub mod error;
pub mod reservation;

pub use auth::{AuthClient, LoginIdentity};
pub use client::HttpClient;
pub use error::XblError;
pub use reservation::ReserveClient;
