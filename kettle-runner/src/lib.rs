//! Kettle Runner
//!
//! Drives a single job on a Kettle server from "maybe already running" to
//! "definitively finished".
//!
//! Architecture:
//! - Probe: one status query, decoded into a [`StatusSnapshot`](kettle_core::domain::job::StatusSnapshot)
//! - Controller: the wait / start / wait state machine built on the probe
//! - Configuration: settings for one invocation, validated before the run
//!
//! The runner never retries a failed request and keeps no state between
//! invocations; both belong to whatever orchestrates it.

pub mod config;
pub mod controller;
pub mod error;
pub mod probe;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use controller::{JobRunController, PollPhase, RunOptions};
pub use error::{Result, RunError};
pub use probe::JobStatusProbe;
