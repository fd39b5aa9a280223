//! Error types for a job run

use kettle_client::ClientError;
use std::time::Duration;
use thiserror::Error;

use crate::controller::PollPhase;

/// Result type alias for run operations
pub type Result<T> = std::result::Result<T, RunError>;

/// Reasons a run ends without the job finishing cleanly
///
/// Every variant is fatal to the invocation. Variants raised from a server
/// answer carry the raw body that caused them.
#[derive(Debug, Error)]
pub enum RunError {
    /// The start request was answered with something other than `OK`
    #[error("Could not start job.\n{response}")]
    StartRejected { response: String },

    /// The job ran and the server reports it finished with errors
    #[error("Job finished with errors.\n{response}")]
    FinishedWithErrors { response: String },

    /// A polling phase went past its time limit
    #[error("Timed out after {limit:?} {phase}.\n{response}")]
    TimedOut {
        phase: PollPhase,
        limit: Duration,
        /// Last status body seen before giving up
        response: String,
    },

    /// The request itself failed
    #[error("Transport error: {0}")]
    Transport(#[from] ClientError),
}

impl RunError {
    /// Raw server body attached to the error, if any
    pub fn response(&self) -> Option<&str> {
        match self {
            RunError::StartRejected { response }
            | RunError::FinishedWithErrors { response }
            | RunError::TimedOut { response, .. } => Some(response),
            RunError::Transport(_) => None,
        }
    }
}
