//! Transport seam between the runner and the server

use async_trait::async_trait;
use kettle_core::dto::job::{JobStatusRequest, RunJobRequest};

use crate::error::Result;

/// The two job endpoints of a Kettle server
///
/// Implementations return the raw response body; decoding it is up to the
/// caller. No retries happen at this layer.
#[async_trait]
pub trait KettleTransport: Send + Sync {
    /// Query the current status of a job (`/jobStatus`)
    async fn job_status(&self, req: &JobStatusRequest) -> Result<String>;

    /// Ask the server to start a job (`/runJob`)
    async fn run_job(&self, req: &RunJobRequest) -> Result<String>;
}
