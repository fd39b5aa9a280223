//! Job status probe
//!
//! Asks the server what a job is doing right now. One request per call: no
//! sleeping and no retrying, and transport failures are handed back as-is
//! instead of being folded into a status.

use kettle_client::{ClientError, KettleTransport};
use kettle_core::domain::job::{JobStatus, StatusSnapshot};
use kettle_core::dto::job::JobStatusRequest;
use kettle_core::markup::{extract_tag, find_tag};
use tracing::{debug, info, warn};

/// Tag holding the status description in a `jobStatus` body
pub const STATUS_TAG: &str = "status_desc";

/// Queries and decodes the status of one job
pub struct JobStatusProbe<'a, T: ?Sized> {
    transport: &'a T,
    job_name: &'a str,
    log_response: bool,
}

impl<'a, T: KettleTransport + ?Sized> JobStatusProbe<'a, T> {
    /// Creates a probe for `job_name`
    ///
    /// # Arguments
    /// * `transport` - Connection to the server
    /// * `job_name` - Job name as the server knows it (no folder)
    /// * `log_response` - Log raw bodies at info instead of debug
    pub fn new(transport: &'a T, job_name: &'a str, log_response: bool) -> Self {
        Self {
            transport,
            job_name,
            log_response,
        }
    }

    /// Issues one status query and decodes the `status_desc` tag
    pub async fn probe(&self) -> Result<StatusSnapshot, ClientError> {
        let raw = self
            .transport
            .job_status(&JobStatusRequest::new(self.job_name))
            .await?;

        log_body("jobStatus", &raw, self.log_response);

        if find_tag(STATUS_TAG, &raw).is_none() {
            warn!(
                "Status response for job {} has no <{}> tag",
                self.job_name, STATUS_TAG
            );
        }

        let status = JobStatus::from_status_desc(extract_tag(STATUS_TAG, &raw));
        debug!("Job {} status: {}", self.job_name, status);

        Ok(StatusSnapshot { status, raw })
    }
}

/// Logs a raw server body, loudly when the caller asked for responses
pub(crate) fn log_body(endpoint: &str, body: &str, verbose: bool) {
    if verbose {
        info!("{} response:\n{}", endpoint, body);
    } else {
        debug!("{} response:\n{}", endpoint, body);
    }
}
