//! Job-related endpoints

use async_trait::async_trait;
use kettle_core::dto::job::{JobStatusRequest, RunJobRequest};
use tracing::debug;

use crate::KettleClient;
use crate::error::Result;
use crate::transport::KettleTransport;

const JOB_STATUS_ENDPOINT: &str = "jobStatus";
const RUN_JOB_ENDPOINT: &str = "runJob";

#[async_trait]
impl KettleTransport for KettleClient {
    /// Query the status of a job by name
    ///
    /// # Arguments
    /// * `req` - Job name and response format flag
    ///
    /// # Returns
    /// The raw status body, expected to contain a `<status_desc>` tag
    async fn job_status(&self, req: &JobStatusRequest) -> Result<String> {
        debug!("GET {}/{} name={}", self.base_url, JOB_STATUS_ENDPOINT, req.name);
        let response = self.get(JOB_STATUS_ENDPOINT).query(req).send().await?;

        self.handle_text_response(response).await
    }

    /// Start a job by its full key
    ///
    /// # Arguments
    /// * `req` - Job key (`folder + name`) and response format flag
    ///
    /// # Returns
    /// The raw start body, expected to contain a `<result>` tag
    async fn run_job(&self, req: &RunJobRequest) -> Result<String> {
        debug!("GET {}/{} job={}", self.base_url, RUN_JOB_ENDPOINT, req.job);
        let response = self.get(RUN_JOB_ENDPOINT).query(req).send().await?;

        self.handle_text_response(response).await
    }
}
