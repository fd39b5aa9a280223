//! Runner configuration
//!
//! Everything one invocation needs: where the server is, which job to run,
//! and how to poll it. Built by the binary from command-line flags and
//! environment variables, and validated before any request is made.

use kettle_core::domain::job::JobIdentity;
use kettle_core::domain::poll::PollConfig;
use std::time::Duration;

use crate::controller::RunOptions;

/// Default base URL of the Kettle web service
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/pentaho/kettle";

/// Runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Kettle web service (e.g., "http://localhost:8080/pentaho/kettle")
    pub server_url: String,

    /// Basic auth user, if the server wants one
    pub username: Option<String>,

    /// Basic auth password
    pub password: Option<String>,

    /// Job to run
    pub job: JobIdentity,

    /// Cycle interval and per-phase timeout
    pub poll: PollConfig,

    /// Result and logging switches
    pub options: RunOptions,

    /// Limit for a single HTTP request
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a configuration with defaults for everything but the job
    pub fn new(server_url: String, job: JobIdentity) -> Self {
        Self {
            server_url,
            username: None,
            password: None,
            job,
            poll: PollConfig::default(),
            options: RunOptions::default(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Sets basic auth credentials
    pub fn with_credentials(mut self, username: String, password: Option<String>) -> Self {
        self.username = Some(username);
        self.password = password;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.job.folder.is_empty() {
            anyhow::bail!("job_folder cannot be empty");
        }

        if self.job.name.is_empty() {
            anyhow::bail!("job_name cannot be empty");
        }

        if self.server_url.is_empty() {
            anyhow::bail!("server_url cannot be empty");
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            anyhow::bail!("server_url must start with http:// or https://");
        }

        if self.password.is_some() && self.username.is_none() {
            anyhow::bail!("password given without a username");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}
