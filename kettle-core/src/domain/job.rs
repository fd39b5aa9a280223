//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status text the server reports for a job that is executing
pub const RUNNING_MARKER: &str = "Running";
/// Status text for a job that completed cleanly
pub const FINISHED_MARKER: &str = "Finished";
/// Status text for a job that completed with errors
pub const FINISHED_WITH_ERRORS_MARKER: &str = "Finished (with errors)";

/// Identity of a job hosted on the server
///
/// The remote job key is the plain concatenation `folder + name`, so a folder
/// is expected to carry its own trailing separator (e.g. `/etl/daily/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobIdentity {
    pub folder: String,
    pub name: String,
}

impl JobIdentity {
    pub fn new(folder: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            name: name.into(),
        }
    }

    /// Key used to start the job (`folder + name`)
    pub fn key(&self) -> String {
        format!("{}{}", self.folder, self.name)
    }
}

impl fmt::Display for JobIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.folder, self.name)
    }
}

/// Job lifecycle state decoded from the server's `status_desc` text
///
/// Only the running marker and the two finished markers are recognized.
/// Every other text (`Waiting`, `Halting`, garbage from a malformed body, ...)
/// lands in `Other` and counts as still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Running,
    Finished,
    FinishedWithErrors,
    Other(String),
}

impl JobStatus {
    /// Classifies a status description by exact match against the known markers
    pub fn from_status_desc(desc: &str) -> Self {
        match desc {
            RUNNING_MARKER => JobStatus::Running,
            FINISHED_MARKER => JobStatus::Finished,
            FINISHED_WITH_ERRORS_MARKER => JobStatus::FinishedWithErrors,
            other => JobStatus::Other(other.to_string()),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, JobStatus::Running)
    }

    /// Whether the job has reached one of the two finished states
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Finished | JobStatus::FinishedWithErrors)
    }

    /// The status text as the server spells it
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Running => RUNNING_MARKER,
            JobStatus::Finished => FINISHED_MARKER,
            JobStatus::FinishedWithErrors => FINISHED_WITH_ERRORS_MARKER,
            JobStatus::Other(desc) => desc,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded status together with the raw response it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: JobStatus,
    /// Raw response body, kept for diagnostics and as the run's result payload
    pub raw: String,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Remote job key that was started
    pub job: String,
    /// Final raw status response, only present when the caller asked for it
    pub payload: Option<String>,
    /// Number of status queries issued across both polling phases
    pub polls: u32,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_key_concatenates_folder_and_name() {
        let job = JobIdentity::new("/etl/daily/", "load_sales");
        assert_eq!(job.key(), "/etl/daily/load_sales");
        assert_eq!(job.to_string(), job.key());
    }

    #[test]
    fn test_status_from_known_markers() {
        assert_eq!(JobStatus::from_status_desc("Running"), JobStatus::Running);
        assert_eq!(JobStatus::from_status_desc("Finished"), JobStatus::Finished);
        assert_eq!(
            JobStatus::from_status_desc("Finished (with errors)"),
            JobStatus::FinishedWithErrors
        );
    }

    #[test]
    fn test_status_match_is_exact() {
        assert_eq!(
            JobStatus::from_status_desc("running"),
            JobStatus::Other("running".to_string())
        );
        assert_eq!(
            JobStatus::from_status_desc(" Finished"),
            JobStatus::Other(" Finished".to_string())
        );
        assert_eq!(JobStatus::from_status_desc(""), JobStatus::Other(String::new()));
    }

    #[test]
    fn test_status_predicates() {
        assert!(JobStatus::Running.is_running());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Finished.is_terminal());
        assert!(JobStatus::FinishedWithErrors.is_terminal());

        let waiting = JobStatus::Other("Waiting".to_string());
        assert!(!waiting.is_running());
        assert!(!waiting.is_terminal());
        assert_eq!(waiting.to_string(), "Waiting");
    }

    #[test]
    fn test_outcome_serializes_without_payload() {
        let now = chrono::Utc::now();
        let outcome = RunOutcome {
            job: "/etl/job".to_string(),
            payload: None,
            polls: 3,
            started_at: now,
            completed_at: now,
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["job"], "/etl/job");
        assert!(json["payload"].is_null());
        assert_eq!(json["polls"], 3);
    }
}
