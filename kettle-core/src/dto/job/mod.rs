//! Job DTOs for the server's `jobStatus` and `runJob` endpoints

use serde::{Deserialize, Serialize};

use crate::domain::job::JobIdentity;

/// Value of the `xml` flag asking the server for an XML-ish body
pub const XML_FLAG: &str = "Y";

/// Query for `/jobStatus`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatusRequest {
    pub name: String,
    pub xml: String,
}

impl JobStatusRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xml: XML_FLAG.to_string(),
        }
    }
}

/// Query for `/runJob`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunJobRequest {
    /// Full job key (`folder + name`)
    pub job: String,
    pub xml: String,
}

impl RunJobRequest {
    pub fn new(job: &JobIdentity) -> Self {
        Self {
            job: job.key(),
            xml: XML_FLAG.to_string(),
        }
    }
}
