//! Scripted in-memory server for unit tests

use async_trait::async_trait;
use kettle_client::{ClientError, KettleTransport};
use kettle_core::dto::job::{JobStatusRequest, RunJobRequest};
use std::collections::VecDeque;
use std::sync::Mutex;

/// A request the scripted server received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `jobStatus` with the job name
    Status(String),
    /// `runJob` with the job key
    Run(String),
}

enum Reply {
    Body(String),
    Failure(u16),
}

impl Reply {
    fn into_result(self) -> kettle_client::Result<String> {
        match self {
            Reply::Body(body) => Ok(body),
            Reply::Failure(status) => Err(ClientError::api_error(status, "scripted failure")),
        }
    }
}

/// Answers status and start requests from two queues and records every call
#[derive(Default)]
pub struct ScriptedTransport {
    statuses: Mutex<VecDeque<Reply>>,
    starts: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<Call>>,
}

/// A `jobStatus` body shaped like the server's
pub fn status_body(desc: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<jobstatus><jobname>load_sales</jobname>\
         <id>7</id><status_desc>{}</status_desc><error_desc/></jobstatus>",
        desc
    )
}

/// A `runJob` body shaped like the server's
pub fn start_body(result: &str) -> String {
    format!(
        "<webresult><result>{}</result><message>Job started</message><id>7</id></webresult>",
        result
    )
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses<'s>(self, descs: impl IntoIterator<Item = &'s str>) -> Self {
        for desc in descs {
            self.push_status(Reply::Body(status_body(desc)));
        }
        self
    }

    pub fn with_status_body(self, body: &str) -> Self {
        self.push_status(Reply::Body(body.to_string()));
        self
    }

    pub fn with_status_failure(self, status: u16) -> Self {
        self.push_status(Reply::Failure(status));
        self
    }

    pub fn with_start(self, result: &str) -> Self {
        self.with_start_body(&start_body(result))
    }

    pub fn with_start_body(self, body: &str) -> Self {
        self.starts
            .lock()
            .unwrap()
            .push_back(Reply::Body(body.to_string()));
        self
    }

    pub fn with_start_failure(self, status: u16) -> Self {
        self.starts.lock().unwrap().push_back(Reply::Failure(status));
        self
    }

    /// Every request received, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Status(_)))
            .count()
    }

    pub fn run_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Run(_)))
            .count()
    }

    fn push_status(&self, reply: Reply) {
        self.statuses.lock().unwrap().push_back(reply);
    }
}

#[async_trait]
impl KettleTransport for ScriptedTransport {
    async fn job_status(&self, req: &JobStatusRequest) -> kettle_client::Result<String> {
        self.calls.lock().unwrap().push(Call::Status(req.name.clone()));
        let reply = self.statuses.lock().unwrap().pop_front();
        reply
            .unwrap_or_else(|| Reply::Failure(599))
            .into_result()
    }

    async fn run_job(&self, req: &RunJobRequest) -> kettle_client::Result<String> {
        self.calls.lock().unwrap().push(Call::Run(req.job.clone()));
        let reply = self.starts.lock().unwrap().pop_front();
        reply
            .unwrap_or_else(|| Reply::Failure(599))
            .into_result()
    }
}
