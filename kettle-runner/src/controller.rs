//! Job run controller
//!
//! Runs one job to completion:
//! 1. Wait while a previous run of the same job is still `Running`
//! 2. Ask the server to start the job
//! 3. Wait until the job reports `Finished` or `Finished (with errors)`
//!
//! The first wait keeps a job from being started twice. Two controllers
//! aimed at the same job both see `Running` and both wait; the server's own
//! one-run-per-job rule is what keeps them apart, not a lock held here.
//!
//! Both waits use the same polling routine and only differ in when they stop.
//! Any status text that is not one of the known markers counts as "still in
//! progress" and keeps the loop going, bounded by the optional timeout.

use chrono::Utc;
use kettle_client::KettleTransport;
use kettle_core::domain::job::{JobIdentity, JobStatus, RunOutcome, StatusSnapshot};
use kettle_core::domain::poll::PollConfig;
use kettle_core::dto::job::RunJobRequest;
use kettle_core::markup::{extract_tag, find_tag};
use std::fmt;
use std::ops::ControlFlow;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::error::{Result, RunError};
use crate::probe::{JobStatusProbe, log_body};

/// Tag holding the outcome of a `runJob` request
pub const RESULT_TAG: &str = "result";
/// `runJob` result meaning the server accepted the start
pub const START_ACCEPTED: &str = "OK";

/// Caller switches for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Hand the final status body back in [`RunOutcome::payload`]
    pub push_result: bool,
    /// Log raw server bodies at info level
    pub log_response: bool,
}

/// Which of the two polling loops is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// Waiting for an earlier run of the job to stop
    Preexisting,
    /// Waiting for the run we started to finish
    Completion,
}

impl fmt::Display for PollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollPhase::Preexisting => f.write_str("waiting for a previous run to finish"),
            PollPhase::Completion => f.write_str("waiting for the job to finish"),
        }
    }
}

/// Where a run currently stands
///
/// The terminal state is not listed: stepping out of `WaitingForCompletion`
/// breaks with the final status response instead.
#[derive(Debug)]
enum RunState {
    CheckingPreexisting,
    Starting,
    WaitingForCompletion,
}

/// Drives a single job through wait, start and wait
pub struct JobRunController<T> {
    transport: T,
    job: JobIdentity,
    poll: PollConfig,
    options: RunOptions,
}

impl<T: KettleTransport> JobRunController<T> {
    /// Creates a controller
    ///
    /// # Arguments
    /// * `transport` - Connection to the server, owned for the whole run
    /// * `job` - Folder and name of the job
    /// * `poll` - Cycle interval (already floored) and phase timeout
    /// * `options` - Result and logging switches
    pub fn new(transport: T, job: JobIdentity, poll: PollConfig, options: RunOptions) -> Self {
        Self {
            transport,
            job,
            poll,
            options,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs the job until it finishes
    ///
    /// # Returns
    /// The run outcome on a clean finish; with `push_result` set its payload
    /// is the exact body of the final status response
    ///
    /// # Errors
    /// - [`RunError::StartRejected`] when the start result is not `OK`
    /// - [`RunError::FinishedWithErrors`] when the job ends in error
    /// - [`RunError::TimedOut`] when a polling phase outlives the timeout
    /// - [`RunError::Transport`] when any request fails
    pub async fn run(&self) -> Result<RunOutcome> {
        let started_at = Utc::now();
        let probe = JobStatusProbe::new(&self.transport, &self.job.name, self.options.log_response);
        let mut polls = 0u32;

        info!(
            "Running job {} (cycle interval: {:?}, timeout: {:?})",
            self.job,
            self.poll.cycle_interval(),
            self.poll.timeout()
        );

        let mut state = RunState::CheckingPreexisting;
        let last = loop {
            state = match self.step(state, &probe, &mut polls).await? {
                ControlFlow::Continue(next) => next,
                ControlFlow::Break(snapshot) => break snapshot,
            };
        };

        info!("Job {} finished after {} status poll(s)", self.job, polls);

        Ok(RunOutcome {
            job: self.job.key(),
            payload: self.options.push_result.then_some(last.raw),
            polls,
            started_at,
            completed_at: Utc::now(),
        })
    }

    /// Advances the run by one state, breaking with the final status once finished
    async fn step(
        &self,
        state: RunState,
        probe: &JobStatusProbe<'_, T>,
        polls: &mut u32,
    ) -> Result<ControlFlow<StatusSnapshot, RunState>> {
        debug!("Job {} state: {:?}", self.job, state);

        match state {
            RunState::CheckingPreexisting => {
                self.poll_until(probe, PollPhase::Preexisting, polls, |status| {
                    !status.is_running()
                })
                .await?;
                Ok(ControlFlow::Continue(RunState::Starting))
            }
            RunState::Starting => {
                self.start().await?;
                Ok(ControlFlow::Continue(RunState::WaitingForCompletion))
            }
            RunState::WaitingForCompletion => {
                let snapshot = self
                    .poll_until(probe, PollPhase::Completion, polls, JobStatus::is_terminal)
                    .await?;

                match snapshot.status {
                    JobStatus::FinishedWithErrors => Err(RunError::FinishedWithErrors {
                        response: snapshot.raw,
                    }),
                    _ => Ok(ControlFlow::Break(snapshot)),
                }
            }
        }
    }

    /// Issues the start request and checks the server accepted it
    async fn start(&self) -> Result<()> {
        info!("Starting job {}", self.job);

        let body = self.transport.run_job(&RunJobRequest::new(&self.job)).await?;
        log_body("runJob", &body, self.options.log_response);

        if find_tag(RESULT_TAG, &body).is_none() {
            warn!("Start response for job {} has no <{}> tag", self.job, RESULT_TAG);
        }

        if extract_tag(RESULT_TAG, &body) != START_ACCEPTED {
            warn!("Server refused to start job {}", self.job);
            return Err(RunError::StartRejected { response: body });
        }

        info!("Job {} started", self.job);
        Ok(())
    }

    /// Polls until `done` accepts a status, sleeping one cycle between polls
    ///
    /// With a timeout, the deadline is fixed at the first poll of this call.
    /// The last sleep is cut short to end on the deadline, and no poll is
    /// sent once it has passed.
    async fn poll_until<F>(
        &self,
        probe: &JobStatusProbe<'_, T>,
        phase: PollPhase,
        polls: &mut u32,
        done: F,
    ) -> Result<StatusSnapshot>
    where
        F: Fn(&JobStatus) -> bool,
    {
        let began = Instant::now();
        let deadline = self.poll.timeout().map(|limit| began + limit);

        loop {
            let snapshot = probe.probe().await?;
            *polls += 1;

            if done(&snapshot.status) {
                return Ok(snapshot);
            }

            if self.poll.is_expired(began.elapsed()) {
                return Err(self.timed_out(phase, began, snapshot));
            }

            let wait = match deadline {
                Some(deadline) => self
                    .poll
                    .cycle_interval()
                    .min(deadline.saturating_duration_since(Instant::now())),
                None => self.poll.cycle_interval(),
            };

            match phase {
                PollPhase::Preexisting => {
                    info!("Job {} is already running. Waiting {:?}", self.job, wait)
                }
                PollPhase::Completion => {
                    debug!("Job {} is {}. Waiting {:?}", self.job, snapshot.status, wait)
                }
            }

            sleep(wait).await;

            if self.poll.is_expired(began.elapsed()) {
                return Err(self.timed_out(phase, began, snapshot));
            }
        }
    }

    /// Builds the timeout error for a phase that began at `began`
    fn timed_out(&self, phase: PollPhase, began: Instant, last: StatusSnapshot) -> RunError {
        let limit = self.poll.timeout().unwrap_or_default();
        warn!(
            "Job {}: gave up after {:?} {} (limit {:?})",
            self.job,
            began.elapsed(),
            phase,
            limit
        );

        RunError::TimedOut {
            phase,
            limit,
            response: last.raw,
        }
    }
}
