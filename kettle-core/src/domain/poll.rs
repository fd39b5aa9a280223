//! Polling settings

use std::time::Duration;

/// Lowest cycle interval the server will be polled at, in seconds
pub const MIN_CYCLE_INTERVAL_SECS: u64 = 5;

/// How often to poll and how long a polling phase may last
///
/// The interval floor is applied here, once, so every loop built from the
/// same config sleeps the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    cycle_interval: Duration,
    timeout: Option<Duration>,
}

impl PollConfig {
    /// Creates a config from whole seconds
    ///
    /// # Arguments
    /// * `cycle_interval_secs` - Sleep between polls, raised to at least 5
    /// * `timeout_secs` - Limit for each polling phase, `0` for no limit
    pub fn new(cycle_interval_secs: u64, timeout_secs: u64) -> Self {
        let cycle_interval = Duration::from_secs(cycle_interval_secs.max(MIN_CYCLE_INTERVAL_SECS));
        let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Self {
            cycle_interval,
            timeout,
        }
    }

    pub fn cycle_interval(&self) -> Duration {
        self.cycle_interval
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether `elapsed` has used up the phase limit (never, when unbounded)
    pub fn is_expired(&self, elapsed: Duration) -> bool {
        self.timeout.is_some_and(|limit| elapsed >= limit)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(MIN_CYCLE_INTERVAL_SECS, 0)
    }
}
