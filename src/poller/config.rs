//! Poller configuration.

use std::time::Duration;

/// Configuration for the scan poller.
///
/// The defaults mirror the baseline protocol: poll every 10 seconds and
/// keep polling until the service reports a terminal status. Both
/// ceilings are opt-in hardening; leaving them unset preserves the
/// unbounded-until-terminal contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Fixed wait time between successive status polls.
    pub poll_interval: Duration,

    /// Maximum number of polls to issue before giving up.
    ///
    /// `None` (the default) polls until a terminal status or an error.
    pub max_attempts: Option<u32>,

    /// Maximum elapsed time from submission before giving up.
    ///
    /// `None` (the default) imposes no time limit.
    pub max_poll_time: Option<Duration>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            max_attempts: None,
            max_poll_time: None,
        }
    }
}

impl PollerConfig {
    /// Creates a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the maximum number of poll attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts.max(1));
        self
    }

    /// Sets the maximum elapsed polling time.
    pub fn with_max_poll_time(mut self, limit: Duration) -> Self {
        self.max_poll_time = Some(limit);
        self
    }

    /// Returns `true` if a ceiling would be exceeded by issuing another
    /// poll after `attempts` polls and `elapsed` time.
    pub(crate) fn ceiling_reached(&self, attempts: u32, elapsed: Duration) -> bool {
        if let Some(max) = self.max_attempts {
            if attempts >= max {
                return true;
            }
        }
        if let Some(limit) = self.max_poll_time {
            if elapsed >= limit {
                return true;
            }
        }
        false
    }
}
