//! Polling policy for read operations.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use super::OperationStatus;

/// Default number of polls after the initial result fetch.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Default delay between polls: 1 second.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;

/// Bounded polling policy: at most `max_retries` polls, `poll_interval`
/// seconds apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct PollPolicy {
    /// Maximum number of polls after the initial result fetch
    #[cfg_attr(
        feature = "config",
        arg(long = "max-retries", env = "READ_MAX_RETRIES", default_value = "10")
    )]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between polls in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "poll-interval", env = "READ_POLL_INTERVAL", default_value = "1")
    )]
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval: u64,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            poll_interval: default_poll_interval_secs(),
        }
    }
}

impl PollPolicy {
    /// Creates a policy with the given retry budget and interval in seconds.
    pub fn new(max_retries: u32, poll_interval_secs: u64) -> Self {
        Self {
            max_retries,
            poll_interval: poll_interval_secs,
        }
    }

    /// Returns the delay between polls.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    /// Set the retry budget.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the delay between polls in seconds.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval_secs: u64) -> Self {
        self.poll_interval = poll_interval_secs;
        self
    }

    /// Decides whether another poll is due, given the last observed status
    /// and the number of polls already performed.
    #[must_use]
    pub const fn should_continue_polling(&self, status: OperationStatus, attempt: u32) -> bool {
        status.is_pending() && attempt < self.max_retries
    }

    /// Upper bound of time spent sleeping between polls, saturating at
    /// [`Duration::MAX`].
    pub fn max_wait(&self) -> Duration {
        self.interval().saturating_mul(self.max_retries)
    }
}
