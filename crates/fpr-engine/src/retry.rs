//! Retry and deadline policy for rule evaluation.

use std::time::Duration;

/// Default number of retries after the first failed attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default pause between attempts for the same rule.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// How hard to try before giving up on a rule.
///
/// A rule gets at most `max_retries + 1` oracle calls, separated by a fixed
/// `delay`. `attempt_timeout` bounds each call; `deadline` bounds the whole
/// fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
    pub attempt_timeout: Option<Duration>,
    pub deadline: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: DEFAULT_RETRY_DELAY,
            attempt_timeout: None,
            deadline: None,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = Some(timeout);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Upper bound on oracle calls for one rule.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}
