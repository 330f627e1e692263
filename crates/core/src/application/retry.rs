// Persist retry policy

use tracing::warn;

use crate::application::worker::constants::{
    DEFAULT_BACKOFF_FACTOR, DEFAULT_MAX_PERSIST_ATTEMPTS, DEFAULT_RETRY_BASE_DELAY_MS,
};

/// What to do after a failed persist attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// Try again after the given backoff delay in ms
    Retry(u64),
    /// Attempts exhausted, stop retrying
    GiveUp,
}

/// Bounded exponential backoff for persist attempts.
///
/// `max_attempts` counts every attempt including the first one, so a
/// policy with `max_attempts = 3` makes one initial try and at most
/// two retries before giving up.
pub struct RetryPolicy {
    base_delay_ms: u64,
    backoff_factor: f64,
    max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(base_delay_ms: u64, backoff_factor: f64, max_attempts: u32) -> Self {
        Self {
            base_delay_ms,
            backoff_factor,
            max_attempts,
        }
    }

    /// Decide what to do after `failed_attempts` attempts have failed.
    ///
    /// `failed_attempts` is 1-based: pass 1 after the first failure.
    ///
    /// Backoff formula:
    /// delay = base_delay * (backoff_factor ^ (failed_attempts - 1))
    pub fn decide(&self, failed_attempts: u32) -> RetryDecision {
        if failed_attempts >= self.max_attempts {
            warn!(
                attempts = failed_attempts,
                max_attempts = self.max_attempts,
                "Max persist attempts reached"
            );
            return RetryDecision::GiveUp;
        }

        let exponent = failed_attempts.saturating_sub(1) as i32;
        let delay_ms = (self.base_delay_ms as f64 * self.backoff_factor.powi(exponent)) as u64;

        RetryDecision::Retry(delay_ms)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_RETRY_BASE_DELAY_MS,
            DEFAULT_BACKOFF_FACTOR,
            DEFAULT_MAX_PERSIST_ATTEMPTS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failure_retries_at_base_delay() {
        let policy = RetryPolicy::new(500, 2.0, 3);
        assert_eq!(policy.decide(1), RetryDecision::Retry(500));
    }

    #[test]
    fn test_backoff_doubles_per_failure() {
        let policy = RetryPolicy::new(500, 2.0, 5);
        assert_eq!(policy.decide(1), RetryDecision::Retry(500));
        assert_eq!(policy.decide(2), RetryDecision::Retry(1000));
        assert_eq!(policy.decide(3), RetryDecision::Retry(2000));
        assert_eq!(policy.decide(4), RetryDecision::Retry(4000));
    }

    #[test]
    fn test_gives_up_at_max_attempts() {
        let policy = RetryPolicy::new(500, 2.0, 3);
        assert_eq!(policy.decide(3), RetryDecision::GiveUp);
        assert_eq!(policy.decide(4), RetryDecision::GiveUp);
    }

    #[test]
    fn test_default_policy_allows_two_retries() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.decide(1), RetryDecision::Retry(500));
        assert_eq!(policy.decide(2), RetryDecision::Retry(1000));
        assert_eq!(policy.decide(3), RetryDecision::GiveUp);
    }
}
