use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::WorkerError;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up and hand the error to the caller.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded retry with linear-doubling backoff: the n-th retry waits `base * n * 2`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_retries: u32,
    /// Base interval for backoff.
    pub base_interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_interval: Duration::from_secs(60),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            max_retries: cfg.max_retries,
            base_interval: Duration::from_secs(cfg.base_interval_secs),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_interval: Duration) -> Self {
        Self {
            max_retries,
            base_interval,
        }
    }

    /// `attempts` is the number of failed attempts so far (1 after the first failure).
    pub fn decide(&self, attempts: u32, err: &WorkerError) -> RetryDecision {
        if !err.is_retryable() || attempts >= self.max_retries {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.delay_for(attempts))
    }

    pub fn delay_for(&self, attempts: u32) -> Duration {
        self.base_interval.saturating_mul(attempts.saturating_mul(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> WorkerError {
        WorkerError::Transport("HTTP 502".into())
    }

    #[test]
    fn default_delays_are_120_then_240() {
        let p = RetryPolicy::default();
        assert_eq!(
            p.decide(1, &transport()),
            RetryDecision::RetryAfter(Duration::from_secs(120))
        );
        assert_eq!(
            p.decide(2, &transport()),
            RetryDecision::RetryAfter(Duration::from_secs(240))
        );
    }

    #[test]
    fn respects_max_retries() {
        let p = RetryPolicy::new(3, Duration::from_secs(1));
        assert!(matches!(p.decide(1, &transport()), RetryDecision::RetryAfter(_)));
        assert!(matches!(p.decide(2, &transport()), RetryDecision::RetryAfter(_)));
        assert_eq!(p.decide(3, &transport()), RetryDecision::NoRetry);
    }

    #[test]
    fn no_retry_for_config_errors() {
        let p = RetryPolicy::default();
        assert_eq!(
            p.decide(1, &WorkerError::Config("missing token".into())),
            RetryDecision::NoRetry
        );
    }

    #[test]
    fn from_config_section() {
        let cfg = RetryConfig {
            max_retries: 5,
            base_interval_secs: 10,
        };
        let p = RetryPolicy::from(&cfg);
        assert_eq!(p.max_retries, 5);
        assert_eq!(p.delay_for(3), Duration::from_secs(60));
    }
}
