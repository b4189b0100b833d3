//! Bounded retry policy.
//!
//! # Responsibilities
//! - Run an async operation up to `max_attempts` times
//! - Sleep between attempts per the backoff schedule, never after the last
//! - Report the final error together with the attempt count
//!
//! The policy knows nothing about what it retries; the liveness probe and
//! any other caller supply the operation.

use std::future::Future;
use std::time::Duration;

use crate::config::schema::LivenessConfig;
use crate::resilience::backoff::{calculate_backoff, BackoffKind};

/// Every attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// Max attempts plus the delay schedule between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    interval: Duration,
    backoff: BackoffKind,
    max_delay: Duration,
}

impl RetryPolicy {
    /// Fixed delay between attempts. `max_attempts` is clamped to at least one.
    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval,
            backoff: BackoffKind::Fixed,
            max_delay: interval,
        }
    }

    /// Jittered doubling delay starting at `base`, capped at `max_delay`.
    pub fn exponential(max_attempts: u32, base: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            interval: base,
            backoff: BackoffKind::Exponential,
            max_delay,
        }
    }

    pub fn from_config(config: &LivenessConfig) -> Self {
        let interval = Duration::from_millis(config.retry_interval_ms);
        match config.backoff {
            BackoffKind::Fixed => Self::fixed(config.max_attempts, interval),
            BackoffKind::Exponential => Self::exponential(
                config.max_attempts,
                interval,
                Duration::from_millis(config.max_delay_ms),
            ),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay after failed attempt `attempt` (1-based); `None` after the last.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        Some(match self.backoff {
            BackoffKind::Fixed => self.interval,
            BackoffKind::Exponential => calculate_backoff(
                attempt,
                self.interval.as_millis() as u64,
                self.max_delay.as_millis() as u64,
            ),
        })
    }

    /// Run `op` until it succeeds or the attempts run out.
    ///
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => match self.delay_after(attempt) {
                    Some(delay) => {
                        tracing::debug!(
                            attempt,
                            max_attempts = self.max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Attempt failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => {
                        return Err(RetryExhausted {
                            attempts: attempt,
                            last_error: e,
                        })
                    }
                },
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&LivenessConfig::default())
    }
}
