//! Retry-with-backoff around individual API calls.
//!
//! The daemon would rather wait out a flaky network or a rebooting admin
//! panel than crash and lose its in-memory session, so transient failures
//! are retried forever with a ramping delay. Anything non-transient
//! propagates immediately; the caller treats that as fatal.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::ApiError;

/// Delay schedule for retries.
///
/// The first attempt retries immediately, then the delay ramps up and
/// holds at the last entry for as long as the outage lasts. A little
/// random jitter keeps a fleet of daemons from hammering a recovering
/// server in lockstep.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub delays: Vec<Duration>,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delays: vec![
                Duration::ZERO,
                Duration::from_secs(1),
                Duration::from_millis(1500),
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8),
                Duration::from_secs(16),
            ],
            max_jitter: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// A policy with no delays and no jitter, for tests.
    pub fn immediate() -> Self {
        Self {
            delays: vec![Duration::ZERO],
            max_jitter: Duration::ZERO,
        }
    }

    /// The delay before retry number `attempt` (zero-based), jitter
    /// included. Past the end of the schedule the last delay repeats.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let base = self
            .delays
            .get(attempt)
            .or(self.delays.last())
            .copied()
            .unwrap_or(Duration::ZERO);
        if base.is_zero() || self.max_jitter.is_zero() {
            return base;
        }
        let jitter_us = rand::rng()
            .random_range(0..=self.max_jitter.as_micros() as u64);
        base + Duration::from_micros(jitter_us)
    }
}

/// Runs `operation` until it succeeds or fails non-transiently.
///
/// `label` names the call in the retry logs so an outage is attributable
/// to an endpoint at a glance.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0usize;
    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(label, attempts = attempt + 1, "call recovered");
                }
                return Ok(value);
            }
            Err(err) if err.is_transient() => {
                let delay = policy.delay_for(attempt);
                attempt += 1;
                tracing::warn!(
                    error = %err,
                    label,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "transient API failure, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
