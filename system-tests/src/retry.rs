// system-tests/src/retry.rs
// ============================================================================
// Module: Retry Helper
// Description: Exponential backoff around fallible async operations.
// Purpose: Offer bounded retries for callers that opt in.
// Dependencies: tokio, tracing
// ============================================================================

//! ## Overview
//! Scenarios issue each request exactly once; the client never retries. This
//! helper exists for ad-hoc callers that want a bounded retry loop with
//! doubling delays capped at [`RetryPolicy::max_delay`].

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::config::SuiteConfig;

/// Base delay before the first retry.
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);
/// Cap on any single retry delay.
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(2);

/// Bounded exponential backoff policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first; at least one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Upper bound for any delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Builds a policy from explicit values, clamping attempts to at least one.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// Builds a policy from the profile retry count.
    #[must_use]
    pub fn from_config(config: &SuiteConfig) -> Self {
        Self::new(config.retry_attempts.saturating_add(1), DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY)
    }

    /// Returns the delay after the given 1-based failed attempt.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let factor = 2u32.saturating_pow(exponent);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY)
    }
}

/// Runs `op` until it succeeds or the policy's attempts are exhausted.
///
/// `op` receives the 1-based attempt number.
///
/// # Errors
///
/// Returns the error from the final attempt.
pub async fn retry_with_backoff<T, E, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= policy.max_attempts => return Err(err),
            Err(err) => {
                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "retrying after failure"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
