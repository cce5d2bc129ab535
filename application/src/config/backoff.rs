//! Retry backoff for oracle calls.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounded retry with linearly increasing delay.
///
/// The delay before retry `n` (1-based count of failed attempts so far) is
/// `base_delay * n`, scaled by a jitter factor in `[1 - jitter, 1 + jitter]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BackoffPolicy {
    /// Total attempts per replica, including the first
    pub max_attempts: u32,
    pub base_delay: Duration,
    /// Jitter fraction, 0.0 disables jitter
    pub jitter: f64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1500),
            jitter: 0.1,
        }
    }
}

impl BackoffPolicy {
    /// Policy that tries once and never waits
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            jitter: 0.0,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Attempts actually made; never below 1
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Whether another attempt follows the `attempt`-th failure
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.attempts()
    }

    /// Delay after the `attempt`-th failed attempt.
    ///
    /// `jitter_sample` is a uniform sample from `[0, 1)`; 0.5 yields the
    /// unjittered delay.
    pub fn delay_for(&self, attempt: u32, jitter_sample: f64) -> Duration {
        let linear = self.base_delay.saturating_mul(attempt.max(1));
        let jitter = self.jitter.clamp(0.0, 1.0);
        let factor = 1.0 + jitter * (2.0 * jitter_sample.clamp(0.0, 1.0) - 1.0);
        linear.mul_f64(factor.max(0.0))
    }
}
