//! Retry configuration from TOML (`[retry]` section)

use score_application::BackoffPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    /// Attempts per replica, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; later retries wait linearly longer
    pub base_delay_ms: u64,
    /// Jitter fraction (0.0 - 1.0)
    pub jitter: f64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1500,
            jitter: 0.1,
        }
    }
}

impl FileRetryConfig {
    pub fn to_backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_base_delay(Duration::from_millis(self.base_delay_ms))
            .with_jitter(self.jitter)
    }
}
