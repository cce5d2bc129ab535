//! Analysis parameters, use case loop control.

use super::backoff::BackoffPolicy;
use score_domain::QuorumRule;
use std::time::Duration;

/// Largest document accepted for analysis (32 MiB)
pub const DEFAULT_MAX_CONTENT_BYTES: u64 = 32 * 1024 * 1024;

/// Parameters shared by the analysis use cases.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Independent oracle calls per analysis; values below 1 mean 1
    pub replicates: usize,
    pub quorum: QuorumRule,
    pub backoff: BackoffPolicy,
    /// Limit on a single oracle call, `None` waits indefinitely
    pub call_timeout: Option<Duration>,
    pub max_content_bytes: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            replicates: 3,
            quorum: QuorumRule::default(),
            backoff: BackoffPolicy::default(),
            call_timeout: Some(Duration::from_secs(600)),
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
        }
    }
}

impl AnalysisConfig {
    // ==================== Builder Methods ====================

    pub fn with_replicates(mut self, replicates: usize) -> Self {
        self.replicates = replicates;
        self
    }

    pub fn with_quorum(mut self, quorum: QuorumRule) -> Self {
        self.quorum = quorum;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_max_content_bytes(mut self, bytes: u64) -> Self {
        self.max_content_bytes = bytes;
        self
    }

    /// Replicate count for a run, `requested` overriding the configured
    /// count. Never below 1.
    pub fn effective_replicates(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.replicates).max(1)
    }
}
