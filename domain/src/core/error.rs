//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),

    #[error("Invalid quorum rule: {0}")]
    InvalidQuorumRule(String),
}

impl DomainError {
    /// Check if this error came from an unusable oracle answer
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, DomainError::MalformedResponse(_))
    }
}
