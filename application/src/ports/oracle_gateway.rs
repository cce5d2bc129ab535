//! Oracle gateway port
//!
//! Defines the interface for talking to the analysis oracle: a remote model
//! that reads a document and answers in text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during oracle gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Timeout")]
    Timeout,

    #[error("Request failed ({status}): {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether another attempt could succeed.
    ///
    /// Client errors other than 429 are permanent: retrying the same request
    /// yields the same answer.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Connection(_)
            | GatewayError::RateLimited(_)
            | GatewayError::Timeout
            | GatewayError::MalformedResponse(_) => true,
            GatewayError::RequestFailed { status, .. } => *status >= 500,
            GatewayError::Other(_) => false,
        }
    }
}

/// Identifier of a file already held by the oracle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteFileId(pub String);

impl RemoteFileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RemoteFileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entry of the oracle's file listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub id: RemoteFileId,
    pub filename: String,
}

/// How the oracle reaches the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRef {
    /// Previously uploaded file
    RemoteFile(RemoteFileId),
    /// URL the oracle fetches itself
    Url(String),
}

impl std::fmt::Display for ContentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentRef::RemoteFile(id) => write!(f, "file {}", id),
            ContentRef::Url(url) => write!(f, "url {}", url),
        }
    }
}

/// One question to the oracle: a document plus instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    pub content: ContentRef,
    pub instructions: String,
}

impl OracleRequest {
    pub fn new(content: ContentRef, instructions: impl Into<String>) -> Self {
        Self {
            content,
            instructions: instructions.into(),
        }
    }
}

/// Gateway for oracle communication
///
/// This port defines how the application layer talks to the oracle.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait OracleGateway: Send + Sync {
    /// List files previously uploaded to the oracle
    async fn list_files(&self) -> Result<Vec<RemoteFile>, GatewayError>;

    /// Upload a document under `filename`
    async fn upload_file(&self, filename: &str, bytes: Vec<u8>)
    -> Result<RemoteFileId, GatewayError>;

    /// Ask the oracle and return its raw output text
    async fn respond(&self, request: &OracleRequest) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GatewayError::Connection("reset".into()).is_retryable());
        assert!(GatewayError::RateLimited("slow down".into()).is_retryable());
        assert!(GatewayError::Timeout.is_retryable());
        assert!(GatewayError::MalformedResponse("not json".into()).is_retryable());
        assert!(
            GatewayError::RequestFailed {
                status: 503,
                message: "unavailable".into()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_permanent_errors() {
        assert!(
            !GatewayError::RequestFailed {
                status: 400,
                message: "bad request".into()
            }
            .is_retryable()
        );
        assert!(!GatewayError::Other("no api key".into()).is_retryable());
    }

    #[test]
    fn test_content_ref_display() {
        let content = ContentRef::RemoteFile(RemoteFileId::new("file-abc"));
        assert_eq!(content.to_string(), "file file-abc");
    }
}
