//! Errors shared by the analysis use cases

use crate::ports::content_loader::LoadError;
use crate::ports::content_store::StoreError;
use crate::ports::oracle_gateway::GatewayError;
use crate::ports::pdf_engine::DocumentError;
use thiserror::Error;

/// Caller input that cannot be processed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Provide either a document or a file URL, not both")]
    ConflictingSources,

    #[error("No document or file URL provided")]
    MissingSource,

    #[error("Invalid file URL: {0}")]
    InvalidUrl(String),

    #[error("Splitting requires a local document, not only a file URL")]
    LocalDocumentRequired,

    #[error("Document has no pages")]
    EmptyDocument,

    #[error("Invalid content: {0}")]
    InvalidContent(String),
}

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Document is {size} bytes, limit is {limit}")]
    SizeLimitExceeded { size: u64, limit: u64 },

    #[error("All {attempted} replicas failed: {}", .sample.join("; "))]
    AllReplicasFailed {
        attempted: usize,
        sample: Vec<String>,
    },

    #[error("Failed to load document: {0}")]
    Load(LoadError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Cache error: {0}")]
    Cache(#[from] StoreError),
}

impl From<LoadError> for AnalysisError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::TooLarge { size, limit } => AnalysisError::SizeLimitExceeded { size, limit },
            LoadError::NotFound(_) | LoadError::NotAFile(_) | LoadError::NotPdf(_) => {
                AnalysisError::Validation(ValidationError::InvalidContent(err.to_string()))
            }
            LoadError::Download(_) | LoadError::Io(_) => AnalysisError::Load(err),
        }
    }
}
