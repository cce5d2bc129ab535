//! Content loader port
//!
//! Brings a score document into memory from wherever the caller points,
//! enforcing the size limit before the bytes are fully read.

use async_trait::async_trait;
use score_domain::ContentDigest;
use std::path::PathBuf;
use thiserror::Error;

/// Where the document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Path(PathBuf),
    Url(String),
    Bytes { name: String, data: Vec<u8> },
}

impl ContentSource {
    /// Human-readable origin, used in logs
    pub fn describe(&self) -> String {
        match self {
            ContentSource::Path(path) => path.display().to_string(),
            ContentSource::Url(url) => url.clone(),
            ContentSource::Bytes { name, data } => format!("{} ({} bytes)", name, data.len()),
        }
    }
}

/// Errors that can occur while loading a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("Not a PDF document: {0}")]
    NotPdf(String),

    #[error("Content is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("Download failed: {0}")]
    Download(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// A document held in memory, identified by its content digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
    pub digest: ContentDigest,
    /// Local file the bytes came from, if any
    pub origin: Option<PathBuf>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let digest = ContentDigest::of(&bytes);
        Self {
            name: name.into(),
            bytes,
            digest,
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Loads documents within a byte budget
#[async_trait]
pub trait ContentLoader: Send + Sync {
    async fn load(
        &self,
        source: &ContentSource,
        max_bytes: u64,
    ) -> Result<SourceDocument, LoadError>;
}
