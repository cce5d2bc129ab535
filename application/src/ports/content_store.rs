//! Content store port
//!
//! Local persistence: the digest-addressed cache and output files.

use score_domain::ContentDigest;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Failed to create directory {path}: {message}")]
    CreateDir { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },
}

pub trait ContentStore: Send + Sync {
    /// Keep `bytes` under `{digest}.pdf` in the cache directory.
    ///
    /// Writes only when the file is absent; returns its path either way.
    fn cache(&self, digest: &ContentDigest, bytes: &[u8]) -> Result<PathBuf, StoreError>;

    /// Fresh path in the cache directory, named after `stem`
    fn scratch_path(&self, stem: &str) -> PathBuf;

    /// Write `bytes` to `path`, creating parent directories
    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError>;
}
