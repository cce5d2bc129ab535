//! Digest-addressed document cache
//!
//! Stores each submitted document as `{sha256}.pdf` in one directory so the
//! file handed to the oracle carries its own identity.

use score_application::{ContentStore, StoreError};
use score_domain::ContentDigest;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Filesystem implementation of [`ContentStore`]
#[derive(Debug, Clone)]
pub struct DigestCache {
    dir: PathBuf,
}

impl DigestCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Cached location for `digest`, whether or not it exists yet
    pub fn path_for(&self, digest: &ContentDigest) -> PathBuf {
        self.dir.join(digest.file_name())
    }

    fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
        std::fs::create_dir_all(dir).map_err(|e| StoreError::CreateDir {
            path: dir.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl ContentStore for DigestCache {
    fn cache(&self, digest: &ContentDigest, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        Self::ensure_dir(&self.dir)?;
        let path = self.path_for(digest);
        if path.is_file() {
            debug!("Cache hit: {}", path.display());
            return Ok(path);
        }
        self.write(&path, bytes)?;
        debug!("Cached {} bytes at {}", bytes.len(), path.display());
        Ok(path)
    }

    fn scratch_path(&self, stem: &str) -> PathBuf {
        let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S%3f");
        let seq = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!("{}-{}-{}.pdf", stem, stamp, seq))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            Self::ensure_dir(parent)?;
        }
        std::fs::write(path, bytes).map_err(|e| StoreError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}
