//! Content loader for local paths, URLs and raw bytes
//!
//! Every source is held to the same byte budget. Local files are checked
//! through their metadata before reading; downloads are checked against
//! `Content-Length` and then counted while streaming, so an oversized body
//! is abandoned as soon as it crosses the limit.

use async_trait::async_trait;
use futures::StreamExt;
use score_application::{ContentLoader, ContentSource, LoadError, SourceDocument};
use std::path::Path;
use tracing::{debug, info};

/// Leading bytes of every PDF file
pub const PDF_MAGIC: &[u8] = b"%PDF-";

pub fn has_pdf_magic(bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
}

/// Loads documents from the filesystem and over HTTP
pub struct FsContentLoader {
    client: reqwest::Client,
}

impl Default for FsContentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FsContentLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn load_path(&self, path: &Path, max_bytes: u64) -> Result<SourceDocument, LoadError> {
        let display = path.display().to_string();
        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(display));
            }
            Err(e) => return Err(LoadError::Io(format!("{}: {}", display, e))),
        };

        if !metadata.is_file() {
            return Err(LoadError::NotAFile(display));
        }
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(LoadError::NotPdf(display));
        }
        if metadata.len() > max_bytes {
            return Err(LoadError::TooLarge {
                size: metadata.len(),
                limit: max_bytes,
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| LoadError::Io(format!("{}: {}", display, e)))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(display);

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(SourceDocument::new(name, bytes).with_origin(path))
    }

    async fn load_url(&self, url: &str, max_bytes: u64) -> Result<SourceDocument, LoadError> {
        info!("Downloading {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Download(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Download(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        if let Some(length) = response.content_length()
            && length > max_bytes
        {
            return Err(LoadError::TooLarge {
                size: length,
                limit: max_bytes,
            });
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| LoadError::Download(e.to_string()))?;
            let received = (bytes.len() + chunk.len()) as u64;
            if received > max_bytes {
                return Err(LoadError::TooLarge {
                    size: received,
                    limit: max_bytes,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        if !has_pdf_magic(&bytes) {
            return Err(LoadError::NotPdf(url.to_string()));
        }

        Ok(SourceDocument::new(file_name_from_url(url), bytes))
    }

    fn load_bytes(&self, name: &str, data: &[u8], max_bytes: u64) -> Result<SourceDocument, LoadError> {
        if data.len() as u64 > max_bytes {
            return Err(LoadError::TooLarge {
                size: data.len() as u64,
                limit: max_bytes,
            });
        }
        if !has_pdf_magic(data) {
            return Err(LoadError::NotPdf(name.to_string()));
        }
        Ok(SourceDocument::new(name, data.to_vec()))
    }
}

const FALLBACK_FILE_NAME: &str = "download.pdf";

/// Last non-empty path segment of `url`; the host never counts
fn file_name_from_url(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()?
                .rfind(|segment| !segment.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

#[async_trait]
impl ContentLoader for FsContentLoader {
    async fn load(
        &self,
        source: &ContentSource,
        max_bytes: u64,
    ) -> Result<SourceDocument, LoadError> {
        match source {
            ContentSource::Path(path) => self.load_path(path, max_bytes).await,
            ContentSource::Url(url) => self.load_url(url, max_bytes).await,
            ContentSource::Bytes { name, data } => self.load_bytes(name, data, max_bytes),
        }
    }
}
