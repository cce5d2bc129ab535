//! Prepare content use case
//!
//! Turns caller input into something the oracle can read: either a direct
//! URL, or a local document that is cached by digest and uploaded once.

use crate::ports::content_loader::{ContentLoader, ContentSource, SourceDocument};
use crate::ports::content_store::ContentStore;
use crate::ports::event_log::{EventLog, NoEventLog, PipelineEvent, event_types};
use crate::ports::oracle_gateway::{ContentRef, GatewayError, OracleGateway, RemoteFileId};
use crate::use_cases::errors::{AnalysisError, ValidationError};
use score_domain::ContentDigest;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What to analyse: a document we read ourselves, or a URL handed to the
/// oracle untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisSource {
    Content(ContentSource),
    DirectUrl(String),
}

impl AnalysisSource {
    /// Build from the two mutually exclusive caller inputs
    pub fn from_parts(
        content: Option<ContentSource>,
        file_url: Option<String>,
    ) -> Result<Self, ValidationError> {
        match (content, file_url) {
            (Some(_), Some(_)) => Err(ValidationError::ConflictingSources),
            (None, None) => Err(ValidationError::MissingSource),
            (Some(content), None) => Ok(AnalysisSource::Content(content)),
            (None, Some(url)) => {
                let trimmed = url.trim();
                if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                    Ok(AnalysisSource::DirectUrl(trimmed.to_string()))
                } else {
                    Err(ValidationError::InvalidUrl(url))
                }
            }
        }
    }
}

/// Document ready for the oracle
#[derive(Debug, Clone)]
pub struct PreparedContent {
    pub content: ContentRef,
    /// Local copy, absent for direct URLs
    pub document: Option<SourceDocument>,
    pub cached_path: Option<PathBuf>,
    /// Whether an earlier upload of the same bytes was found
    pub reused_upload: bool,
}

impl PreparedContent {
    pub fn digest(&self) -> Option<&ContentDigest> {
        self.document.as_ref().map(|d| &d.digest)
    }
}

/// Look for an earlier upload of `digest` in the oracle's file listing
pub async fn find_submitted<G: OracleGateway + ?Sized>(
    gateway: &G,
    digest: &ContentDigest,
) -> Result<Option<RemoteFileId>, GatewayError> {
    let files = gateway.list_files().await?;
    Ok(files
        .into_iter()
        .find(|f| ContentDigest::from_filename(&f.filename).as_ref() == Some(digest))
        .map(|f| f.id))
}

/// Use case for preparing content
pub struct PrepareContentUseCase<G: OracleGateway + 'static> {
    gateway: Arc<G>,
    loader: Arc<dyn ContentLoader>,
    store: Arc<dyn ContentStore>,
    events: Arc<dyn EventLog>,
}

impl<G: OracleGateway + 'static> PrepareContentUseCase<G> {
    pub fn new(
        gateway: Arc<G>,
        loader: Arc<dyn ContentLoader>,
        store: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            gateway,
            loader,
            store,
            events: Arc::new(NoEventLog),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventLog>) -> Self {
        self.events = events;
        self
    }

    pub async fn execute(
        &self,
        source: &AnalysisSource,
        max_bytes: u64,
    ) -> Result<PreparedContent, AnalysisError> {
        let content = match source {
            AnalysisSource::DirectUrl(url) => {
                debug!("Passing {} to the oracle directly", url);
                return Ok(PreparedContent {
                    content: ContentRef::Url(url.clone()),
                    document: None,
                    cached_path: None,
                    reused_upload: false,
                });
            }
            AnalysisSource::Content(content) => content,
        };

        let document = self.loader.load(content, max_bytes).await?;
        info!(
            "Loaded {} ({} bytes, digest {})",
            document.name,
            document.len(),
            document.digest.short()
        );

        let cached_path = self.store.cache(&document.digest, &document.bytes)?;
        debug!("Cached at {}", cached_path.display());

        let existing = match find_submitted(self.gateway.as_ref(), &document.digest).await {
            Ok(existing) => existing,
            Err(e) => {
                warn!("Could not list uploaded files, uploading again: {}", e);
                None
            }
        };

        let (file_id, reused_upload) = match existing {
            Some(id) => {
                info!("Reusing upload {} for {}", id, document.digest.short());
                self.events.record(PipelineEvent::new(
                    event_types::UPLOAD_REUSED,
                    json!({ "digest": document.digest, "file_id": id }),
                ));
                (id, true)
            }
            None => {
                let filename = document.digest.file_name();
                let id = self
                    .gateway
                    .upload_file(&filename, document.bytes.clone())
                    .await?;
                info!("Uploaded {} as {}", filename, id);
                self.events.record(PipelineEvent::new(
                    event_types::UPLOAD_CREATED,
                    json!({ "digest": document.digest, "file_id": id, "bytes": document.len() }),
                ));
                (id, false)
            }
        };

        Ok(PreparedContent {
            content: ContentRef::RemoteFile(file_id),
            document: Some(document),
            cached_path: Some(cached_path),
            reused_upload,
        })
    }
}
