//! In-process fakes for use case tests

use crate::ports::content_loader::{ContentLoader, ContentSource, LoadError, SourceDocument};
use crate::ports::content_store::{ContentStore, StoreError};
use crate::ports::event_log::{EventLog, PipelineEvent};
use crate::ports::oracle_gateway::{
    GatewayError, OracleGateway, OracleRequest, RemoteFile, RemoteFileId,
};
use crate::ports::pdf_engine::{DocumentError, PdfDocument, PdfEngine};
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use score_domain::{ContentDigest, PageRange, PageSize};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Bytes that pass the PDF magic check, unique per `tag`
pub fn pdf_bytes(tag: &str) -> Vec<u8> {
    format!("%PDF-1.7\n% {}\n%%EOF", tag).into_bytes()
}

// ==================== Gateway ====================

/// Gateway answering `respond` from a script, in call order
pub struct FakeGateway {
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    files: Mutex<Vec<RemoteFile>>,
    uploads: Mutex<Vec<String>>,
    list_error: Option<GatewayError>,
    delay: Option<Duration>,
    respond_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn with_responses(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            files: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            list_error: None,
            delay: None,
            respond_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_files(self, files: Vec<RemoteFile>) -> Self {
        *self.files.lock().unwrap() = files;
        self
    }

    pub fn with_list_error(mut self, error: GatewayError) -> Self {
        self.list_error = Some(error);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond_calls(&self) -> usize {
        self.respond_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl OracleGateway for FakeGateway {
    async fn list_files(&self) -> Result<Vec<RemoteFile>, GatewayError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.list_error {
            return Err(error.clone());
        }
        Ok(self.files.lock().unwrap().clone())
    }

    async fn upload_file(
        &self,
        filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<RemoteFileId, GatewayError> {
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(filename.to_string());
        let id = RemoteFileId::new(format!("file-{}", uploads.len()));
        self.files.lock().unwrap().push(RemoteFile {
            id: id.clone(),
            filename: filename.to_string(),
        });
        Ok(id)
    }

    async fn respond(&self, _request: &OracleRequest) -> Result<String, GatewayError> {
        self.respond_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        next.unwrap_or_else(|| Err(GatewayError::Other("no scripted response".to_string())))
    }
}

// ==================== Loader / Store ====================

/// Loads only `ContentSource::Bytes`, enforcing the byte budget
pub struct FakeLoader;

#[async_trait]
impl ContentLoader for FakeLoader {
    async fn load(
        &self,
        source: &ContentSource,
        max_bytes: u64,
    ) -> Result<SourceDocument, LoadError> {
        match source {
            ContentSource::Bytes { name, data } => {
                if data.len() as u64 > max_bytes {
                    return Err(LoadError::TooLarge {
                        size: data.len() as u64,
                        limit: max_bytes,
                    });
                }
                Ok(SourceDocument::new(name.clone(), data.clone()))
            }
            other => Err(LoadError::NotFound(other.describe())),
        }
    }
}

/// Store keeping everything in a map under a fake `/cache` directory
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    cached: Mutex<Vec<PathBuf>>,
    written: Mutex<Vec<PathBuf>>,
    scratch: AtomicUsize,
}

impl MemoryStore {
    pub fn cached_count(&self) -> usize {
        self.cached.lock().unwrap().len()
    }

    pub fn written(&self) -> Vec<PathBuf> {
        self.written.lock().unwrap().clone()
    }
}

impl ContentStore for MemoryStore {
    fn cache(&self, digest: &ContentDigest, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let path = PathBuf::from("/cache").join(digest.file_name());
        let mut files = self.files.lock().unwrap();
        if !files.contains_key(&path) {
            files.insert(path.clone(), bytes.to_vec());
            self.cached.lock().unwrap().push(path.clone());
        }
        Ok(path)
    }

    fn scratch_path(&self, stem: &str) -> PathBuf {
        let n = self.scratch.fetch_add(1, Ordering::SeqCst);
        PathBuf::from("/cache").join(format!("{}-{}.pdf", stem, n))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), bytes.to_vec());
        self.written.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

// ==================== PDF engine ====================

#[derive(Default)]
struct EngineCalls {
    extracted: Vec<(u32, u32)>,
    rotated: Vec<(Vec<u32>, i64)>,
}

/// Engine whose documents have fixed page sizes regardless of the bytes
pub struct FakeEngine {
    sizes: Vec<PageSize>,
    unreadable: bool,
    calls: Arc<Mutex<EngineCalls>>,
}

impl FakeEngine {
    pub fn with_sizes(sizes: Vec<PageSize>) -> Self {
        Self {
            sizes,
            unreadable: false,
            calls: Arc::new(Mutex::new(EngineCalls::default())),
        }
    }

    pub fn portrait(pages: usize) -> Self {
        Self::with_sizes(vec![PageSize::new(595.0, 842.0); pages])
    }

    /// Engine that fails to open anything
    pub fn unreadable() -> Self {
        Self {
            unreadable: true,
            ..Self::with_sizes(Vec::new())
        }
    }

    pub fn extracted(&self) -> Vec<(u32, u32)> {
        self.calls.lock().unwrap().extracted.clone()
    }

    pub fn rotated(&self) -> Vec<(Vec<u32>, i64)> {
        self.calls.lock().unwrap().rotated.clone()
    }
}

impl PdfEngine for FakeEngine {
    fn open(&self, _bytes: &[u8]) -> Result<Box<dyn PdfDocument>, DocumentError> {
        if self.unreadable {
            return Err(DocumentError::Unreadable("no trailer".into()));
        }
        Ok(Box::new(FakeDocument {
            sizes: self.sizes.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct FakeDocument {
    sizes: Vec<PageSize>,
    calls: Arc<Mutex<EngineCalls>>,
}

impl PdfDocument for FakeDocument {
    fn page_count(&self) -> u32 {
        self.sizes.len() as u32
    }

    fn page_sizes(&self) -> Result<Vec<PageSize>, DocumentError> {
        Ok(self.sizes.clone())
    }

    fn extract_pages(&self, range: PageRange) -> Result<Vec<u8>, DocumentError> {
        if range.end() > self.page_count() {
            return Err(DocumentError::PageOutOfRange {
                page: range.end(),
                total: self.page_count(),
            });
        }
        self.calls
            .lock()
            .unwrap()
            .extracted
            .push((range.start(), range.end()));
        Ok(format!("pages {}-{}", range.start(), range.end()).into_bytes())
    }

    fn rotate_pages(&self, pages: &[u32], degrees: i64) -> Result<Vec<u8>, DocumentError> {
        self.calls
            .lock()
            .unwrap()
            .rotated
            .push((pages.to_vec(), degrees));
        Ok(b"rotated".to_vec())
    }
}

// ==================== Progress / events ====================

#[derive(Default)]
pub struct RecordingEventLog {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingEventLog {
    pub fn count(&self, event_type: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }
}

impl EventLog for RecordingEventLog {
    fn record(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    started: Mutex<Option<usize>>,
    completions: Mutex<Vec<usize>>,
}

impl RecordingProgress {
    pub fn started(&self) -> Option<usize> {
        *self.started.lock().unwrap()
    }

    pub fn completions(&self) -> Vec<usize> {
        self.completions.lock().unwrap().clone()
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_replicas_start(&self, total: usize) {
        *self.started.lock().unwrap() = Some(total);
    }

    fn on_replica_complete(&self, completed: usize, _total: usize, _success: bool) {
        self.completions.lock().unwrap().push(completed);
    }
}
