//! Split parts use case
//!
//! Materializes a part list as one document per part.

use crate::ports::content_loader::SourceDocument;
use crate::ports::content_store::{ContentStore, StoreError};
use crate::ports::event_log::{EventLog, NoEventLog, PipelineEvent, event_types};
use crate::ports::pdf_engine::{DocumentError, PdfEngine};
use crate::use_cases::analyse::AnalysisReport;
use crate::use_cases::errors::ValidationError;
use score_domain::{DroppedDetection, InstrumentRecord, SplitPlan};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while splitting
#[derive(Error, Debug)]
pub enum SplitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Output error: {0}")]
    Store(#[from] StoreError),
}

/// Where split parts go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitTarget {
    /// Write files into this directory, creating it if needed
    Directory(PathBuf),
    /// Return the bytes of each part
    InMemory,
}

impl SplitTarget {
    /// `{stem}_parts` next to `source`
    pub fn beside(source: &Path) -> Self {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "score".to_string());
        let parent = source.parent().unwrap_or_else(|| Path::new(""));
        SplitTarget::Directory(parent.join(format!("{}_parts", stem)))
    }
}

/// A written part: a file path or in-memory bytes, never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitArtifact {
    File(PathBuf),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitOutput {
    pub index: usize,
    pub name: String,
    pub voice: Option<String>,
    pub start_page: u32,
    pub end_page: u32,
    pub filename: String,
    #[serde(skip)]
    pub artifact: SplitArtifact,
}

impl SplitOutput {
    pub fn path(&self) -> Option<&Path> {
        match &self.artifact {
            SplitArtifact::File(path) => Some(path),
            SplitArtifact::Bytes(_) => None,
        }
    }
}

/// Input for the SplitParts use case
#[derive(Debug, Clone)]
pub struct SplitInput {
    pub document: SourceDocument,
    pub records: Vec<InstrumentRecord>,
    pub target: SplitTarget,
}

impl SplitInput {
    pub fn new(document: SourceDocument, records: Vec<InstrumentRecord>, target: SplitTarget) -> Self {
        Self {
            document,
            records,
            target,
        }
    }

    /// Split the consensus of an analysis; needs the local document
    pub fn from_report(report: AnalysisReport, target: SplitTarget) -> Result<Self, ValidationError> {
        let records = report.consensus.records();
        let document = report
            .document
            .ok_or(ValidationError::LocalDocumentRequired)?;
        Ok(Self::new(document, records, target))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SplitReport {
    pub outputs: Vec<SplitOutput>,
    pub dropped: Vec<DroppedDetection>,
}

/// Use case for splitting a document into parts
pub struct SplitPartsUseCase {
    engine: Arc<dyn PdfEngine>,
    store: Arc<dyn ContentStore>,
    events: Arc<dyn EventLog>,
}

impl SplitPartsUseCase {
    pub fn new(engine: Arc<dyn PdfEngine>, store: Arc<dyn ContentStore>) -> Self {
        Self {
            engine,
            store,
            events: Arc::new(NoEventLog),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventLog>) -> Self {
        self.events = events;
        self
    }

    pub fn execute(&self, input: &SplitInput) -> Result<SplitReport, SplitError> {
        let source = self.engine.open(&input.document.bytes)?;
        let total_pages = source.page_count();
        if total_pages == 0 {
            return Err(ValidationError::EmptyDocument.into());
        }

        let plan = SplitPlan::build(&input.records, total_pages);
        info!(
            "Splitting {} ({} pages) into {} part(s)",
            input.document.name,
            total_pages,
            plan.parts.len()
        );

        for dropped in &plan.dropped {
            warn!(
                "Skipping entry {} ({}): missing {}",
                dropped.index,
                dropped.name.as_deref().unwrap_or("unnamed"),
                dropped.missing
            );
            self.events.record(PipelineEvent::new(
                event_types::DETECTION_DROPPED,
                json!({ "index": dropped.index, "name": dropped.name, "missing": dropped.missing }),
            ));
        }

        let mut outputs = Vec::with_capacity(plan.parts.len());
        for part in &plan.parts {
            let bytes = source.extract_pages(part.range)?;
            debug!("Part {} covers {}", part.filename, part.range);

            let artifact = match &input.target {
                SplitTarget::Directory(dir) => {
                    let path = dir.join(&part.filename);
                    self.store.write(&path, &bytes)?;
                    SplitArtifact::File(path)
                }
                SplitTarget::InMemory => SplitArtifact::Bytes(bytes),
            };

            self.events.record(PipelineEvent::new(
                event_types::PART_WRITTEN,
                json!({
                    "index": part.index,
                    "filename": part.filename,
                    "start_page": part.range.start(),
                    "end_page": part.range.end(),
                }),
            ));

            outputs.push(SplitOutput {
                index: part.index,
                name: part.name.clone(),
                voice: part.voice.clone(),
                start_page: part.range.start(),
                end_page: part.range.end(),
                filename: part.filename.clone(),
                artifact,
            });
        }

        Ok(SplitReport {
            outputs,
            dropped: plan.dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{FakeEngine, MemoryStore, RecordingEventLog, pdf_bytes};

    fn document() -> SourceDocument {
        SourceDocument::new("score.pdf", pdf_bytes("split"))
    }

    fn records() -> Vec<InstrumentRecord> {
        vec![
            InstrumentRecord::new("Trumpet", Some("1"), 1, 5),
            InstrumentRecord::new("Clarinet", None, 6, 12),
        ]
    }

    #[test]
    fn test_split_into_directory() {
        let engine = Arc::new(FakeEngine::portrait(12));
        let store = Arc::new(MemoryStore::default());
        let events = Arc::new(RecordingEventLog::default());
        let use_case = SplitPartsUseCase::new(engine.clone(), store.clone()).with_events(events.clone());

        let report = use_case
            .execute(&SplitInput::new(
                document(),
                records(),
                SplitTarget::Directory(PathBuf::from("/out")),
            ))
            .unwrap();

        let filenames: Vec<_> = report.outputs.iter().map(|o| o.filename.as_str()).collect();
        assert_eq!(filenames, vec!["01 - Trumpet 1.pdf", "02 - Clarinet.pdf"]);
        assert_eq!(
            report.outputs[0].path(),
            Some(Path::new("/out/01 - Trumpet 1.pdf"))
        );
        assert_eq!(engine.extracted(), vec![(1, 5), (6, 12)]);
        assert_eq!(store.written().len(), 2);
        assert_eq!(events.count(event_types::PART_WRITTEN), 2);
    }

    #[test]
    fn test_split_in_memory() {
        let store = Arc::new(MemoryStore::default());
        let use_case = SplitPartsUseCase::new(Arc::new(FakeEngine::portrait(12)), store.clone());

        let report = use_case
            .execute(&SplitInput::new(document(), records(), SplitTarget::InMemory))
            .unwrap();

        assert!(matches!(report.outputs[0].artifact, SplitArtifact::Bytes(_)));
        assert!(report.outputs[0].path().is_none());
        assert!(store.written().is_empty());
    }

    #[test]
    fn test_ranges_corrected_and_gaps_kept() {
        let engine = Arc::new(FakeEngine::portrait(10));
        let events = Arc::new(RecordingEventLog::default());
        let use_case = SplitPartsUseCase::new(engine.clone(), Arc::new(MemoryStore::default()))
            .with_events(events.clone());
        let records = vec![
            InstrumentRecord::new("Viola", None, 8, 3),
            InstrumentRecord {
                name: Some("Ghost".into()),
                ..Default::default()
            },
            InstrumentRecord::new("Cello", None, 9, 40),
        ];

        let report = use_case
            .execute(&SplitInput::new(document(), records, SplitTarget::InMemory))
            .unwrap();

        assert_eq!(report.outputs.len(), 2);
        assert_eq!((report.outputs[0].start_page, report.outputs[0].end_page), (3, 8));
        assert_eq!(report.outputs[1].index, 3);
        assert_eq!(report.outputs[1].filename, "03 - Cello.pdf");
        assert_eq!((report.outputs[1].start_page, report.outputs[1].end_page), (9, 10));
        assert_eq!(report.dropped.len(), 1);
        assert_eq!(events.count(event_types::DETECTION_DROPPED), 1);
    }

    #[test]
    fn test_empty_document_rejected() {
        let use_case = SplitPartsUseCase::new(
            Arc::new(FakeEngine::portrait(0)),
            Arc::new(MemoryStore::default()),
        );

        let err = use_case
            .execute(&SplitInput::new(document(), records(), SplitTarget::InMemory))
            .unwrap_err();

        assert!(matches!(
            err,
            SplitError::Validation(ValidationError::EmptyDocument)
        ));
    }

    #[test]
    fn test_default_directory_beside_source() {
        assert_eq!(
            SplitTarget::beside(Path::new("/scores/march.pdf")),
            SplitTarget::Directory(PathBuf::from("/scores/march_parts"))
        );
    }
}
