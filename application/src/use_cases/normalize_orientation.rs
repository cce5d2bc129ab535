//! Normalize orientation use case
//!
//! Rotates the minority pages of a document so every page shares the
//! majority orientation.

use crate::ports::content_loader::SourceDocument;
use crate::ports::content_store::{ContentStore, StoreError};
use crate::ports::event_log::{EventLog, NoEventLog, PipelineEvent, event_types};
use crate::ports::pdf_engine::{DocumentError, PdfEngine};
use score_domain::orientation::{DEFAULT_THRESHOLD_PERCENT, QUARTER_TURN};
use score_domain::OrientationPlan;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Output error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct NormalizeInput {
    pub document: SourceDocument,
    /// Explicit destination; a fresh file in the cache directory otherwise
    pub output: Option<PathBuf>,
    pub threshold_percent: f64,
}

impl NormalizeInput {
    pub fn new(document: SourceDocument) -> Self {
        Self {
            document,
            output: None,
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_threshold(mut self, threshold_percent: f64) -> Self {
        self.threshold_percent = threshold_percent;
        self
    }
}

#[derive(Debug, Clone)]
pub struct NormalizeOutput {
    pub path: PathBuf,
    pub plan: OrientationPlan,
}

/// Use case for normalizing page orientation
pub struct NormalizeOrientationUseCase {
    engine: Arc<dyn PdfEngine>,
    store: Arc<dyn ContentStore>,
    events: Arc<dyn EventLog>,
}

impl NormalizeOrientationUseCase {
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

    pub fn execute(&self, input: &NormalizeInput) -> Result<NormalizeOutput, NormalizeError> {
        let document = self.engine.open(&input.document.bytes)?;
        let plan = OrientationPlan::from_sizes(&document.page_sizes()?, input.threshold_percent);

        info!(
            "{}: {}/{} pages landscape, target {}, rotating {}",
            input.document.name,
            plan.landscape_count,
            plan.total,
            plan.target,
            plan.rotations.len()
        );
        self.events.record(PipelineEvent::new(
            event_types::ORIENTATION_PLANNED,
            json!({
                "target": plan.target,
                "landscape": plan.landscape_count,
                "total": plan.total,
                "rotations": plan.rotations,
            }),
        ));

        let bytes = document.rotate_pages(&plan.rotations, QUARTER_TURN)?;
        let path = match &input.output {
            Some(path) => path.clone(),
            None => self
                .store
                .scratch_path(&format!("{}_normalized", stem_of(&input.document.name))),
        };
        self.store.write(&path, &bytes)?;

        Ok(NormalizeOutput { path, plan })
    }
}

fn stem_of(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string())
}
