//! Analyse score use case
//!
//! Prepares the document, runs replicas and reconciles their answers.

use crate::config::AnalysisConfig;
use crate::ports::content_loader::{ContentLoader, SourceDocument};
use crate::ports::content_store::ContentStore;
use crate::ports::event_log::{EventLog, NoEventLog, PipelineEvent, event_types};
use crate::ports::oracle_gateway::{ContentRef, OracleGateway, OracleRequest};
use crate::ports::pdf_engine::PdfEngine;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::errors::AnalysisError;
use crate::use_cases::prepare_content::{AnalysisSource, PrepareContentUseCase, PreparedContent};
use crate::use_cases::run_replicas::{ReplicaFailure, ReplicaOrchestrator};
use score_domain::{
    AnalysisPrompt, ConsensusResult, ContentDigest, SinglePartConsensus, aggregate_instruments,
    aggregate_single_part, parse_analysis_response, parse_single_part_response,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the analysis use cases
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub source: AnalysisSource,
    /// Overrides the configured replicate count
    pub replicates: Option<usize>,
}

impl AnalysisInput {
    pub fn new(source: AnalysisSource) -> Self {
        Self {
            source,
            replicates: None,
        }
    }

    pub fn with_replicates(mut self, replicates: usize) -> Self {
        self.replicates = Some(replicates);
        self
    }
}

/// Result of a multi-part analysis
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub consensus: ConsensusResult,
    pub content: ContentRef,
    /// Local document, absent when the oracle read a URL directly
    pub document: Option<SourceDocument>,
    pub succeeded: usize,
    pub failures: Vec<ReplicaFailure>,
}

impl AnalysisReport {
    pub fn digest(&self) -> Option<&ContentDigest> {
        self.document.as_ref().map(|d| &d.digest)
    }
}

/// Result of a single-part analysis
#[derive(Debug, Clone)]
pub struct SinglePartReport {
    pub consensus: SinglePartConsensus,
    pub content: ContentRef,
    pub document: Option<SourceDocument>,
    pub succeeded: usize,
    pub failures: Vec<ReplicaFailure>,
}

/// Use case for analysing a score
pub struct AnalyseScoreUseCase<G: OracleGateway + 'static> {
    preparer: PrepareContentUseCase<G>,
    orchestrator: ReplicaOrchestrator<G>,
    engine: Arc<dyn PdfEngine>,
    events: Arc<dyn EventLog>,
    config: AnalysisConfig,
}

impl<G: OracleGateway + 'static> AnalyseScoreUseCase<G> {
    pub fn new(
        gateway: Arc<G>,
        loader: Arc<dyn ContentLoader>,
        store: Arc<dyn ContentStore>,
        engine: Arc<dyn PdfEngine>,
    ) -> Self {
        let config = AnalysisConfig::default();
        Self {
            preparer: PrepareContentUseCase::new(Arc::clone(&gateway), loader, store),
            orchestrator: ReplicaOrchestrator::new(gateway)
                .with_backoff(config.backoff)
                .with_call_timeout(config.call_timeout),
            engine,
            events: Arc::new(NoEventLog),
            config,
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.orchestrator = self
            .orchestrator
            .with_backoff(config.backoff)
            .with_call_timeout(config.call_timeout);
        self.config = config;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventLog>) -> Self {
        self.preparer = self.preparer.with_events(Arc::clone(&events));
        self.orchestrator = self.orchestrator.with_events(Arc::clone(&events));
        self.events = events;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Execute with default (no-op) progress
    pub async fn execute(&self, input: AnalysisInput) -> Result<AnalysisReport, AnalysisError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Multi-part analysis with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: AnalysisInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<AnalysisReport, AnalysisError> {
        let prepared = self.prepare(&input).await?;
        let request = OracleRequest::new(prepared.content.clone(), AnalysisPrompt::multi_part());

        let outcome = self
            .orchestrator
            .run(
                &request,
                self.replicates(&input),
                parse_analysis_response,
                progress,
            )
            .await?;

        let consensus = aggregate_instruments(&outcome.results, self.config.quorum);
        info!(
            "Consensus: {} instrument(s) from {} contributing replica(s), threshold {}",
            consensus.instruments.len(),
            consensus.contributing,
            consensus.threshold
        );
        for (key, count) in &consensus.rejected {
            info!("Below quorum: {} ({}/{})", key, count, consensus.threshold);
        }
        self.events.record(PipelineEvent::new(
            event_types::CONSENSUS_REACHED,
            json!({
                "instruments": consensus.instruments,
                "contributing": consensus.contributing,
                "threshold": consensus.threshold,
                "rejected": consensus
                    .rejected
                    .iter()
                    .map(|(key, count)| json!({ "identity": key.to_string(), "count": count }))
                    .collect::<Vec<_>>(),
            }),
        ));

        Ok(AnalysisReport {
            succeeded: outcome.results.len(),
            failures: outcome.failures,
            consensus,
            content: prepared.content,
            document: prepared.document,
        })
    }

    /// Single-part analysis: vote on name and voice, span the whole document
    pub async fn execute_single_part_with_progress(
        &self,
        input: AnalysisInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SinglePartReport, AnalysisError> {
        let prepared = self.prepare(&input).await?;

        let total_pages = match &prepared.document {
            Some(document) => match self.engine.open(&document.bytes) {
                Ok(opened) => Some(opened.page_count()),
                Err(e) => {
                    warn!("Page count unavailable for {}: {}", document.name, e);
                    None
                }
            },
            None => None,
        };

        let request = OracleRequest::new(prepared.content.clone(), AnalysisPrompt::single_part());
        let outcome = self
            .orchestrator
            .run(
                &request,
                self.replicates(&input),
                parse_single_part_response,
                progress,
            )
            .await?;

        let consensus = aggregate_single_part(&outcome.results, total_pages);
        info!(
            "Single part: {} (voice {:?}), pages 1-{}",
            consensus.name, consensus.voice, consensus.end_page
        );
        self.events.record(PipelineEvent::new(
            event_types::CONSENSUS_REACHED,
            json!({ "single_part": consensus, "answers": outcome.results.len() }),
        ));

        Ok(SinglePartReport {
            succeeded: outcome.results.len(),
            failures: outcome.failures,
            consensus,
            content: prepared.content,
            document: prepared.document,
        })
    }

    async fn prepare(&self, input: &AnalysisInput) -> Result<PreparedContent, AnalysisError> {
        let prepared = self
            .preparer
            .execute(&input.source, self.config.max_content_bytes)
            .await?;
        if prepared.reused_upload {
            info!("Document was analysed before, reusing its upload");
        }
        Ok(prepared)
    }

    fn replicates(&self, input: &AnalysisInput) -> usize {
        let count = self.config.effective_replicates(input.replicates);
        if input.replicates.unwrap_or(self.config.replicates) != count {
            warn!("Replicate count 0 requested, running {}", count);
        }
        count
    }
}
