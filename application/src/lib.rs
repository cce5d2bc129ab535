//! Application layer for score-quorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AnalysisConfig, BackoffPolicy};
pub use ports::{
    content_loader::{ContentLoader, ContentSource, LoadError, SourceDocument},
    content_store::{ContentStore, StoreError},
    event_log::{EventLog, NoEventLog, PipelineEvent, event_types},
    oracle_gateway::{
        ContentRef, GatewayError, OracleGateway, OracleRequest, RemoteFile, RemoteFileId,
    },
    pdf_engine::{DocumentError, PdfDocument, PdfEngine},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::analyse::{AnalyseScoreUseCase, AnalysisInput, AnalysisReport, SinglePartReport};
pub use use_cases::errors::{AnalysisError, ValidationError};
pub use use_cases::normalize_orientation::{
    NormalizeError, NormalizeInput, NormalizeOrientationUseCase, NormalizeOutput,
};
pub use use_cases::prepare_content::{
    AnalysisSource, PrepareContentUseCase, PreparedContent, find_submitted,
};
pub use use_cases::run_replicas::{ReplicaFailure, ReplicaOrchestrator, ReplicaOutcome};
pub use use_cases::split_parts::{
    SplitArtifact, SplitError, SplitInput, SplitOutput, SplitPartsUseCase, SplitReport,
    SplitTarget,
};
