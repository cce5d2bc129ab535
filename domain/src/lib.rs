//! Domain layer for score-quorum
//!
//! This crate contains the core data model and the pure algorithms of the
//! system. It performs no I/O and knows nothing about the oracle transport,
//! the PDF library or the terminal.
//!
//! # Core Concepts
//!
//! ## Replica Consensus
//!
//! The analysis oracle is asked the same question several times. Each answer
//! is an [`AnalysisResult`]; the [`quorum`] module reconciles them into one
//! [`ConsensusResult`]:
//!
//! - **Identity normalization**: `"Trumpet 1."` and `"trumpet 1"` land in the same bucket
//! - **Quorum**: a part must be seen by at least half of the contributing replicas
//! - **Tie-break**: page endpoints are picked by mode, falling back to the median
//!
//! ## Page Ranges
//!
//! The [`split`] module turns reconciled parts into deterministic, clamped
//! page ranges and output filenames. The [`orientation`] module decides which
//! pages must be rotated to share one majority orientation.

pub mod analysis;
pub mod config;
pub mod core;
pub mod document;
pub mod instrument;
pub mod orientation;
pub mod prompt;
pub mod quorum;
pub mod split;

// Re-export commonly used types
pub use analysis::{
    AnalysisResult, SinglePartAnswer, parse_analysis_response, parse_single_part_response,
};
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use document::ContentDigest;
pub use instrument::{IdentityKey, InstrumentPart, InstrumentRecord};
pub use orientation::{Orientation, OrientationPlan, PageSize};
pub use prompt::AnalysisPrompt;
pub use quorum::{
    ConsensusResult, QuorumRule, SinglePartConsensus, aggregate_instruments,
    aggregate_single_part,
};
pub use split::{DroppedDetection, PageRange, PlannedPart, SplitPlan, part_filename, sanitize};
