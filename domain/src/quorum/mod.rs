//! Replica consensus
//!
//! This module reconciles several independent oracle answers into one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  AnalysisResult × N                                              │
//! │        │                                                         │
//! │        ▼  IdentityKey (normalized name, normalized voice)        │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  AggregationBucket per key                                 │  │
//! │  │  - name / voice spellings   - observed starts / ends       │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │        │                                                         │
//! │        ▼  QuorumRule (default: ceil(contributing / 2))           │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  Endpoint selection: strict mode, else rounded median     │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │        │                                                         │
//! │        ▼                                                         │
//! │  ConsensusResult                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod bucket;
pub mod consensus;
pub mod rule;
pub mod selection;
pub mod single_part;
pub mod tally;

// Re-export main types
pub use bucket::AggregationBucket;
pub use consensus::{ConsensusResult, aggregate_instruments};
pub use rule::QuorumRule;
pub use selection::{median_rounded, pick_page};
pub use single_part::{SinglePartConsensus, aggregate_single_part};
pub use tally::Tally;
