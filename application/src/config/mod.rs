//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`BackoffPolicy`]: retry attempts and delays for oracle calls
//! - [`AnalysisConfig`]: replicate count, quorum rule, timeouts and size limit

pub mod analysis_config;
pub mod backoff;

pub use analysis_config::{AnalysisConfig, DEFAULT_MAX_CONTENT_BYTES};
pub use backoff::BackoffPolicy;
