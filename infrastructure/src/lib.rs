//! Infrastructure layer for score-quorum
//!
//! Adapters for the ports defined in the application layer: the OpenAI
//! oracle, content loading and caching, the `lopdf` engine, JSONL event
//! logging and configuration file loading.

pub mod config;
pub mod content;
pub mod logging;
pub mod openai;
pub mod pdf;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAnalysisConfig, FileCacheConfig, FileConfig,
    FileLoggingConfig, FileOracleConfig, FileOrientationConfig, FileOutputConfig,
    FileOutputFormat, FileRetryConfig,
};
pub use content::{DigestCache, FsContentLoader};
pub use logging::JsonlEventLog;
pub use openai::{
    error::{OpenAiError, Result},
    gateway::OpenAiGateway,
};
pub use pdf::{LopdfDocument, LopdfEngine};
