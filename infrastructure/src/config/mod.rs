//! Configuration file loading for score-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `SCORE_QUORUM_*`, nested with `__` (e.g. `SCORE_QUORUM_ANALYSIS__REPLICATES`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./score-quorum.toml` or `./.score-quorum.toml`
//! 4. Global: `$XDG_CONFIG_HOME/score-quorum/config.toml` (or `~/.config/...`)
//! 5. `OPENAI_MODEL` for `oracle.model`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAnalysisConfig, FileCacheConfig, FileConfig, FileLoggingConfig,
    FileOracleConfig, FileOrientationConfig, FileOutputConfig, FileOutputFormat, FileRetryConfig,
};
pub use loader::ConfigLoader;
