//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod analysis;
mod cache;
mod logging;
mod oracle;
mod orientation;
mod output;
mod retry;

pub use analysis::FileAnalysisConfig;
pub use cache::FileCacheConfig;
pub use logging::FileLoggingConfig;
pub use oracle::FileOracleConfig;
pub use orientation::FileOrientationConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use retry::FileRetryConfig;

use score_application::AnalysisConfig;
use score_domain::QuorumRule;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Problems detected in a loaded configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("analysis.replicates cannot be 0")]
    ZeroReplicates,

    #[error("analysis.quorum: {0}")]
    InvalidQuorumRule(String),

    #[error("analysis.max_content_mb cannot be 0")]
    ZeroContentLimit,

    #[error("retry.max_attempts cannot be 0")]
    ZeroAttempts,

    #[error("retry.jitter must be between 0 and 1, got {0}")]
    InvalidJitter(f64),

    #[error("oracle.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("oracle.model cannot be empty")]
    EmptyModelName,

    #[error("orientation.threshold_percent must be between 0 and 100, got {0}")]
    InvalidThreshold(f64),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Oracle endpoint and model
    pub oracle: FileOracleConfig,
    /// Replicates and quorum
    pub analysis: FileAnalysisConfig,
    /// Retry policy for oracle calls
    pub retry: FileRetryConfig,
    /// Local document cache
    pub cache: FileCacheConfig,
    /// Orientation normalizer
    pub orientation: FileOrientationConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Structured event log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.oracle.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if self.oracle.timeout_seconds == Some(0) {
            issues.push(ConfigValidationError::InvalidTimeout);
        }

        if self.analysis.replicates == 0 {
            issues.push(ConfigValidationError::ZeroReplicates);
        }
        if let Err(e) = self.analysis.parse_quorum() {
            issues.push(ConfigValidationError::InvalidQuorumRule(e.to_string()));
        }
        if self.analysis.max_content_mb == 0 {
            issues.push(ConfigValidationError::ZeroContentLimit);
        }

        if self.retry.max_attempts == 0 {
            issues.push(ConfigValidationError::ZeroAttempts);
        }
        if !(0.0..=1.0).contains(&self.retry.jitter) {
            issues.push(ConfigValidationError::InvalidJitter(self.retry.jitter));
        }

        if !(0.0..=100.0).contains(&self.orientation.threshold_percent) {
            issues.push(ConfigValidationError::InvalidThreshold(
                self.orientation.threshold_percent,
            ));
        }

        issues
    }

    /// Application-level analysis parameters.
    ///
    /// An unparsable quorum rule falls back to the default; call
    /// [`validate`](Self::validate) first to report it.
    pub fn to_analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::default()
            .with_replicates(self.analysis.replicates)
            .with_quorum(self.analysis.parse_quorum().unwrap_or_default())
            .with_backoff(self.retry.to_backoff_policy())
            .with_call_timeout(self.oracle.timeout_seconds.map(Duration::from_secs))
            .with_max_content_bytes(self.analysis.max_content_bytes())
    }

    pub fn quorum_rule(&self) -> QuorumRule {
        self.analysis.parse_quorum().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use score_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[oracle]
model = "gpt-5-mini"
base_url = "http://localhost:8080"
timeout_seconds = 120

[analysis]
replicates = 5
quorum = "majority"

[retry]
max_attempts = 4
base_delay_ms = 500

[orientation]
threshold_percent = 75.0

[output]
format = "json"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.oracle.model, "gpt-5-mini");
        assert_eq!(config.oracle.timeout_seconds, Some(120));
        assert_eq!(config.analysis.replicates, 5);
        assert_eq!(config.quorum_rule(), QuorumRule::Majority);
        assert_eq!(config.retry.max_attempts, 4);
        assert_eq!(config.orientation.threshold_percent, 75.0);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[analysis]
replicates = 7
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.replicates, 7);
        // Defaults should apply
        assert_eq!(config.oracle.model, "gpt-5");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.quorum_rule(), QuorumRule::HalfRoundedUp);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.analysis.replicates = 0;
        config.analysis.quorum = "most".to_string();
        config.retry.max_attempts = 0;
        config.orientation.threshold_percent = 140.0;

        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.contains(&ConfigValidationError::ZeroReplicates));
        assert!(issues.contains(&ConfigValidationError::ZeroAttempts));
        assert!(issues.contains(&ConfigValidationError::InvalidThreshold(140.0)));
    }

    #[test]
    fn test_to_analysis_config() {
        let mut config = FileConfig::default();
        config.analysis.replicates = 4;
        config.analysis.quorum = "atleast:3".to_string();
        config.retry.base_delay_ms = 10;

        let analysis = config.to_analysis_config();
        assert_eq!(analysis.replicates, 4);
        assert_eq!(analysis.quorum, QuorumRule::AtLeast(3));
        assert_eq!(analysis.backoff.base_delay, Duration::from_millis(10));
        assert_eq!(analysis.call_timeout, Some(Duration::from_secs(600)));
        assert_eq!(analysis.max_content_bytes, 32 * 1024 * 1024);
    }
}
