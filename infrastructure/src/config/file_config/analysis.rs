//! Analysis configuration from TOML (`[analysis]` section)
//!
//! ```toml
//! [analysis]
//! replicates = 3
//! quorum = "half"   # or "majority", "unanimous", "atleast:2", "75%"
//! max_content_mb = 32
//! ```

use score_domain::{DomainError, QuorumRule};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalysisConfig {
    /// Independent oracle calls per analysis
    pub replicates: usize,
    /// Quorum rule: "half", "majority", "unanimous", "atleast:N", "N%"
    pub quorum: String,
    /// Largest accepted document, in MiB
    pub max_content_mb: u64,
}

impl Default for FileAnalysisConfig {
    fn default() -> Self {
        Self {
            replicates: 3,
            quorum: "half".to_string(),
            max_content_mb: 32,
        }
    }
}

impl FileAnalysisConfig {
    pub fn parse_quorum(&self) -> Result<QuorumRule, DomainError> {
        self.quorum.parse()
    }

    pub fn max_content_bytes(&self) -> u64 {
        self.max_content_mb.saturating_mul(1024 * 1024)
    }
}
