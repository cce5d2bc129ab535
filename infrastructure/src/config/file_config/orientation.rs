//! Orientation configuration from TOML (`[orientation]` section)

use score_domain::orientation::DEFAULT_THRESHOLD_PERCENT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrientationConfig {
    /// Landscape share above which the document is turned landscape
    pub threshold_percent: f64,
}

impl Default for FileOrientationConfig {
    fn default() -> Self {
        Self {
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }
}
