//! Cache configuration from TOML (`[cache]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCacheConfig {
    /// Cache directory; the system temp directory when unset
    pub dir: Option<PathBuf>,
}

impl FileCacheConfig {
    pub fn resolve_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("score-quorum"))
    }
}
