//! Oracle configuration from TOML (`[oracle]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [oracle]
//! api_key_env = "OPENAI_API_KEY"
//! base_url = "https://api.openai.com"
//! model = "gpt-5"
//! reasoning_effort = "high"
//! timeout_seconds = 600
//! ```

use serde::{Deserialize, Serialize};

/// Default model when neither config nor `OPENAI_MODEL` names one
pub const DEFAULT_MODEL: &str = "gpt-5";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOracleConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub base_url: String,
    pub model: String,
    /// Reasoning effort hint: "low", "medium" or "high"
    pub reasoning_effort: String,
    /// Per-call timeout; `None` disables it
    pub timeout_seconds: Option<u64>,
}

impl Default for FileOracleConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com".to_string(),
            model: DEFAULT_MODEL.to_string(),
            reasoning_effort: "high".to_string(),
            timeout_seconds: Some(600),
        }
    }
}

impl FileOracleConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}
