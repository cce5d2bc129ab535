//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "score-quorum";
const PROJECT_FILES: [&str; 2] = ["score-quorum.toml", ".score-quorum.toml"];
const ENV_PREFIX: &str = "SCORE_QUORUM_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Ok(model) = std::env::var("OPENAI_MODEL")
            && !model.trim().is_empty()
        {
            figment = figment.merge(Serialized::default("oracle.model", model));
        }

        if let Some(path) = global
            && path.exists()
        {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project {
            figment = figment.merge(Toml::file(path));
        }

        // Explicit config path (highest priority for files)
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/score-quorum/config.toml if set,
    /// otherwise falls back to ~/.config/score-quorum/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for debugging)
    pub fn config_sources() -> Vec<(String, Option<PathBuf>, bool)> {
        let mut sources = Vec::new();

        match Self::project_config_path() {
            Some(path) => sources.push(("Project".to_string(), Some(path), true)),
            None => sources.push((
                "Project".to_string(),
                Some(PathBuf::from(PROJECT_FILES[0])),
                false,
            )),
        }

        if let Some(path) = Self::global_config_path() {
            let exists = path.exists();
            sources.push(("Global".to_string(), Some(path), exists));
        }

        sources.push(("Default".to_string(), None, true));
        sources
    }
}
