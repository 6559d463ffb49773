//! Host configuration loaded from an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tycoon_sim::SimConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Everything the host needs. Missing fields take their defaults.
///
/// ```toml
/// tick_ms = 500
/// save_dir = "saves"
/// slot = "autosave"
/// event_interval_secs = 120
///
/// [sim]
/// seed = 7
/// min_spacing = 4.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sim: SimConfig,
    /// Game loop interval in milliseconds.
    pub tick_ms: u64,
    pub save_dir: PathBuf,
    pub slot: String,
    /// Fire a random event this often. Disabled when absent.
    pub event_interval_secs: Option<f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            tick_ms: 500,
            save_dir: PathBuf::from("saves"),
            slot: "autosave".to_string(),
            event_interval_secs: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }
}
