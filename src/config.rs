//! Application configuration.
//!
//! Loaded from `~/.config/grantgen/config.toml`. Every field has a
//! default, and a missing or malformed file degrades to defaults with a
//! logged warning rather than refusing to start.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::llm::DEFAULT_MODEL;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub llm: LlmConfig,
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Event loop tick interval in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Gemini model name used for generation.
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DataConfig {
    /// Where logs and saved scripts live. Defaults to the platform data
    /// directory.
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load from the default config path, falling back to defaults when
    /// the file is absent or invalid.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Invalid config at {}, using defaults: {e}",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}, using defaults: {e}", path.display());
                Self::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("grantgen").join("config.toml"))
    }

    /// Resolved data directory for logs and saved scripts.
    pub fn data_dir(&self) -> PathBuf {
        self.data
            .data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("grantgen")))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
