//! Configuration for the integration layer
//!
//! Loaded from a TOML file, then overridden from the environment.

use crate::audio::PCM_SAMPLE_RATE;
use crate::llm::config::GeminiConfig;
use crate::speech::Voice;
use crate::{Result, RokoError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "ROKO_CONFIG";

/// Environment variables consulted for the API key, in priority order
pub const API_KEY_ENVS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Configuration for the complete application
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RokoConfig {
    /// Remote model configuration
    pub gemini: GeminiConfig,

    /// Voice profile selected at start-up
    pub voice: Voice,

    /// Whether to play synthesized speech
    pub enable_audio_output: bool,

    /// Sample rate speech is decoded at
    pub output_sample_rate: u32,
}

impl Default for RokoConfig {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig::default(),
            voice: Voice::default(),
            enable_audio_output: true,
            output_sample_rate: PCM_SAMPLE_RATE,
        }
    }
}

impl RokoConfig {
    /// Load from `$ROKO_CONFIG` or the user config dir, then apply
    /// environment overrides. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RokoError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)
            .map_err(|e| RokoError::ConfigError(format!("{}: {}", path.display(), e)))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RokoError::ConfigError(e.to_string()))
    }

    /// Take the API key from the first non-empty variable in [`API_KEY_ENVS`]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = API_KEY_ENVS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());

        if let Some(key) = key {
            self.gemini.api_key = key.trim().to_string();
        }
        self
    }

    pub fn with_gemini(mut self, gemini: GeminiConfig) -> Self {
        self.gemini = gemini;
        self
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    /// Disable speech playback (text-only mode)
    pub fn without_audio_output(mut self) -> Self {
        self.enable_audio_output = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.gemini.has_api_key() {
            return Err(RokoError::ConfigError(format!(
                "No API key configured. Set {} or gemini.api_key in the config file",
                API_KEY_ENVS[0]
            )));
        }

        if self.output_sample_rate != PCM_SAMPLE_RATE {
            return Err(RokoError::ConfigError(format!(
                "Speech is delivered at {} Hz, got output_sample_rate = {}",
                PCM_SAMPLE_RATE, self.output_sample_rate
            )));
        }

        Ok(())
    }
}

fn config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|dir| dir.join("roko").join("config.toml")))
}
