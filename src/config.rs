//! Configuration management for GenQ
//!
//! Handles model selection and persistence of user preferences. The API
//! credential is never persisted; it is read from the environment at startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the Gemini API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Available Gemini models
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum GeminiModel {
    /// Gemini 1.5 Flash - fast and inexpensive (default)
    Gemini15Flash,
    /// Gemini 1.5 Pro - higher quality, slower
    Gemini15Pro,
    /// Gemini Pro - legacy model
    GeminiPro,
}

impl GeminiModel {
    /// Display name for the model
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gemini15Flash => "gemini-1.5-flash",
            Self::Gemini15Pro => "gemini-1.5-pro",
            Self::GeminiPro => "gemini-pro",
        }
    }

    /// Model ID as the API expects it
    pub fn api_id(&self) -> &'static str {
        // Same as the display name for current Gemini models
        self.name()
    }

    /// Look up a model by its display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|m| m.name() == name)
    }

    /// Get all available models
    pub fn all() -> Vec<Self> {
        vec![Self::Gemini15Flash, Self::Gemini15Pro, Self::GeminiPro]
    }
}

impl Default for GeminiModel {
    fn default() -> Self {
        Self::Gemini15Flash
    }
}

/// GenQ configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Selected generation model
    pub model: GeminiModel,
    /// Version of config schema (for future migrations)
    #[serde(default = "default_version")]
    pub version: u32,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: GeminiModel::default(),
            version: 1,
        }
    }
}

impl Config {
    /// Get the config file path (~/.genq/config.toml)
    pub fn path() -> Result<PathBuf> {
        let home = std::env::var("HOME").context("HOME environment variable not set")?;
        Ok(PathBuf::from(home).join(".genq").join("config.toml"))
    }

    /// Load config from disk, or return None if it doesn't exist
    pub fn load() -> Result<Option<Self>> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(Some(config))
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content).context("Failed to write config file")?;

        Ok(())
    }
}

/// Read the API key from the environment. Whitespace-only values count as
/// unset.
pub fn api_key_from_env() -> Option<String> {
    let key = std::env::var(API_KEY_VAR).ok()?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some(key.to_string())
}
