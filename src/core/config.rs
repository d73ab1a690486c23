//! Configuration management for switchboard
//!
//! Supports environment variables, config files, and runtime overrides.
//!
//! Config file location: ~/.config/switchboard/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::error::{EngineError, Result};

/// Main configuration for the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Classifier backend configuration
    pub classifier: ClassifierConfig,
    /// Engine loop configuration
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Classifier backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Base URL of the chat-completions endpoint
    pub base_url: String,
    /// Model used for intent classification
    pub model: String,
    /// API key; falls back to SWITCHBOARD_API_KEY / OPENAI_API_KEY
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Sampling temperature for classification calls
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Engine loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum agent steps per turn before the engine fails the turn
    /// Default: 12
    pub max_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("SWITCHBOARD_CLASSIFIER_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: env::var("SWITCHBOARD_CLASSIFIER_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            api_key: env::var("SWITCHBOARD_API_KEY")
                .or_else(|_| env::var("OPENAI_API_KEY"))
                .ok(),
            temperature: 0.1,
            timeout_secs: 60,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_steps: env::var("SWITCHBOARD_MAX_STEPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(12),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("switchboard")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: env vars > config file > defaults
    pub fn load() -> Self {
        // Pick up a .env file if one exists
        let _ = dotenvy::dotenv();

        if let Ok(config) = Self::load_from_file() {
            return config;
        }

        // Fall back to defaults (which respect env vars)
        Self::default()
    }

    /// Load configuration from file only
    pub fn load_from_file() -> Result<Self> {
        let config_path = Self::config_file();

        if !config_path.exists() {
            return Err(EngineError::config("Config file not found"));
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| EngineError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| EngineError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir();
        let config_path = Self::config_file();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| EngineError::config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| EngineError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, content)
            .map_err(|e| EngineError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check if a config file exists
    pub fn config_exists() -> bool {
        Self::config_file().exists()
    }

    /// Get the chat-completions URL for the classifier backend
    pub fn classifier_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.classifier.base_url.trim_end_matches('/')
        )
    }
}
