//! Configuration settings for Tubelens.

use crate::error::{Result, TubelensError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the inference provider credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub server: ServerSettings,
    pub openai: OpenAISettings,
    pub transcript: TranscriptSettings,
    pub prompts: PromptSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Inference provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// API key. The `OPENAI_API_KEY` environment variable takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Chat model used for structured output.
    pub model: String,
    /// Sampling temperature. Zero keeps results reproducible.
    pub temperature: f32,
    /// Upper bound for a single inference call, in seconds.
    pub timeout_seconds: u64,
    /// Alternative API base URL (OpenAI-compatible gateways).
    pub base_url: Option<String>,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            timeout_seconds: 120,
            base_url: None,
        }
    }
}

/// Transcript retrieval and preparation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Preferred caption languages, in order.
    pub languages: Vec<String>,
    /// Upper bound for the transcript fetch, in seconds.
    pub timeout_seconds: u64,
    /// Maximum transcript characters sent to the model.
    pub max_prompt_chars: usize,
    /// Target size of the transcript chunks returned to clients.
    pub chunk_chars: usize,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            timeout_seconds: 30,
            max_prompt_chars: 12_000,
            chunk_chars: 400,
        }
    }
}

impl TranscriptSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

/// Resolved inference configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
    pub base_url: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TubelensError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tubelens")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Build the inference configuration from the process environment.
    pub fn inference_config(&self) -> Result<InferenceConfig> {
        self.inference_config_with(std::env::var(API_KEY_ENV).ok())
    }

    /// Build the inference configuration with an explicit environment key.
    ///
    /// The environment value wins over the file value. A missing or blank
    /// key is a configuration error.
    pub fn inference_config_with(&self, env_key: Option<String>) -> Result<InferenceConfig> {
        let api_key = env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.openai
                    .api_key
                    .clone()
                    .filter(|k| !k.trim().is_empty())
            })
            .ok_or_else(|| {
                TubelensError::Config(format!(
                    "{} not set. Set it with: export {}='sk-...' or add api_key under [openai]",
                    API_KEY_ENV, API_KEY_ENV
                ))
            })?;

        Ok(InferenceConfig {
            api_key,
            model: self.openai.model.clone(),
            temperature: self.openai.temperature,
            timeout: Duration::from_secs(self.openai.timeout_seconds),
            base_url: self.openai.base_url.clone(),
        })
    }
}
