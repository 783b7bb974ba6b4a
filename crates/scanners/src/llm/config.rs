use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY not set; the path verifier cannot run without it")]
    MissingApiKey,

    #[error("failed to load configuration from {path}: {detail}")]
    Invalid { path: String, detail: String },
}

/// Verifier configuration, built once at startup and passed down explicitly.
///
/// Core logic never reads the environment on its own; the only ambient lookup
/// happens here, in [`LLMConfig::from_env`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_model() -> String {
    "gpt-4o".to_string()
}
fn default_temperature() -> f32 {
    0.0
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_timeout_seconds() -> u64 {
    60
}
fn default_max_retries() -> u32 {
    3
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout_seconds(),
            max_retries: default_max_retries(),
        }
    }
}

impl LLMConfig {
    /// Reads the API key from `OPENAI_API_KEY` and the model from
    /// `NULLAUDIT_MODEL` when set. Fails when no key is available so a
    /// misconfigured run aborts before any file is processed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        let mut config = Self {
            api_key: Some(api_key),
            ..Self::default()
        };

        if let Ok(model) = std::env::var("NULLAUDIT_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Invalid {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Invalid {
            path: path.display().to_string(),
            detail: e.to_string(),
        })
    }

    pub fn save_yaml(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn resolved_api_key(&self) -> Result<String, ConfigError> {
        self.api_key.clone().ok_or(ConfigError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LLMConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let config = LLMConfig::default();
        assert!(matches!(
            config.resolved_api_key(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = LLMConfig {
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            ..LLMConfig::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: LLMConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.model, "gpt-4o-mini");
        assert_eq!(parsed.timeout_seconds, 60);
    }
}
