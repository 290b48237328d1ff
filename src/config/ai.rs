//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which agent backend answers turns
    #[serde(default)]
    pub provider: AiProvider,

    /// API key for the chat-completions endpoint
    pub api_key: Option<Secret<String>>,

    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Optional completion length cap
    pub max_tokens: Option<u32>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAI,
    /// Offline agent that echoes the user; for local runs without a key
    Mock,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == AiProvider::OpenAI && !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_retries > MAX_RETRIES {
            return Err(ValidationError::TooManyRetries { max: MAX_RETRIES });
        }
        Ok(())
    }
}

/// Upper bound for `max_retries`.
pub const MAX_RETRIES: u32 = 10;

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    1.0
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::OpenAI);
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_openai_requires_key() {
        let config = AiConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("AI__API_KEY"))
        );

        let config = AiConfig {
            api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AiConfig {
            api_key: Some(Secret::new("sk-xxx".to_string())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mock_needs_no_key() {
        let config = AiConfig {
            provider: AiProvider::Mock,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_temperature_range() {
        let config = AiConfig {
            provider: AiProvider::Mock,
            temperature: 2.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }

    #[test]
    fn test_max_retries_is_bounded() {
        let config = AiConfig {
            provider: AiProvider::Mock,
            max_retries: MAX_RETRIES,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = AiConfig {
            provider: AiProvider::Mock,
            max_retries: 64,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::TooManyRetries { max: MAX_RETRIES })
        );
    }
}
