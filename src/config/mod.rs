//! Application configuration module
//!
//! Configuration is read from environment variables with the
//! `EMOTION_SUPPORT` prefix; nested values use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use emotion_support::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod database;
mod error;
mod retrieval;
mod server;
mod support;

pub use ai::{AiConfig, AiProvider};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use retrieval::RetrievalConfig;
pub use server::{Environment, ServerConfig};
pub use support::SupportConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat-completions backend
    #[serde(default)]
    pub ai: AiConfig,

    /// PostgreSQL persistence; in-memory storage when absent
    pub database: Option<DatabaseConfig>,

    /// Reference documents; no retrieval context when absent
    pub retrieval: Option<RetrievalConfig>,

    /// Locale and analysis window
    #[serde(default)]
    pub support: SupportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file is read first if present.
    ///
    /// - `EMOTION_SUPPORT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `EMOTION_SUPPORT__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `EMOTION_SUPPORT__RETRIEVAL__DATA_DIRECTORY=data` -> `retrieval.data_directory`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EMOTION_SUPPORT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        if let Some(retrieval) = &self.retrieval {
            retrieval.validate()?;
        }
        self.support.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::planning::Locale;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "EMOTION_SUPPORT__AI__API_KEY",
        "EMOTION_SUPPORT__AI__PROVIDER",
        "EMOTION_SUPPORT__SERVER__PORT",
        "EMOTION_SUPPORT__SERVER__ENVIRONMENT",
        "EMOTION_SUPPORT__DATABASE__URL",
        "EMOTION_SUPPORT__RETRIEVAL__DATA_DIRECTORY",
        "EMOTION_SUPPORT__RETRIEVAL__TOP_K",
        "EMOTION_SUPPORT__SUPPORT__LOCALE",
    ];

    fn set_minimal_env() {
        env::set_var("EMOTION_SUPPORT__AI__API_KEY", "sk-test");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_minimal_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert!(config.ai.has_api_key());
        assert!(config.database.is_none());
        assert!(config.retrieval.is_none());
        assert_eq!(config.support.locale, Locale::Turkish);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_optional_sections_and_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("EMOTION_SUPPORT__SERVER__PORT", "3000");
        env::set_var("EMOTION_SUPPORT__SERVER__ENVIRONMENT", "production");
        env::set_var("EMOTION_SUPPORT__DATABASE__URL", "postgres://localhost/support");
        env::set_var("EMOTION_SUPPORT__RETRIEVAL__DATA_DIRECTORY", "data");
        env::set_var("EMOTION_SUPPORT__RETRIEVAL__TOP_K", "2");
        env::set_var("EMOTION_SUPPORT__SUPPORT__LOCALE", "en");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(
            config.database.as_ref().map(|d| d.url.as_str()),
            Some("postgres://localhost/support")
        );
        let retrieval = config.retrieval.as_ref().unwrap();
        assert_eq!(retrieval.top_k, 2);
        assert_eq!(retrieval.chunk_size, 1000);
        assert_eq!(config.support.locale, Locale::English);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mock_provider_validates_without_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("EMOTION_SUPPORT__AI__PROVIDER", "mock");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Mock);
        assert!(config.validate().is_ok());
    }
}
