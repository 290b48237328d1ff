//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Chunk overlap must be smaller than a non-zero chunk size")]
    InvalidChunking,

    #[error("Retrieval top_k must be at least 1")]
    InvalidTopK,

    #[error("History window must be at least min_observations, which must be at least 3")]
    InvalidAnalysisWindow,

    #[error("Session idle TTL and max_sessions must be non-zero")]
    InvalidSessionLimits,

    #[error("AI max_retries must be at most {max}")]
    TooManyRetries { max: u32 },
}
