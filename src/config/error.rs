//! Errors raised while loading and validating service settings.

use thiserror::Error;

/// Failure to produce a usable `AppConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A setting that loaded but cannot be used as given. The message
/// names the environment variable where one maps directly.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required setting: {0}")]
    MissingRequired(&'static str),

    #[error("Server port must be non-zero")]
    InvalidPort,

    #[error("Request timeout must be non-zero")]
    InvalidTimeout,

    #[error("Database URL must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds the 100-connection cap")]
    PoolSizeTooLarge,
}
