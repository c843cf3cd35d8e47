//! Error types for the Link-16 gateway

use thiserror::Error;

/// Workspace-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Wire protocol errors.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// YAML serialization errors from reports.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}
