use std::io;

use thiserror::Error;

/// Library-wide error type for lcars operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Invalid tool configuration (`lcars.toml`).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Service key is not part of the catalogue.
    #[error("Unknown service '{name}'. Available: {available}")]
    UnknownService { name: String, available: String },

    /// User-supplied host or port failed validation.
    #[error("Invalid {field} for '{service}': {message}")]
    Validation { service: String, field: String, message: String },

    /// Attempt to bind a service to existing infrastructure it cannot reuse.
    #[error("Service '{0}' requires stack-specific configuration and cannot use existing infrastructure")]
    ReuseNotPermitted(String),

    /// Deployment artifact could not be serialized.
    #[error("Failed to serialize {what}: {details}")]
    Serialization { what: String, details: String },

    /// Required services bound to existing infrastructure failed their health check.
    #[error("Required services are not reachable:\n{}", .0.join("\n"))]
    UnhealthyRequiredServices(Vec<String>),

    /// Apply was declined by the operator.
    #[error("Apply cancelled")]
    Cancelled,
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::InvalidConfig(message.into())
    }
}
