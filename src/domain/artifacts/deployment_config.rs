//! Persisted deployment configuration (`deployment_config.json`).

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::service::ServiceRegistry;

pub const CONFIG_VERSION: &str = "1.0";

/// Versioned serialization of every field of every service state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    pub version: String,
    pub services: ServiceRegistry,
}

impl DeploymentConfig {
    pub fn new(services: ServiceRegistry) -> Self {
        Self { version: CONFIG_VERSION.to_string(), services }
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        let mut json = serde_json::to_string_pretty(self).map_err(|e| AppError::Serialization {
            what: "deployment configuration".to_string(),
            details: e.to_string(),
        })?;
        json.push('\n');
        Ok(json)
    }

    /// Parse persisted content.
    ///
    /// Malformed JSON, schema mismatches, and unknown versions all yield `None`.
    pub fn parse(content: &str) -> Option<Self> {
        let config: DeploymentConfig = match serde_json::from_str(content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring malformed deployment configuration");
                return None;
            }
        };
        if config.version != CONFIG_VERSION {
            tracing::warn!(version = %config.version, "Ignoring unsupported deployment configuration version");
            return None;
        }
        Some(config)
    }
}
