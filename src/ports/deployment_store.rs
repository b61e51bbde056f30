//! Deployment artifact storage port definition.

use crate::domain::{AppError, ServiceRegistry};

/// Durable home of the persisted configuration and generated artifacts.
pub trait DeploymentStore {
    /// Load the persisted registry.
    ///
    /// Missing, malformed, or mismatched content yields `None`.
    fn load_registry(&self) -> Option<ServiceRegistry>;

    /// Persist the full registry, replacing any previous file in one step.
    fn save_registry(&self, registry: &ServiceRegistry) -> Result<(), AppError>;

    /// Replace the orchestration override file.
    fn write_override(&self, content: &str) -> Result<(), AppError>;

    /// Insert or replace `key=value` in the runtime environment file.
    fn upsert_env(&self, key: &str, value: &str) -> Result<(), AppError>;
}
