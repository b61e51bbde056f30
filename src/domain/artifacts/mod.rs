//! Deployment artifacts derived from a resolved service registry.

mod compose_override;
mod deployment_config;
mod env_file;

pub use compose_override::{ComposeOverride, DISABLED_PROFILE, ServiceOverride};
pub use deployment_config::{CONFIG_VERSION, DeploymentConfig};
pub use env_file::{runtime_environment, upsert_env_line};
