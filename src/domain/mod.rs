pub mod artifacts;
pub mod config;
pub mod discovery;
pub mod error;
pub mod health;
pub mod service;
pub mod status;
pub mod validation;

pub use artifacts::{ComposeOverride, DeploymentConfig};
pub use config::{LcarsConfig, ProbeConfig};
pub use discovery::{ContainerInfo, DiscoveredService, DiscoverySnapshot};
pub use error::AppError;
pub use health::HealthCheckResult;
pub use service::{Endpoint, HealthEndpoint, ServiceDescriptor, ServiceRegistry, ServiceState};
pub use status::{HealthLevel, LlmModel, ServiceHealth, SystemResources, SystemStatus};
pub use validation::ValidationOutcome;
