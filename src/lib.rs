//! lcars: resolve, probe, and deploy the LCARS home-automation container stack.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    AccessPoint, ApplyOptions, ApplyOutcome, CheckOutcome, ConfigureOptions, ConfigureOutcome,
    DiscoverOutcome, Project, ServiceSummary, apply, check, configure, discover, endpoints,
    env_set, health,
};
pub use domain::{
    AppError, DiscoverySnapshot, HealthCheckResult, HealthLevel, ServiceRegistry, ServiceState,
    SystemStatus,
};
