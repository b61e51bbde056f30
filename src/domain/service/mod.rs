//! Service catalogue, per-session state, and effective-value resolution.

pub mod catalog;
mod descriptor;
mod registry;
mod state;

pub use descriptor::{HealthEndpoint, ServiceDescriptor};
pub use registry::ServiceRegistry;
pub use state::{Endpoint, ServiceState, split_scheme};
