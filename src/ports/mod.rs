mod container_runtime;
mod deployment_store;
mod host_resources;
mod network_probe;

pub use container_runtime::ContainerRuntime;
pub use deployment_store::DeploymentStore;
pub use host_resources::{HostResources, ModelInventory};
pub use network_probe::NetworkProbe;
