//! Container runtime port definition.

use crate::domain::ContainerInfo;

/// Read-only view of the container runtime.
///
/// A missing runtime binary, a timeout, or a non-zero exit all read as
/// "no information": an empty list or a stopped container.
pub trait ContainerRuntime {
    /// All containers (running or not), keyed by container name.
    fn list_containers(&self) -> Vec<(String, ContainerInfo)>;

    /// Whether the named container is currently running.
    fn is_running(&self, container: &str) -> bool;
}
