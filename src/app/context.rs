use crate::domain::{LcarsConfig, ServiceRegistry};
use crate::ports::{ContainerRuntime, DeploymentStore, NetworkProbe};

/// Application context holding dependencies for command execution.
pub struct AppContext<P: NetworkProbe, C: ContainerRuntime, S: DeploymentStore> {
    probe: P,
    runtime: C,
    store: S,
    config: LcarsConfig,
}

impl<P: NetworkProbe, C: ContainerRuntime, S: DeploymentStore> AppContext<P, C, S> {
    /// Create a new application context.
    pub fn new(probe: P, runtime: C, store: S, config: LcarsConfig) -> Self {
        Self { probe, runtime, store, config }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn runtime(&self) -> &C {
        &self.runtime
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LcarsConfig {
        &self.config
    }

    /// Registry for this session: the persisted configuration when one loads,
    /// catalogue defaults otherwise.
    pub fn session_registry(&self) -> ServiceRegistry {
        self.store.load_registry().unwrap_or_else(ServiceRegistry::defaults)
    }
}
