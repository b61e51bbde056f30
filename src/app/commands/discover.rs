//! Discovery of already-running infrastructure.

use std::collections::BTreeMap;

use tracing::info;

use crate::app::AppContext;
use crate::app::services::ServiceProber;
use crate::domain::discovery::stack_containers;
use crate::domain::{AppError, DiscoveredService, DiscoverySnapshot, ServiceRegistry};
use crate::ports::{ContainerRuntime, DeploymentStore, NetworkProbe};

#[derive(Debug, Clone)]
pub struct DiscoverOutcome {
    pub snapshot: DiscoverySnapshot,
    /// Session registry after detection was merged and persisted.
    pub registry: ServiceRegistry,
}

/// Probe reusable services at their default location and list stack containers.
///
/// Services that cannot reuse existing infrastructure are never probed.
pub fn scan(
    probe: &impl NetworkProbe,
    runtime: &impl ContainerRuntime,
    registry: &ServiceRegistry,
) -> DiscoverySnapshot {
    let prober = ServiceProber::new(probe);
    let mut services = BTreeMap::new();

    for (key, state) in registry.iter() {
        let descriptor = state.descriptor();
        if !descriptor.can_use_existing {
            continue;
        }

        let result = prober.check_default(state);
        if !result.healthy {
            continue;
        }

        info!(service = key, host = %descriptor.default_host, port = descriptor.default_port, "Detected existing service");
        services.insert(
            key.to_string(),
            DiscoveredService {
                name: descriptor.name.clone(),
                detected_host: descriptor.default_host.clone(),
                detected_port: descriptor.default_port,
                connection_string: format!("{}:{}", descriptor.default_host, descriptor.default_port),
            },
        );
    }

    let containers = stack_containers(runtime.list_containers());
    DiscoverySnapshot::new(services, containers)
}

/// Scan, merge detection into the session registry, and persist it.
pub fn execute<P, C, S>(ctx: &AppContext<P, C, S>) -> Result<DiscoverOutcome, AppError>
where
    P: NetworkProbe,
    C: ContainerRuntime,
    S: DeploymentStore,
{
    let mut registry = ctx.session_registry();
    let snapshot = scan(ctx.probe(), ctx.runtime(), &registry);
    registry.merge_detection(&snapshot);
    ctx.store().save_registry(&registry)?;

    info!(
        detected = snapshot.services.len(),
        containers = snapshot.containers.len(),
        "Discovery complete"
    );
    Ok(DiscoverOutcome { snapshot, registry })
}
