//! System-wide health report.

use crate::app::AppContext;
use crate::app::services::HealthReporter;
use crate::domain::SystemStatus;
use crate::ports::{ContainerRuntime, DeploymentStore, HostResources, ModelInventory, NetworkProbe};

/// Check every service of the session registry plus host resources and models.
pub fn execute<P, C, S>(
    ctx: &AppContext<P, C, S>,
    resources: &impl HostResources,
    models: &impl ModelInventory,
) -> SystemStatus
where
    P: NetworkProbe,
    C: ContainerRuntime,
    S: DeploymentStore,
{
    let registry = ctx.session_registry();
    HealthReporter::new(ctx.probe(), ctx.runtime(), resources, models).report(&registry)
}
