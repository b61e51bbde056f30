//! Finalize a configuration session into deployment artifacts.

use tracing::{info, warn};

use crate::app::AppContext;
use crate::app::services::ServiceProber;
use crate::domain::artifacts::runtime_environment;
use crate::domain::{AppError, ComposeOverride};
use crate::ports::{ContainerRuntime, DeploymentStore, NetworkProbe};

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Write artifacts even when reused required services fail their check.
    pub force: bool,
}

/// Service line in the deployment summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub key: String,
    pub name: String,
    pub connection_string: String,
}

#[derive(Debug, Clone, Default)]
pub struct ApplyOutcome {
    /// Services bound to existing infrastructure.
    pub reused: Vec<ServiceSummary>,
    /// Services deployed as fresh containers.
    pub fresh: Vec<ServiceSummary>,
    /// Environment entries written to the runtime environment file.
    pub environment: Vec<(String, String)>,
    /// Health failures that were overridden by `force` or confirmation.
    pub overridden_failures: Vec<String>,
}

/// Gate, then write the persisted configuration, override, and environment.
///
/// `confirm` is consulted when reused required services are unhealthy and
/// `force` is off. Returning `Ok(false)` blocks the apply.
pub fn execute<P, C, S>(
    ctx: &AppContext<P, C, S>,
    options: ApplyOptions,
    confirm: impl FnOnce(&[String]) -> Result<bool, AppError>,
) -> Result<ApplyOutcome, AppError>
where
    P: NetworkProbe,
    C: ContainerRuntime,
    S: DeploymentStore,
{
    let registry = ctx.session_registry();
    let prober = ServiceProber::new(ctx.probe());

    let failures: Vec<String> = registry
        .iter()
        .filter(|(_, state)| state.descriptor().required && state.is_reused())
        .filter_map(|(_, state)| {
            let result = prober.check(state);
            (!result.healthy).then(|| {
                format!("{}: {}", state.name(), result.error.unwrap_or_else(|| "unhealthy".into()))
            })
        })
        .collect();

    if !failures.is_empty() {
        if options.force {
            warn!(count = failures.len(), "Applying despite unhealthy required services");
        } else if !confirm(&failures)? {
            return Err(AppError::UnhealthyRequiredServices(failures));
        }
    }

    ctx.store().save_registry(&registry)?;
    ctx.store().write_override(&ComposeOverride::from_registry(&registry).render()?)?;

    let environment = runtime_environment(&registry);
    for (key, value) in &environment {
        ctx.store().upsert_env(key, value)?;
    }

    let mut outcome = ApplyOutcome { environment, overridden_failures: failures, ..Default::default() };
    for (key, state) in registry.iter() {
        let summary = ServiceSummary {
            key: key.to_string(),
            name: state.name().to_string(),
            connection_string: state.connection_string(),
        };
        if state.is_reused() {
            outcome.reused.push(summary);
        } else {
            outcome.fresh.push(summary);
        }
    }

    info!(reused = outcome.reused.len(), fresh = outcome.fresh.len(), "Deployment configuration applied");
    Ok(outcome)
}
