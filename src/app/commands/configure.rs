//! Per-service configuration editing.

use tracing::info;

use crate::app::AppContext;
use crate::domain::validation::{validate_hostname, validate_port};
use crate::domain::{AppError, ServiceState};
use crate::ports::{ContainerRuntime, DeploymentStore, NetworkProbe};

/// Requested edits. Unset fields leave the current value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    pub use_existing: Option<bool>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub clear_host: bool,
    pub clear_port: bool,
}

#[derive(Debug, Clone)]
pub struct ConfigureOutcome {
    pub key: String,
    pub state: ServiceState,
    /// Advisory notes for accepted values, e.g. a host that does not resolve yet.
    pub warnings: Vec<String>,
}

pub fn execute<P, C, S>(
    ctx: &AppContext<P, C, S>,
    key: &str,
    options: &ConfigureOptions,
) -> Result<ConfigureOutcome, AppError>
where
    P: NetworkProbe,
    C: ContainerRuntime,
    S: DeploymentStore,
{
    let mut registry = ctx.session_registry();
    let state = registry.require_mut(key)?;
    let mut warnings = Vec::new();

    if let Some(use_existing) = options.use_existing {
        state.set_use_existing(key, use_existing)?;
    }

    if options.clear_host {
        state.custom_host = None;
    } else if let Some(host) = &options.host {
        let outcome = validate_hostname(host, |name| ctx.probe().resolves(name));
        let Some(value) = outcome.value else {
            return Err(validation_error(key, "host", outcome.message));
        };
        warnings.extend(outcome.message);
        state.custom_host = Some(value);
    }

    if options.clear_port {
        state.custom_port = None;
    } else if let Some(port) = &options.port {
        let outcome = validate_port(port);
        let Some(value) = outcome.value else {
            return Err(validation_error(key, "port", outcome.message));
        };
        state.custom_port = Some(value);
    }

    let state = state.clone();
    ctx.store().save_registry(&registry)?;
    info!(service = key, connection = %state.connection_string(), "Service configuration saved");

    Ok(ConfigureOutcome { key: key.to_string(), state, warnings })
}

fn validation_error(key: &str, field: &str, message: Option<String>) -> AppError {
    AppError::Validation {
        service: key.to_string(),
        field: field.to_string(),
        message: message.unwrap_or_else(|| "invalid value".to_string()),
    }
}
