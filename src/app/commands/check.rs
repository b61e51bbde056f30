//! Single-service health check.

use crate::app::AppContext;
use crate::app::services::ServiceProber;
use crate::domain::{AppError, HealthCheckResult};
use crate::ports::{ContainerRuntime, DeploymentStore, NetworkProbe};

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub key: String,
    pub name: String,
    pub connection_string: String,
    pub result: HealthCheckResult,
}

pub fn execute<P, C, S>(ctx: &AppContext<P, C, S>, key: &str) -> Result<CheckOutcome, AppError>
where
    P: NetworkProbe,
    C: ContainerRuntime,
    S: DeploymentStore,
{
    let registry = ctx.session_registry();
    let state = registry.require(key)?;
    let result = ServiceProber::new(ctx.probe()).check(state);

    Ok(CheckOutcome {
        key: key.to_string(),
        name: state.name().to_string(),
        connection_string: state.connection_string(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LcarsConfig, ServiceRegistry};
    use crate::testing::{FakeNetwork, FakeRuntime, FakeStore};

    #[test]
    fn checks_effective_location() {
        let mut registry = ServiceRegistry::defaults();
        let postgres = registry.get_mut("postgres").unwrap();
        postgres.set_use_existing("postgres", true).unwrap();
        postgres.custom_host = Some("db.lan".into());
        postgres.custom_port = Some(6543);
        let ctx = AppContext::new(
            FakeNetwork::default().open("db.lan", 6543),
            FakeRuntime::default(),
            FakeStore::with_registry(registry),
            LcarsConfig::default(),
        );

        let outcome = execute(&ctx, "postgres").unwrap();
        assert!(outcome.result.healthy);
        assert_eq!(outcome.connection_string, "db.lan:6543");
    }

    #[test]
    fn unknown_key_lists_available_services() {
        let ctx = AppContext::new(
            FakeNetwork::default(),
            FakeRuntime::default(),
            FakeStore::default(),
            LcarsConfig::default(),
        );
        let err = execute(&ctx, "mysql").unwrap_err();
        assert!(err.to_string().contains("homeassistant, postgres"));
    }
}
