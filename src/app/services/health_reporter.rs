//! System-wide health aggregation.

use tracing::{debug, info};
use url::Url;

use super::service_prober::{ServiceProber, health_url};
use crate::domain::service::catalog;
use crate::domain::{ServiceHealth, ServiceRegistry, ServiceState, SystemStatus};
use crate::ports::{ContainerRuntime, HostResources, ModelInventory, NetworkProbe};

/// Produces a [`SystemStatus`] for every service in a registry.
///
/// Services are checked one at a time in registry order.
pub struct HealthReporter<'a, P, C, H, M>
where
    P: NetworkProbe,
    C: ContainerRuntime,
    H: HostResources,
    M: ModelInventory,
{
    prober: ServiceProber<'a, P>,
    runtime: &'a C,
    resources: &'a H,
    models: &'a M,
}

impl<'a, P, C, H, M> HealthReporter<'a, P, C, H, M>
where
    P: NetworkProbe,
    C: ContainerRuntime,
    H: HostResources,
    M: ModelInventory,
{
    pub fn new(probe: &'a P, runtime: &'a C, resources: &'a H, models: &'a M) -> Self {
        Self { prober: ServiceProber::new(probe), runtime, resources, models }
    }

    pub fn report(&self, registry: &ServiceRegistry) -> SystemStatus {
        let services: Vec<(String, ServiceHealth)> = registry
            .iter()
            .map(|(key, state)| (key.to_string(), self.service_health(key, state)))
            .collect();

        let system_resources = self.resources.snapshot();
        let llm_models = match model_base_url(registry) {
            Some(base) => self.models.list_models(&base),
            None => Vec::new(),
        };

        let status = SystemStatus::new(services, system_resources, llm_models);
        info!(
            all_healthy = status.all_healthy,
            critical_healthy = status.critical_healthy,
            "Health check complete"
        );
        status
    }

    pub fn service_health(&self, key: &str, state: &ServiceState) -> ServiceHealth {
        let descriptor = state.descriptor();
        let endpoint = state.endpoint();

        let container_running = self.runtime.is_running(&catalog::container_name(key));
        let port_open = self.prober.port_open(&endpoint);

        let (http_ok, response_time_ms, error_message) =
            match health_url(&endpoint, &descriptor.health_check) {
                None => (None, None, None),
                Some(Ok(url)) => {
                    let result = self.prober.http_check(&url);
                    (Some(result.healthy), result.elapsed_ms, result.error)
                }
                Some(Err(message)) => (Some(false), None, Some(message)),
            };

        debug!(service = key, container_running, port_open, ?http_ok, "Service checked");

        ServiceHealth {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            container_running,
            port_open,
            http_ok,
            response_time_ms,
            error_message,
            critical: descriptor.required,
            healthy: ServiceHealth::is_healthy(container_running, port_open),
        }
    }
}

/// Base URL of the model server as resolved by the registry.
fn model_base_url(registry: &ServiceRegistry) -> Option<Url> {
    let state = registry.get(catalog::MODEL_SERVICE)?;
    Url::parse(&state.endpoint().base_url()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HealthLevel;
    use crate::domain::LlmModel;
    use crate::testing::{FakeHost, FakeModels, FakeNetwork, FakeRuntime};

    const ALL_PORTS: [u16; 9] = [8123, 5432, 6379, 11434, 5678, 3000, 10300, 10200, 10400];

    fn everything_up() -> (FakeNetwork, FakeRuntime) {
        let mut network = FakeNetwork::default().status(200);
        let mut runtime = FakeRuntime::default();
        for port in ALL_PORTS {
            network = network.open("localhost", port);
        }
        for key in catalog::service_keys() {
            runtime = runtime.running(&catalog::container_name(key));
        }
        (network, runtime)
    }

    #[test]
    fn all_services_up_is_operational() {
        let (network, runtime) = everything_up();
        let models = FakeModels::with(vec![LlmModel { name: "llama3.1:8b".into(), size_gb: 4.6 }]);
        let status = HealthReporter::new(&network, &runtime, &FakeHost::default(), &models)
            .report(&ServiceRegistry::defaults());

        assert!(status.all_healthy);
        assert_eq!(status.level(), HealthLevel::Operational);
        assert_eq!(status.llm_models.len(), 1);
        assert_eq!(models.requested(), vec!["http://localhost:11434/"]);
        let keys: Vec<_> = status.ordered_services().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"homeassistant"));
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn optional_service_down_is_degraded() {
        let (network, runtime) = everything_up();
        let runtime = runtime.stopped("LCARS-redis");
        let status = HealthReporter::new(&network, &runtime, &FakeHost::default(), &FakeModels::default())
            .report(&ServiceRegistry::defaults());

        assert!(!status.all_healthy);
        assert!(status.critical_healthy);
        assert_eq!(status.level().exit_code(), 1);
    }

    #[test]
    fn required_service_down_is_critical() {
        let (network, runtime) = everything_up();
        let network = network.close("localhost", 5432);
        let status = HealthReporter::new(&network, &runtime, &FakeHost::default(), &FakeModels::default())
            .report(&ServiceRegistry::defaults());

        let postgres = &status.services["postgres"];
        assert!(postgres.container_running);
        assert!(!postgres.port_open);
        assert!(!postgres.healthy);
        assert_eq!(status.level().exit_code(), 2);
    }

    #[test]
    fn http_failure_is_informational() {
        let (network, runtime) = everything_up();
        let network = network.status(500);
        let status = HealthReporter::new(&network, &runtime, &FakeHost::default(), &FakeModels::default())
            .report(&ServiceRegistry::defaults());

        let ollama = &status.services["ollama"];
        assert_eq!(ollama.http_ok, Some(false));
        assert_eq!(ollama.error_message.as_deref(), Some("HTTP 500"));
        assert!(ollama.healthy);
        assert_eq!(status.services["redis"].http_ok, None);
    }

    #[test]
    fn probes_follow_the_session_registry() {
        let (network, runtime) = everything_up();
        let network = network.open("gpu.lan", 11434);
        let mut registry = ServiceRegistry::defaults();
        let ollama = registry.get_mut("ollama").unwrap();
        ollama.set_use_existing("ollama", true).unwrap();
        ollama.custom_host = Some("gpu.lan".into());
        let models = FakeModels::default();

        HealthReporter::new(&network, &runtime, &FakeHost::default(), &models).report(&registry);

        assert!(network.http_requests().contains(&"http://gpu.lan:11434/api/tags".to_string()));
        assert_eq!(models.requested(), vec!["http://gpu.lan:11434/"]);
    }
}
