//! Container-orchestration override (`docker-compose.override.yml`).

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::domain::AppError;
use crate::domain::service::ServiceRegistry;
use crate::domain::service::catalog::{WORKFLOW_DEPENDENCIES, WORKFLOW_SERVICE};

/// Profile that keeps a service out of a plain `docker compose up`.
pub const DISABLED_PROFILE: &str = "disabled";

const HEADER: &str = "# LCARS Computer - Deployment Configuration Override\n\
                      # Auto-generated - do not edit manually\n\n";

/// Override entry for a single compose service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<String>>,
    /// `Some(vec![])` renders as an explicit empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
}

/// Override document derived from a resolved registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOverride {
    services: Vec<(String, ServiceOverride)>,
    reused: Vec<(String, String)>,
}

struct ServicesMap<'a>(&'a [(String, ServiceOverride)]);

impl Serialize for ServicesMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, entry) in self.0 {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct Document<'a> {
    services: ServicesMap<'a>,
}

impl ComposeOverride {
    /// Derive overrides for every service in registry order.
    ///
    /// Reused services move to the disabled profile. Fresh services whose
    /// effective port differs from the default get a `host:container` remap.
    /// When a workflow dependency is disabled, the workflow service's
    /// `depends_on` is rewritten to the remaining dependencies.
    pub fn from_registry(registry: &ServiceRegistry) -> Self {
        let mut services: Vec<(String, ServiceOverride)> = Vec::new();
        let mut reused = Vec::new();

        for (key, state) in registry.iter() {
            let mut entry = ServiceOverride::default();
            if state.is_reused() {
                entry.profiles = Some(vec![DISABLED_PROFILE.to_string()]);
                reused.push((key.to_string(), state.connection_string()));
            } else {
                let default_port = state.descriptor().default_port;
                let effective_port = state.effective_port();
                if effective_port != default_port {
                    entry.ports = Some(vec![format!("{}:{}", effective_port, default_port)]);
                }
            }
            if entry != ServiceOverride::default() {
                services.push((key.to_string(), entry));
            }
        }

        let disabled: Vec<&str> = WORKFLOW_DEPENDENCIES
            .iter()
            .copied()
            .filter(|dep| registry.get(dep).is_some_and(|state| state.is_reused()))
            .collect();

        if !disabled.is_empty() {
            let remaining: Vec<String> = WORKFLOW_DEPENDENCIES
                .iter()
                .filter(|dep| !disabled.contains(*dep))
                .map(|dep| dep.to_string())
                .collect();

            match services.iter_mut().find(|(key, _)| key == WORKFLOW_SERVICE) {
                Some((_, entry)) => entry.depends_on = Some(remaining),
                None => {
                    let entry =
                        ServiceOverride { depends_on: Some(remaining), ..Default::default() };
                    let position = registry
                        .keys()
                        .position(|key| key == WORKFLOW_SERVICE)
                        .map(|index| insertion_index(registry, &services, index))
                        .unwrap_or(services.len());
                    services.insert(position, (WORKFLOW_SERVICE.to_string(), entry));
                }
            }
        }

        Self { services, reused }
    }

    pub fn service(&self, key: &str) -> Option<&ServiceOverride> {
        self.services.iter().find(|(k, _)| k == key).map(|(_, entry)| entry)
    }

    /// Render the override file. Identical registries render identical bytes.
    pub fn render(&self) -> Result<String, AppError> {
        let body = serde_yaml::to_string(&Document { services: ServicesMap(&self.services) })
            .map_err(|e| AppError::Serialization {
                what: "compose override".to_string(),
                details: e.to_string(),
            })?;

        let mut content = String::from(HEADER);
        content.push_str(&body);

        if !self.reused.is_empty() {
            content.push_str("\n# Disabled services (using existing infrastructure):\n");
            for (key, connection) in &self.reused {
                content.push_str(&format!("# {}: Using existing at {}\n", key, connection));
            }
        }
        Ok(content)
    }
}

/// Position in `services` that keeps registry order for a key at `registry_index`.
fn insertion_index(
    registry: &ServiceRegistry,
    services: &[(String, ServiceOverride)],
    registry_index: usize,
) -> usize {
    services
        .iter()
        .position(|(key, _)| {
            registry.keys().position(|k| k == key).is_some_and(|index| index > registry_index)
        })
        .unwrap_or(services.len())
}
