//! Discover command implementation.

use crate::app::api::{self, DiscoverOutcome, Project};
use crate::domain::AppError;

pub fn run_discover(project: &Project, json: bool) -> Result<(), AppError> {
    let outcome = api::discover(project)?;

    if json {
        let rendered = serde_json::to_string_pretty(&outcome.snapshot).map_err(|e| {
            AppError::Serialization { what: "discovery snapshot".to_string(), details: e.to_string() }
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    print!("{}", render(&outcome));
    Ok(())
}

fn render(outcome: &DiscoverOutcome) -> String {
    let mut out = String::from("Existing infrastructure:\n");
    for (key, state) in outcome.registry.iter() {
        let line = if !state.descriptor().can_use_existing {
            "deployed by the stack (cannot reuse existing)".to_string()
        } else if let Some(found) = outcome.snapshot.services.get(key) {
            format!("found at {}", found.connection_string)
        } else {
            "not detected".to_string()
        };
        let marker = if outcome.snapshot.services.contains_key(key) { "✅" } else { "  " };
        out.push_str(&format!("  {} {:<20} {}\n", marker, state.name(), line));
    }

    if outcome.snapshot.containers.is_empty() {
        out.push_str("\nNo LCARS containers found.\n");
    } else {
        out.push_str("\nContainers:\n");
        for (name, info) in &outcome.snapshot.containers {
            out.push_str(&format!(
                "  {:<24} {:<10} {:<32} {}\n",
                name, info.state, info.image, info.ports
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::{ContainerInfo, DiscoveredService, DiscoverySnapshot, ServiceRegistry};

    #[test]
    fn lists_every_service_and_container() {
        let mut services = BTreeMap::new();
        services.insert(
            "redis".to_string(),
            DiscoveredService {
                name: "Redis".into(),
                detected_host: "localhost".into(),
                detected_port: 6379,
                connection_string: "localhost:6379".into(),
            },
        );
        let mut containers = BTreeMap::new();
        containers.insert(
            "LCARS-redis".to_string(),
            ContainerInfo {
                id: "f00".into(),
                status: "Up".into(),
                state: "running".into(),
                image: "redis:7".into(),
                ports: "6379/tcp".into(),
            },
        );
        let outcome = DiscoverOutcome {
            snapshot: DiscoverySnapshot::new(services, containers),
            registry: ServiceRegistry::defaults(),
        };

        let text = render(&outcome);
        assert!(text.contains("Redis                found at localhost:6379"));
        assert!(text.contains("PostgreSQL           not detected"));
        assert!(text.contains("cannot reuse existing"));
        assert!(text.contains("LCARS-redis"));
    }
}
