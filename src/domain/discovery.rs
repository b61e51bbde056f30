//! Discovery snapshot model and registry merge rules.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::service::{ServiceRegistry, catalog};

/// Connection facts for a service found listening on its default location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredService {
    pub name: String,
    pub detected_host: String,
    pub detected_port: u16,
    pub connection_string: String,
}

/// Container as reported by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub id: String,
    pub status: String,
    pub state: String,
    pub image: String,
    pub ports: String,
}

/// Point-in-time result of one discovery scan.
///
/// Each scan produces a new snapshot; snapshots are never merged together.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoverySnapshot {
    pub timestamp: DateTime<Local>,
    pub services: BTreeMap<String, DiscoveredService>,
    pub containers: BTreeMap<String, ContainerInfo>,
}

impl DiscoverySnapshot {
    pub fn new(
        services: BTreeMap<String, DiscoveredService>,
        containers: BTreeMap<String, ContainerInfo>,
    ) -> Self {
        Self { timestamp: Local::now(), services, containers }
    }
}

/// Whether a container name belongs to one of the catalogued services.
pub fn is_stack_container(name: &str) -> bool {
    let lowered = name.to_lowercase();
    catalog::service_keys().any(|key| lowered.contains(key))
}

/// Keep only containers whose name matches a known service key.
pub fn stack_containers(
    containers: impl IntoIterator<Item = (String, ContainerInfo)>,
) -> BTreeMap<String, ContainerInfo> {
    containers.into_iter().filter(|(name, _)| is_stack_container(name)).collect()
}

impl ServiceRegistry {
    /// Apply detection facts from a scan.
    ///
    /// Only `detected_host`/`detected_port` change. Services absent from the
    /// snapshot have stale detection cleared. Reuse decisions and custom
    /// overrides are left untouched.
    pub fn merge_detection(&mut self, snapshot: &DiscoverySnapshot) {
        for (key, state) in self.iter_mut() {
            match snapshot.services.get(key) {
                Some(found) => {
                    state.detected_host = Some(found.detected_host.clone());
                    state.detected_port = Some(found.detected_port);
                }
                None => state.clear_detection(),
            }
        }
    }
}
