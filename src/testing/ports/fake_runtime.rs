use std::collections::{BTreeMap, BTreeSet};

use crate::domain::ContainerInfo;
use crate::ports::ContainerRuntime;

/// In-memory container runtime.
#[derive(Default)]
pub struct FakeRuntime {
    containers: BTreeMap<String, ContainerInfo>,
    running: BTreeSet<String>,
}

impl FakeRuntime {
    pub fn running(mut self, name: &str) -> Self {
        self.running.insert(name.to_string());
        self.containers.insert(name.to_string(), container("running", "Up 1 hour"));
        self
    }

    pub fn stopped(mut self, name: &str) -> Self {
        self.running.remove(name);
        self.containers.insert(name.to_string(), container("exited", "Exited (0) 1 hour ago"));
        self
    }
}

fn container(state: &str, status: &str) -> ContainerInfo {
    ContainerInfo {
        id: "0123456789ab".to_string(),
        status: status.to_string(),
        state: state.to_string(),
        image: "example/image:latest".to_string(),
        ports: String::new(),
    }
}

impl ContainerRuntime for FakeRuntime {
    fn list_containers(&self) -> Vec<(String, ContainerInfo)> {
        self.containers.iter().map(|(name, info)| (name.clone(), info.clone())).collect()
    }

    fn is_running(&self, container: &str) -> bool {
        self.running.contains(container)
    }
}
