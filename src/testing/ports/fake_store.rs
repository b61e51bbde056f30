use std::sync::Mutex;

use crate::domain::artifacts::upsert_env_line;
use crate::domain::{AppError, ServiceRegistry};
use crate::ports::DeploymentStore;

/// In-memory deployment store.
#[derive(Default)]
pub struct FakeStore {
    pub registry: Mutex<Option<ServiceRegistry>>,
    pub override_content: Mutex<Option<String>>,
    pub env_content: Mutex<String>,
    pub saves: Mutex<usize>,
}

impl FakeStore {
    pub fn with_registry(registry: ServiceRegistry) -> Self {
        Self { registry: Mutex::new(Some(registry)), ..Self::default() }
    }

    pub fn saved(&self) -> Option<ServiceRegistry> {
        self.registry.lock().unwrap().clone()
    }

    pub fn override_file(&self) -> Option<String> {
        self.override_content.lock().unwrap().clone()
    }

    pub fn env_file(&self) -> String {
        self.env_content.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

impl DeploymentStore for FakeStore {
    fn load_registry(&self) -> Option<ServiceRegistry> {
        self.registry.lock().unwrap().clone()
    }

    fn save_registry(&self, registry: &ServiceRegistry) -> Result<(), AppError> {
        *self.registry.lock().unwrap() = Some(registry.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    fn write_override(&self, content: &str) -> Result<(), AppError> {
        *self.override_content.lock().unwrap() = Some(content.to_string());
        Ok(())
    }

    fn upsert_env(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut env = self.env_content.lock().unwrap();
        *env = upsert_env_line(&env, key, value);
        Ok(())
    }
}
