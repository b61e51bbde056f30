use std::sync::Mutex;

use url::Url;

use crate::domain::{LlmModel, SystemResources};
use crate::ports::{HostResources, ModelInventory};

#[derive(Default)]
pub struct FakeHost {
    pub resources: SystemResources,
}

impl HostResources for FakeHost {
    fn snapshot(&self) -> SystemResources {
        self.resources.clone()
    }
}

/// Model inventory that records which base URLs were queried.
#[derive(Default)]
pub struct FakeModels {
    models: Vec<LlmModel>,
    requested: Mutex<Vec<String>>,
}

impl FakeModels {
    pub fn with(models: Vec<LlmModel>) -> Self {
        Self { models, requested: Mutex::new(Vec::new()) }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl ModelInventory for FakeModels {
    fn list_models(&self, base_url: &Url) -> Vec<LlmModel> {
        self.requested.lock().unwrap().push(base_url.to_string());
        self.models.clone()
    }
}
