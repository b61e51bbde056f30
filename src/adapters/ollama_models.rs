//! Model inventory read from the Ollama tags endpoint.

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::domain::health::round_tenth;
use crate::domain::{AppError, LlmModel, ProbeConfig};
use crate::ports::ModelInventory;

const TAGS_PATH: &str = "api/tags";
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    #[serde(default = "unknown_name")]
    name: String,
    #[serde(default)]
    size: u64,
}

fn unknown_name() -> String {
    "unknown".to_string()
}

/// Lists models through `GET <base>/api/tags`.
#[derive(Debug, Clone)]
pub struct OllamaModels {
    client: Client,
}

impl OllamaModels {
    pub fn new(config: &ProbeConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn fetch(&self, base_url: &Url) -> Result<Vec<LlmModel>, String> {
        let url = base_url.join(TAGS_PATH).map_err(|e| e.to_string())?;
        let response = self.client.get(url).send().map_err(|e| e.to_string())?;
        let tags: TagsResponse = response.json().map_err(|e| e.to_string())?;
        Ok(tags.models.into_iter().map(to_model).collect())
    }
}

fn to_model(entry: TagEntry) -> LlmModel {
    LlmModel { name: entry.name, size_gb: round_tenth(entry.size as f64 / BYTES_PER_GB) }
}

impl ModelInventory for OllamaModels {
    fn list_models(&self, base_url: &Url) -> Vec<LlmModel> {
        self.fetch(base_url).unwrap_or_else(|e| {
            debug!(%base_url, error = %e, "Model inventory unavailable");
            Vec::new()
        })
    }
}
