//! Canonical catalogue of services managed by the stack.

use super::descriptor::{HealthEndpoint, ServiceDescriptor};

/// Prefix applied to a service key to form its container name.
pub const CONTAINER_PREFIX: &str = "LCARS-";

/// Workflow service whose `depends_on` list is rewritten when its stores are reused.
pub const WORKFLOW_SERVICE: &str = "n8n";

/// Shared stores the workflow service depends on, in declaration order.
pub const WORKFLOW_DEPENDENCIES: [&str; 2] = ["postgres", "redis"];

/// Service exposing the local inference model list.
pub const MODEL_SERVICE: &str = "ollama";

const LOCALHOST: &str = "localhost";

struct Entry {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    port: u16,
    http_path: Option<&'static str>,
    required: bool,
    can_use_existing: bool,
}

const CATALOG: [Entry; 9] = [
    Entry {
        key: "homeassistant",
        name: "Home Assistant",
        description: "State machine for device control",
        port: 8123,
        http_path: Some("/api/"),
        required: true,
        can_use_existing: true,
    },
    Entry {
        key: "postgres",
        name: "PostgreSQL",
        description: "Database for n8n workflows",
        port: 5432,
        http_path: None,
        required: true,
        can_use_existing: true,
    },
    Entry {
        key: "redis",
        name: "Redis",
        description: "Task queue and caching",
        port: 6379,
        http_path: None,
        required: false,
        can_use_existing: true,
    },
    Entry {
        key: "ollama",
        name: "Ollama",
        description: "Local LLM inference server",
        port: 11434,
        http_path: Some("/api/tags"),
        required: true,
        can_use_existing: true,
    },
    Entry {
        key: "n8n",
        name: "n8n",
        description: "Workflow orchestration",
        port: 5678,
        http_path: Some("/healthz"),
        required: true,
        can_use_existing: false,
    },
    Entry {
        key: "open-webui",
        name: "Open WebUI",
        description: "LLM chat interface",
        port: 3000,
        http_path: Some("/v1/models"),
        required: true,
        can_use_existing: true,
    },
    Entry {
        key: "whisper",
        name: "Whisper STT",
        description: "Speech-to-text service",
        port: 10300,
        http_path: None,
        required: false,
        can_use_existing: true,
    },
    Entry {
        key: "piper",
        name: "Piper TTS",
        description: "Text-to-speech service",
        port: 10200,
        http_path: None,
        required: false,
        can_use_existing: true,
    },
    Entry {
        key: "openwakeword",
        name: "openWakeWord",
        description: "Wake word detection",
        port: 10400,
        http_path: None,
        required: false,
        can_use_existing: true,
    },
];

/// Service keys in declaration order.
pub fn service_keys() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|entry| entry.key)
}

/// Descriptors for every catalogued service, in declaration order.
pub fn default_descriptors() -> Vec<(String, ServiceDescriptor)> {
    CATALOG
        .iter()
        .map(|entry| {
            let health_check = match entry.http_path {
                Some(path) => HealthEndpoint::http(path),
                None => HealthEndpoint::Tcp,
            };
            let descriptor = ServiceDescriptor {
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                default_host: LOCALHOST.to_string(),
                default_port: entry.port,
                health_check,
                required: entry.required,
                can_use_existing: entry.can_use_existing,
            };
            (entry.key.to_string(), descriptor)
        })
        .collect()
}

/// Look up the catalogue descriptor for a key.
pub fn descriptor(key: &str) -> Option<ServiceDescriptor> {
    default_descriptors().into_iter().find(|(k, _)| k == key).map(|(_, d)| d)
}

/// Container name the stack deploys a service under.
pub fn container_name(key: &str) -> String {
    format!("{}{}", CONTAINER_PREFIX, key)
}
