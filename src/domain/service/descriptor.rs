//! Service descriptor domain model.

use serde::{Deserialize, Serialize};

/// How liveness of a service is verified once its port accepts connections.
///
/// HTTP endpoints carry only the path and query. Scheme, host, and port are
/// always supplied by the resolved service state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HealthEndpoint {
    /// Reachability of the TCP port is sufficient.
    Tcp,
    /// An HTTP GET against `path[?query]` must classify as healthy.
    Http {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        query: Option<String>,
    },
}

impl HealthEndpoint {
    pub fn http(path: &str) -> Self {
        HealthEndpoint::Http { path: path.to_string(), query: None }
    }

    /// Path and query suffix appended to a resolved base URL.
    ///
    /// Returns `None` for TCP-only endpoints. An empty path becomes `/`.
    pub fn path_and_query(&self) -> Option<String> {
        match self {
            HealthEndpoint::Tcp => None,
            HealthEndpoint::Http { path, query } => {
                let mut suffix = if path.is_empty() {
                    "/".to_string()
                } else if path.starts_with('/') {
                    path.clone()
                } else {
                    format!("/{}", path)
                };
                if let Some(query) = query.as_deref().filter(|q| !q.is_empty()) {
                    suffix.push('?');
                    suffix.push_str(query);
                }
                Some(suffix)
            }
        }
    }
}

/// Catalogue entry defining a manageable service and its defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Human-readable service name.
    pub name: String,
    /// Short description of the role the service plays in the stack.
    pub description: String,
    pub default_host: String,
    pub default_port: u16,
    pub health_check: HealthEndpoint,
    /// Service is essential to system function.
    pub required: bool,
    /// Service may bind to pre-existing infrastructure instead of a fresh container.
    pub can_use_existing: bool,
}
