//! Flat `KEY=VALUE` environment file editing.

use crate::domain::service::ServiceRegistry;

/// Insert or replace `key=value` in environment file content.
///
/// Existing lines keep their order. A replaced key stays in place; a new key
/// is appended after a blank separator when the file does not already end in
/// one. The result always ends with a single newline.
pub fn upsert_env_line(content: &str, key: &str, value: &str) -> String {
    let prefix = format!("{}=", key);
    let entry = format!("{}={}", key, value);

    let mut replaced = false;
    let mut lines: Vec<String> = content
        .lines()
        .map(|line| {
            if line.starts_with(&prefix) {
                replaced = true;
                entry.clone()
            } else {
                line.to_string()
            }
        })
        .collect();

    if !replaced {
        if lines.last().is_some_and(|last| !last.trim().is_empty()) {
            lines.push(String::new());
        }
        lines.push(entry);
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Runtime environment entries that point the deployed stack at its resolved endpoints.
///
/// Reused services propagate their effective location; fresh deployments use
/// in-network container addresses.
pub fn runtime_environment(registry: &ServiceRegistry) -> Vec<(String, String)> {
    let mut env = Vec::new();

    if let Some(ha) = registry.get("homeassistant").filter(|s| s.use_existing()) {
        env.push(("HA_URL".to_string(), ha.endpoint().base_url()));
    }

    match registry.get("ollama").filter(|s| s.use_existing()) {
        Some(ollama) => env.push(("OLLAMA_BASE_URL".to_string(), ollama.endpoint().base_url())),
        None => env.push(("OLLAMA_BASE_URL".to_string(), "http://ollama:11434".to_string())),
    }

    match registry.get("postgres").filter(|s| s.use_existing()) {
        Some(postgres) => {
            let endpoint = postgres.endpoint();
            env.push(("DB_POSTGRESDB_HOST".to_string(), endpoint.host));
            env.push(("DB_POSTGRESDB_PORT".to_string(), endpoint.port.to_string()));
        }
        None => {
            env.push(("DB_POSTGRESDB_HOST".to_string(), "postgres".to_string()));
            env.push(("DB_POSTGRESDB_PORT".to_string(), "5432".to_string()));
        }
    }

    env
}
