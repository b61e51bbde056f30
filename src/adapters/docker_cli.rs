//! Container runtime adapter driving the `docker` CLI.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use super::bounded_command::run_bounded;
use crate::domain::ContainerInfo;
use crate::ports::ContainerRuntime;

const DOCKER: &str = "docker";

/// One line of `docker ps --format '{{json .}}'`.
#[derive(Debug, Deserialize)]
struct PsLine {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(rename = "Names", default)]
    names: String,
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "Image", default)]
    image: String,
    #[serde(rename = "Ports", default)]
    ports: String,
}

/// `docker` CLI runtime. Every invocation is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
    timeout: Duration,
}

impl DockerCli {
    pub fn new(timeout: Duration) -> Self {
        Self { binary: DOCKER.to_string(), timeout }
    }

    /// Use a different CLI binary, e.g. `podman`.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }
}

/// Parse `docker ps` JSON-lines output, skipping lines that do not parse.
pub(crate) fn parse_ps_output(stdout: &str) -> Vec<(String, ContainerInfo)> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<PsLine>(line) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                debug!(error = %e, "Skipping unparseable docker ps line");
                None
            }
        })
        .map(|line| {
            let info = ContainerInfo {
                id: line.id,
                status: line.status,
                state: line.state,
                image: line.image,
                ports: line.ports,
            };
            (line.names, info)
        })
        .collect()
}

impl ContainerRuntime for DockerCli {
    fn list_containers(&self) -> Vec<(String, ContainerInfo)> {
        let Some(output) =
            run_bounded(&self.binary, &["ps", "-a", "--format", "{{json .}}"], self.timeout)
        else {
            warn!(binary = %self.binary, "Container runtime unavailable; no containers listed");
            return Vec::new();
        };

        if !output.success {
            warn!(binary = %self.binary, "Container listing failed; no containers listed");
            return Vec::new();
        }

        parse_ps_output(&output.stdout)
    }

    fn is_running(&self, container: &str) -> bool {
        run_bounded(
            &self.binary,
            &["inspect", "--format", "{{.State.Running}}", container],
            self.timeout,
        )
        .is_some_and(|output| output.stdout.trim().eq_ignore_ascii_case("true"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ps_json_lines() {
        let stdout = concat!(
            r#"{"ID":"a1","Names":"LCARS-postgres","Status":"Up 3 hours","State":"running","Image":"postgres:16","Ports":"0.0.0.0:5432->5432/tcp"}"#,
            "\n",
            "not json\n",
            "\n",
            r#"{"ID":"b2","Names":"grafana","State":"exited","Image":"grafana/grafana"}"#,
            "\n",
        );
        let containers = parse_ps_output(stdout);
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].0, "LCARS-postgres");
        assert_eq!(containers[0].1.ports, "0.0.0.0:5432->5432/tcp");
        assert_eq!(containers[1].1.status, "");
    }

    #[test]
    fn missing_binary_degrades_to_empty() {
        let runtime = DockerCli::new(Duration::from_secs(1)).with_binary("lcars-no-docker-here");
        assert!(runtime.list_containers().is_empty());
        assert!(!runtime.is_running("LCARS-n8n"));
    }
}
