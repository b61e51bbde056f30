//! Tool configuration loaded from `lcars.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

pub const CONFIG_FILE: &str = "lcars.toml";
pub const DEPLOYMENT_CONFIG_FILE: &str = "deployment_config.json";
pub const COMPOSE_OVERRIDE_FILE: &str = "docker-compose.override.yml";
pub const ENV_FILE: &str = ".env";

/// Tool configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LcarsConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

impl LcarsConfig {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: LcarsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.probe.validate()
    }
}

/// Artifact locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Directory holding the compose stack and its generated artifacts.
    #[serde(default = "default_docker_dir")]
    pub docker_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self { docker_dir: default_docker_dir() }
    }
}

impl PathsConfig {
    /// Resolve the docker directory against the project root.
    pub fn docker_dir_in(&self, root: &Path) -> PathBuf {
        if self.docker_dir.is_absolute() {
            self.docker_dir.clone()
        } else {
            root.join(&self.docker_dir)
        }
    }
}

/// Probe and external-command timeouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    #[serde(default = "default_tcp_timeout_ms")]
    pub tcp_timeout_ms: u64,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            tcp_timeout_ms: default_tcp_timeout_ms(),
            http_timeout_secs: default_http_timeout_secs(),
            command_timeout_secs: default_command_timeout_secs(),
        }
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.tcp_timeout_ms == 0 {
            return Err(AppError::config_error("probe.tcp_timeout_ms must be greater than 0"));
        }
        if self.http_timeout_secs == 0 {
            return Err(AppError::config_error("probe.http_timeout_secs must be greater than 0"));
        }
        if self.command_timeout_secs == 0 {
            return Err(AppError::config_error(
                "probe.command_timeout_secs must be greater than 0",
            ));
        }
        Ok(())
    }

    pub fn tcp_timeout(&self) -> Duration {
        Duration::from_millis(self.tcp_timeout_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }
}

fn default_docker_dir() -> PathBuf {
    PathBuf::from("docker")
}

fn default_tcp_timeout_ms() -> u64 {
    2000
}

fn default_http_timeout_secs() -> u64 {
    5
}

fn default_command_timeout_secs() -> u64 {
    10
}
