//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::PathBuf;

use crate::adapters::{DockerCli, FilesystemDeploymentStore, OllamaModels, SysinfoHostResources, TcpHttpProbe};
use crate::app::config::load_config;
use crate::app::{
    AppContext,
    commands::{apply, check, configure, discover, endpoints, env, health},
};

pub use crate::app::commands::apply::{ApplyOptions, ApplyOutcome, ServiceSummary};
pub use crate::app::commands::check::CheckOutcome;
pub use crate::app::commands::configure::{ConfigureOptions, ConfigureOutcome};
pub use crate::app::commands::discover::DiscoverOutcome;
pub use crate::app::commands::endpoints::AccessPoint;
pub use crate::domain::{AppError, SystemStatus};

type RealContext = AppContext<TcpHttpProbe, DockerCli, FilesystemDeploymentStore>;

/// Location of a deployment project and its optional tool configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: Option<PathBuf>,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), config: None }
    }

    /// Project rooted at the current directory.
    pub fn current() -> Result<Self, AppError> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn with_config(mut self, config: Option<PathBuf>) -> Self {
        self.config = config;
        self
    }

    /// Directory holding the generated artifacts.
    pub fn docker_dir(&self) -> Result<PathBuf, AppError> {
        let config = load_config(&self.root, self.config.as_deref())?;
        Ok(config.paths.docker_dir_in(&self.root))
    }
}

/// Create an `AppContext` wired to the real network, docker CLI, and filesystem.
fn create_context(project: &Project) -> Result<RealContext, AppError> {
    let config = load_config(&project.root, project.config.as_deref())?;
    let store = FilesystemDeploymentStore::new(config.paths.docker_dir_in(&project.root));
    let probe = TcpHttpProbe::new(&config.probe)?;
    let runtime = DockerCli::new(config.probe.command_timeout());
    Ok(AppContext::new(probe, runtime, store, config))
}

/// Scan for existing infrastructure and record detection in the persisted configuration.
pub fn discover(project: &Project) -> Result<DiscoverOutcome, AppError> {
    let ctx = create_context(project)?;
    discover::execute(&ctx)
}

/// Two-tier check of one service at its effective location.
pub fn check(project: &Project, key: &str) -> Result<CheckOutcome, AppError> {
    let ctx = create_context(project)?;
    check::execute(&ctx, key)
}

/// Edit one service and persist the result.
pub fn configure(
    project: &Project,
    key: &str,
    options: &ConfigureOptions,
) -> Result<ConfigureOutcome, AppError> {
    let ctx = create_context(project)?;
    configure::execute(&ctx, key, options)
}

/// Write the persisted configuration, compose override, and runtime environment.
pub fn apply(
    project: &Project,
    options: ApplyOptions,
    confirm: impl FnOnce(&[String]) -> Result<bool, AppError>,
) -> Result<ApplyOutcome, AppError> {
    let ctx = create_context(project)?;
    apply::execute(&ctx, options, confirm)
}

/// System-wide health report.
pub fn health(project: &Project) -> Result<SystemStatus, AppError> {
    let ctx = create_context(project)?;
    let resources = SysinfoHostResources::new(ctx.config().probe.command_timeout());
    let models = OllamaModels::new(&ctx.config().probe)?;
    Ok(health::execute(&ctx, &resources, &models))
}

/// Base URL of every service.
pub fn endpoints(project: &Project) -> Result<Vec<AccessPoint>, AppError> {
    let ctx = create_context(project)?;
    Ok(endpoints::execute(&ctx))
}

/// Insert or replace one entry in the runtime environment file.
pub fn env_set(project: &Project, key: &str, value: &str) -> Result<(), AppError> {
    let ctx = create_context(project)?;
    env::set(&ctx, key, value)
}

/// Path of the persisted deployment configuration for `project`.
pub fn deployment_config_path(project: &Project) -> Result<PathBuf, AppError> {
    Ok(FilesystemDeploymentStore::new(project.docker_dir()?).config_path())
}
