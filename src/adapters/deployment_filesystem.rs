//! Filesystem-backed deployment store rooted at the docker directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::artifacts::upsert_env_line;
use crate::domain::config::{COMPOSE_OVERRIDE_FILE, DEPLOYMENT_CONFIG_FILE, ENV_FILE};
use crate::domain::{AppError, DeploymentConfig, ServiceRegistry};
use crate::ports::DeploymentStore;

/// Stores artifacts as plain files under `docker_dir`.
#[derive(Debug, Clone)]
pub struct FilesystemDeploymentStore {
    docker_dir: PathBuf,
}

impl FilesystemDeploymentStore {
    pub fn new(docker_dir: impl Into<PathBuf>) -> Self {
        Self { docker_dir: docker_dir.into() }
    }

    pub fn docker_dir(&self) -> &Path {
        &self.docker_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.docker_dir.join(DEPLOYMENT_CONFIG_FILE)
    }

    pub fn override_path(&self) -> PathBuf {
        self.docker_dir.join(COMPOSE_OVERRIDE_FILE)
    }

    pub fn env_path(&self) -> PathBuf {
        self.docker_dir.join(ENV_FILE)
    }
}

/// Replace `path` with `content` through a sibling temp file and a rename.
///
/// Readers observe either the old or the new file, never a partial write.
/// Permissions of an existing target carry over to the replacement.
fn write_atomic(path: &Path, content: &str) -> Result<(), AppError> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "target has no file name"))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(format!(".tmp-{}", std::process::id()));
    let tmp_path = parent.join(tmp_name);

    let result = (|| -> Result<(), AppError> {
        let mut file = create_temp(&tmp_path, path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Create the temp file with the target's permissions applied before any
/// content lands in it.
fn create_temp(tmp_path: &Path, target: &Path) -> io::Result<fs::File> {
    let file = fs::File::create(tmp_path)?;
    if let Ok(metadata) = fs::metadata(target) {
        file.set_permissions(metadata.permissions())?;
    }
    Ok(file)
}

impl DeploymentStore for FilesystemDeploymentStore {
    fn load_registry(&self) -> Option<ServiceRegistry> {
        let path = self.config_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No persisted deployment configuration");
                return None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unable to read deployment configuration");
                return None;
            }
        };

        let mut registry = DeploymentConfig::parse(&content)?.services;
        for key in registry.anchor_to_catalogue() {
            warn!(service = %key, "Persisted reuse flag contradicts the catalogue; deploying fresh");
        }
        Some(registry)
    }

    fn save_registry(&self, registry: &ServiceRegistry) -> Result<(), AppError> {
        let json = DeploymentConfig::new(registry.clone()).to_json()?;
        let path = self.config_path();
        write_atomic(&path, &json)?;
        info!(path = %path.display(), "Saved deployment configuration");
        Ok(())
    }

    fn write_override(&self, content: &str) -> Result<(), AppError> {
        let path = self.override_path();
        write_atomic(&path, content)?;
        info!(path = %path.display(), "Wrote compose override");
        Ok(())
    }

    fn upsert_env(&self, key: &str, value: &str) -> Result<(), AppError> {
        let path = self.env_path();
        let current = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        write_atomic(&path, &upsert_env_line(&current, key, value))?;
        debug!(key, path = %path.display(), "Updated environment file");
        Ok(())
    }
}
