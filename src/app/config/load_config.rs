//! Tool configuration loading from the project root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::AppError;
use crate::domain::LcarsConfig;
use crate::domain::config::CONFIG_FILE;

/// Location of the tool configuration: `explicit` if given, else `<root>/lcars.toml`.
pub fn config_path(root: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => root.join(path),
        None => root.join(CONFIG_FILE),
    }
}

/// Load and validate the tool configuration.
///
/// An absent default file yields defaults. An explicitly requested file must exist.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<LcarsConfig, AppError> {
    let path = config_path(root, explicit);
    match fs::read_to_string(&path) {
        Ok(content) => {
            debug!(path = %path.display(), "Loaded tool configuration");
            LcarsConfig::parse(&content)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound && explicit.is_none() => {
            debug!(path = %path.display(), "No tool configuration; using defaults");
            Ok(LcarsConfig::default())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AppError::config_error(format!(
            "Configuration file not found: {}",
            path.display()
        ))),
        Err(e) => Err(e.into()),
    }
}
