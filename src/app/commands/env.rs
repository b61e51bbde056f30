//! Runtime environment file editing.

use crate::app::AppContext;
use crate::domain::AppError;
use crate::domain::config::ENV_FILE;
use crate::ports::{ContainerRuntime, DeploymentStore, NetworkProbe};

/// Insert or replace `key=value` in the stack's environment file.
pub fn set<P, C, S>(ctx: &AppContext<P, C, S>, key: &str, value: &str) -> Result<(), AppError>
where
    P: NetworkProbe,
    C: ContainerRuntime,
    S: DeploymentStore,
{
    validate_key(key)?;
    if value.contains('\n') {
        return Err(invalid("value", "Value must be a single line"));
    }
    ctx.store().upsert_env(key, value)
}

fn validate_key(key: &str) -> Result<(), AppError> {
    let mut chars = key.chars();
    let starts_well = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_well || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(
            "key",
            "Key must start with a letter or underscore and contain only letters, digits, and underscores",
        ));
    }
    Ok(())
}

fn invalid(field: &str, message: &str) -> AppError {
    AppError::Validation {
        service: ENV_FILE.to_string(),
        field: field.to_string(),
        message: message.to_string(),
    }
}
