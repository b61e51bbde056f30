//! Configure command implementation.

use crate::app::api::{self, ConfigureOptions, Project};
use crate::domain::AppError;

pub fn run_configure(
    project: &Project,
    service: &str,
    options: &ConfigureOptions,
) -> Result<(), AppError> {
    let outcome = api::configure(project, service, options)?;

    for warning in &outcome.warnings {
        println!("⚠️  {}", warning);
    }

    let state = &outcome.state;
    let mode = if state.is_reused() { "existing infrastructure" } else { "fresh deployment" };
    println!("✅ {}: {} at {}", state.name(), mode, state.connection_string());
    Ok(())
}
