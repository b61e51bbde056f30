//! Apply command implementation.

use std::io::IsTerminal;

use dialoguer::Confirm;

use crate::app::api::{self, ApplyOptions, ApplyOutcome, Project};
use crate::domain::AppError;

pub fn run_apply(project: &Project, force: bool) -> Result<(), AppError> {
    let outcome = api::apply(project, ApplyOptions { force }, confirm_unhealthy)?;
    print!("{}", render(&outcome));
    Ok(())
}

/// Ask whether to continue despite unreachable services. Non-interactive sessions refuse.
fn confirm_unhealthy(failures: &[String]) -> Result<bool, AppError> {
    if !std::io::stdin().is_terminal() || !std::io::stderr().is_terminal() {
        return Ok(false);
    }

    eprintln!("⚠️  Required services are not reachable:");
    for failure in failures {
        eprintln!("  • {}", failure);
    }

    let answer = Confirm::new()
        .with_prompt("Apply the configuration anyway?")
        .default(false)
        .interact_opt()
        .map_err(|err| AppError::config_error(format!("Failed to read confirmation: {}", err)))?;

    match answer {
        Some(true) => Ok(true),
        _ => Err(AppError::Cancelled),
    }
}

fn render(outcome: &ApplyOutcome) -> String {
    let mut out = String::new();
    for failure in &outcome.overridden_failures {
        out.push_str(&format!("⚠️  Applied despite: {}\n", failure));
    }

    out.push_str("✅ Deployment configuration applied\n");
    if !outcome.reused.is_empty() {
        out.push_str("\nUsing existing infrastructure:\n");
        for service in &outcome.reused {
            out.push_str(&format!("  • {} at {}\n", service.name, service.connection_string));
        }
    }
    if !outcome.fresh.is_empty() {
        out.push_str("\nDeploying fresh:\n");
        for service in &outcome.fresh {
            out.push_str(&format!("  • {}\n", service.name));
        }
    }
    if !outcome.environment.is_empty() {
        out.push_str("\nEnvironment:\n");
        for (key, value) in &outcome.environment {
            out.push_str(&format!("  {}={}\n", key, value));
        }
    }
    out
}
