//! CLI Adapter.

mod apply;
mod configure;
mod discover;
mod health;
mod palette;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::api::{self, Project};
use crate::domain::AppError;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "LCARS_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "lcars")]
#[command(version)]
#[command(
    about = "Resolve, probe, and deploy the LCARS home-automation container stack",
    long_about = None
)]
struct Cli {
    /// Project root holding lcars.toml and the docker directory
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Tool configuration file (default: <root>/lcars.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan for already-running infrastructure and record what was found
    #[clap(visible_alias = "d")]
    Discover {
        /// Print the discovery snapshot as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Check one service at its effective location
    #[clap(visible_alias = "c")]
    Check {
        /// Service key (e.g. postgres, ollama)
        service: String,
    },
    /// Edit how one service is deployed or reached
    #[clap(visible_alias = "cfg")]
    Configure {
        /// Service key (e.g. postgres, ollama)
        service: String,
        /// Bind to existing infrastructure instead of deploying a container
        #[arg(long, value_name = "BOOL")]
        use_existing: Option<bool>,
        /// Custom host (a pasted http:// or https:// prefix is kept as the scheme)
        #[arg(long, conflicts_with = "clear_host")]
        host: Option<String>,
        /// Custom port
        #[arg(long, conflicts_with = "clear_port")]
        port: Option<String>,
        /// Drop the custom host
        #[arg(long)]
        clear_host: bool,
        /// Drop the custom port
        #[arg(long)]
        clear_port: bool,
    },
    /// Write the deployment configuration, compose override, and .env entries
    Apply {
        /// Apply even when reused required services are unreachable
        #[arg(short, long)]
        force: bool,
    },
    /// Report system-wide health (exit 0 healthy, 1 degraded, 2 critical)
    #[clap(visible_alias = "h")]
    Health {
        /// Show the result of each service check before the report
        #[arg(short, long, conflicts_with = "json")]
        verbose: bool,
        /// Print the report as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Print the access URL of every service
    #[clap(visible_alias = "e")]
    Endpoints,
    /// Edit the stack's runtime environment file
    Env {
        #[command(subcommand)]
        command: EnvCommands,
    },
}

#[derive(Subcommand)]
enum EnvCommands {
    /// Insert or replace KEY=VALUE
    Set { key: String, value: String },
}

/// Entry point for the CLI.
pub fn run() {
    init_logging();
    let cli = Cli::parse();

    let result = project(&cli).and_then(|project| dispatch(cli.command, &project));

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn project(cli: &Cli) -> Result<Project, AppError> {
    let project = match &cli.root {
        Some(root) => Project::new(root),
        None => Project::current()?,
    };
    Ok(project.with_config(cli.config.clone()))
}

fn dispatch(command: Commands, project: &Project) -> Result<i32, AppError> {
    match command {
        Commands::Discover { json } => discover::run_discover(project, json).map(|_| 0),
        Commands::Check { service } => run_check(project, &service),
        Commands::Configure { service, use_existing, host, port, clear_host, clear_port } => {
            let options =
                api::ConfigureOptions { use_existing, host, port, clear_host, clear_port };
            configure::run_configure(project, &service, &options).map(|_| 0)
        }
        Commands::Apply { force } => apply::run_apply(project, force).map(|_| 0),
        Commands::Health { verbose, json } => health::run_health(project, verbose, json),
        Commands::Endpoints => run_endpoints(project).map(|_| 0),
        Commands::Env { command } => match command {
            EnvCommands::Set { key, value } => run_env_set(project, &key, &value).map(|_| 0),
        },
    }
}

fn run_check(project: &Project, service: &str) -> Result<i32, AppError> {
    let outcome = api::check(project, service)?;
    let result = &outcome.result;
    if result.healthy {
        match result.elapsed_ms {
            Some(ms) => println!("✅ {} ({}) OK in {}ms", outcome.name, outcome.connection_string, ms),
            None => println!("✅ {} ({}) OK", outcome.name, outcome.connection_string),
        }
        Ok(0)
    } else {
        println!(
            "❌ {} ({}): {}",
            outcome.name,
            outcome.connection_string,
            result.error.as_deref().unwrap_or("unhealthy")
        );
        Ok(1)
    }
}

fn run_endpoints(project: &Project) -> Result<(), AppError> {
    for point in api::endpoints(project)? {
        let origin = if point.reused { "existing" } else { "stack" };
        println!("{:<16} {:<36} ({})", point.key, point.url, origin);
    }
    Ok(())
}

fn run_env_set(project: &Project, key: &str, value: &str) -> Result<(), AppError> {
    api::env_set(project, key, value)?;
    println!("✅ Set {} in {}", key, project.docker_dir()?.join(crate::domain::config::ENV_FILE).display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbose_and_json_conflict() {
        assert!(Cli::try_parse_from(["lcars", "health", "--verbose", "--json"]).is_err());
    }

    #[test]
    fn configure_parses_reuse_flag() {
        let cli = Cli::try_parse_from([
            "lcars",
            "configure",
            "postgres",
            "--use-existing",
            "true",
            "--port",
            "5433",
        ])
        .unwrap();
        match cli.command {
            Commands::Configure { service, use_existing, port, .. } => {
                assert_eq!(service, "postgres");
                assert_eq!(use_existing, Some(true));
                assert_eq!(port.as_deref(), Some("5433"));
            }
            _ => panic!("expected configure"),
        }
    }

    #[test]
    fn global_root_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["lcars", "endpoints", "--root", "/srv/lcars"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/srv/lcars")));
    }
}
