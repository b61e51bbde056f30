//! Health command implementation and report rendering.

use super::palette::{Palette, pad};
use crate::app::api::{self, Project};
use crate::domain::status::SystemResources;
use crate::domain::{AppError, HealthLevel, ServiceHealth, SystemStatus};

const RULE_WIDTH: usize = 60;

pub fn run_health(project: &Project, verbose: bool, json: bool) -> Result<i32, AppError> {
    let status = api::health(project)?;

    if json {
        let rendered = serde_json::to_string_pretty(&status).map_err(|e| {
            AppError::Serialization { what: "health report".to_string(), details: e.to_string() }
        })?;
        println!("{}", rendered);
    } else {
        let palette = Palette::for_stdout();
        if verbose {
            print!("{}", render_checks(&status, palette));
        }
        print!("{}", render_report(&status, palette));
    }

    Ok(status.level().exit_code())
}

/// One line per service check, with the error of failed ones.
fn render_checks(status: &SystemStatus, palette: Palette) -> String {
    let mut out = format!("\n{}\n\n", palette.bold("Running LCARS Computer Health Check..."));
    for (key, health) in status.ordered_services() {
        if health.healthy {
            out.push_str(&format!("Checking {}... {}\n", key, palette.green("✓ OK")));
        } else {
            out.push_str(&format!("Checking {}... {}\n", key, palette.red("✗ FAILED")));
            if let Some(error) = &health.error_message {
                out.push_str(&format!("  Error: {}\n", error));
            }
        }
    }
    out
}

fn render_report(status: &SystemStatus, palette: Palette) -> String {
    let rule = palette.bold(&"=".repeat(RULE_WIDTH));
    let mut out = format!("\n{}\n", rule);
    out.push_str(&format!("{}\n", palette.bold("         LCARS COMPUTER SYSTEM STATUS REPORT")));
    out.push_str(&format!("{}\n\n", rule));

    let overall = match status.level() {
        HealthLevel::Operational => palette.green("ALL SYSTEMS OPERATIONAL"),
        HealthLevel::Degraded => palette.yellow("DEGRADED - Non-critical services down"),
        HealthLevel::Critical => palette.red("CRITICAL - Essential services unavailable"),
    };
    out.push_str(&format!("Overall Status: {}\n", overall));
    out.push_str(&format!("Timestamp: {}\n\n", status.timestamp.to_rfc3339()));

    out.push_str(&format!("{}\n\n", palette.bold("Services:")));
    out.push_str(&format!(
        "  {:<20} {:<12} {:<8} {:<10} {:<10}\n",
        "Service", "Container", "Port", "HTTP", "Latency"
    ));
    out.push_str(&format!(
        "  {:<20} {:<12} {:<8} {:<10} {:<10}\n",
        "-".repeat(18),
        "-".repeat(10),
        "-".repeat(6),
        "-".repeat(8),
        "-".repeat(8)
    ));
    for (key, health) in status.ordered_services() {
        out.push_str(&service_row(key, health, palette));
    }

    out.push_str(&format!("\n{}\n\n", palette.bold("System Resources:")));
    out.push_str(&render_resources(&status.system_resources, palette));

    out.push_str(&format!("\n{}\n\n", palette.bold("Available LLM Models:")));
    if status.llm_models.is_empty() {
        out.push_str(&format!(
            "  {}\n",
            palette.yellow(
                "No models found. Pull a model with: docker exec LCARS-ollama ollama pull llama3.1:8b"
            )
        ));
    } else {
        for model in &status.llm_models {
            out.push_str(&format!("  • {} ({}GB)\n", model.name, model.size_gb));
        }
    }

    out.push_str(&format!("\n{}\n\n", rule));
    out
}

fn service_row(key: &str, health: &ServiceHealth, palette: Palette) -> String {
    let container =
        if health.container_running { palette.green("Running") } else { palette.red("Stopped") };
    let port = if health.port_open { palette.green("Open") } else { palette.red("Closed") };
    let http = match health.http_ok {
        None => "N/A".to_string(),
        Some(true) => palette.green("OK"),
        Some(false) => palette.red("Failed"),
    };
    let latency = match health.response_time_ms {
        Some(ms) => format!("{:.0}ms", ms),
        None => "N/A".to_string(),
    };

    format!(
        "  {:<20} {} {} {} {}\n",
        key,
        pad(&container, 12),
        pad(&port, 8),
        pad(&http, 10),
        latency
    )
}

fn render_resources(resources: &SystemResources, palette: Palette) -> String {
    let mut out = String::new();

    if let Some(memory) = &resources.memory {
        let percent = palette.usage(memory.used_percent, 80.0, 90.0, &format!("{}%", memory.used_percent));
        out.push_str(&format!(
            "  Memory: {} used ({}GB available of {}GB)\n",
            percent, memory.available_gb, memory.total_gb
        ));
    }

    if let Some(disk) = &resources.disk {
        let percent =
            palette.usage(disk.used_percent as f64, 80.0, 90.0, &format!("{}%", disk.used_percent));
        out.push_str(&format!("  Disk:   {} used ({}GB available)\n", percent, disk.available_gb));
    }

    match &resources.gpu {
        Some(gpu) => {
            let used = gpu.memory_used_percent();
            let vram = palette.usage(used as f64, 80.0, 95.0, &format!("{}%", used));
            out.push_str(&format!("  GPU:    {}\n", gpu.name));
            out.push_str(&format!(
                "          VRAM: {} ({}MB / {}MB)\n",
                vram, gpu.memory_used_mb, gpu.memory_total_mb
            ));
            out.push_str(&format!("          Utilization: {}%\n", gpu.utilization_percent));
        }
        None => {
            out.push_str(&format!(
                "  GPU:    {}\n",
                palette.yellow("Not detected or nvidia-smi unavailable")
            ));
        }
    }
    out
}
