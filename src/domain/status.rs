//! Aggregate system status produced by the health reporter.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Health detail for one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceHealth {
    pub name: String,
    pub description: String,
    pub container_running: bool,
    pub port_open: bool,
    /// `None` when the service has no HTTP endpoint.
    pub http_ok: Option<bool>,
    pub response_time_ms: Option<f64>,
    pub error_message: Option<String>,
    pub critical: bool,
    pub healthy: bool,
}

impl ServiceHealth {
    /// A service is healthy when its container runs and its port accepts connections.
    pub fn is_healthy(container_running: bool, port_open: bool) -> bool {
        container_running && port_open
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryInfo {
    pub total_gb: f64,
    pub available_gb: f64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskInfo {
    pub total_gb: u64,
    pub available_gb: u64,
    pub used_percent: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GpuInfo {
    pub name: String,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
    pub utilization_percent: u64,
}

impl GpuInfo {
    pub fn memory_used_percent(&self) -> u64 {
        if self.memory_total_mb == 0 {
            return 0;
        }
        ((self.memory_used_mb as f64 / self.memory_total_mb as f64) * 100.0).round() as u64
    }
}

/// Best-effort host resource snapshot. Unreadable parts are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SystemResources {
    pub memory: Option<MemoryInfo>,
    pub disk: Option<DiskInfo>,
    pub gpu: Option<GpuInfo>,
}

/// Locally available inference model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmModel {
    pub name: String,
    pub size_gb: f64,
}

/// Overall classification of a status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Operational,
    Degraded,
    Critical,
}

impl HealthLevel {
    /// Process exit code for the health CLI surface.
    pub fn exit_code(self) -> i32 {
        match self {
            HealthLevel::Operational => 0,
            HealthLevel::Degraded => 1,
            HealthLevel::Critical => 2,
        }
    }
}

/// System-wide health report.
#[derive(Debug, Clone, Serialize)]
pub struct SystemStatus {
    pub timestamp: DateTime<Local>,
    pub all_healthy: bool,
    pub critical_healthy: bool,
    pub services: BTreeMap<String, ServiceHealth>,
    /// Service keys in registry order; `services` is keyed for lookup.
    #[serde(skip)]
    pub order: Vec<String>,
    pub system_resources: SystemResources,
    pub llm_models: Vec<LlmModel>,
}

impl SystemStatus {
    /// Build a report, deriving the aggregate flags from the per-service results.
    pub fn new(
        services: Vec<(String, ServiceHealth)>,
        system_resources: SystemResources,
        llm_models: Vec<LlmModel>,
    ) -> Self {
        let all_healthy = services.iter().all(|(_, health)| health.healthy);
        let critical_healthy =
            services.iter().filter(|(_, health)| health.critical).all(|(_, health)| health.healthy);
        let order = services.iter().map(|(key, _)| key.clone()).collect();

        Self {
            timestamp: Local::now(),
            all_healthy,
            critical_healthy,
            services: services.into_iter().collect(),
            order,
            system_resources,
            llm_models,
        }
    }

    pub fn level(&self) -> HealthLevel {
        if !self.critical_healthy {
            HealthLevel::Critical
        } else if !self.all_healthy {
            HealthLevel::Degraded
        } else {
            HealthLevel::Operational
        }
    }

    /// Services in registry order.
    pub fn ordered_services(&self) -> impl Iterator<Item = (&str, &ServiceHealth)> {
        self.order
            .iter()
            .filter_map(|key| self.services.get(key).map(|health| (key.as_str(), health)))
    }
}
