//! Host resource collection via `sysinfo` and `nvidia-smi`.

use std::path::Path;
use std::time::Duration;

use sysinfo::{Disks, System};
use tracing::debug;

use super::bounded_command::run_bounded;
use crate::domain::health::round_tenth;
use crate::domain::status::{DiskInfo, GpuInfo, MemoryInfo};
use crate::domain::SystemResources;
use crate::ports::HostResources;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
const NVIDIA_SMI: &str = "nvidia-smi";

/// Reads memory and root-disk usage from the OS and GPU state from `nvidia-smi`.
#[derive(Debug, Clone)]
pub struct SysinfoHostResources {
    command_timeout: Duration,
}

impl SysinfoHostResources {
    pub fn new(command_timeout: Duration) -> Self {
        Self { command_timeout }
    }

    fn memory(&self) -> Option<MemoryInfo> {
        let mut sys = System::new();
        sys.refresh_memory();
        memory_info(sys.total_memory(), sys.available_memory())
    }

    fn disk(&self) -> Option<DiskInfo> {
        let disks = Disks::new_with_refreshed_list();
        let root = disks.list().iter().find(|disk| disk.mount_point() == Path::new("/"))?;
        disk_info(root.total_space(), root.available_space())
    }

    fn gpu(&self) -> Option<GpuInfo> {
        let output = run_bounded(
            NVIDIA_SMI,
            &[
                "--query-gpu=name,memory.used,memory.total,utilization.gpu",
                "--format=csv,noheader,nounits",
            ],
            self.command_timeout,
        )?;
        if !output.success {
            debug!("nvidia-smi exited unsuccessfully");
            return None;
        }
        parse_nvidia_smi(&output.stdout)
    }
}

impl HostResources for SysinfoHostResources {
    fn snapshot(&self) -> SystemResources {
        SystemResources { memory: self.memory(), disk: self.disk(), gpu: self.gpu() }
    }
}

fn memory_info(total_bytes: u64, available_bytes: u64) -> Option<MemoryInfo> {
    if total_bytes == 0 {
        return None;
    }
    let used_percent = (1.0 - available_bytes as f64 / total_bytes as f64) * 100.0;
    Some(MemoryInfo {
        total_gb: round_tenth(total_bytes as f64 / BYTES_PER_GB),
        available_gb: round_tenth(available_bytes as f64 / BYTES_PER_GB),
        used_percent: round_tenth(used_percent),
    })
}

fn disk_info(total_bytes: u64, available_bytes: u64) -> Option<DiskInfo> {
    if total_bytes == 0 {
        return None;
    }
    let used = total_bytes.saturating_sub(available_bytes);
    Some(DiskInfo {
        total_gb: (total_bytes as f64 / BYTES_PER_GB) as u64,
        available_gb: (available_bytes as f64 / BYTES_PER_GB) as u64,
        used_percent: ((used as f64 / total_bytes as f64) * 100.0).round() as u64,
    })
}

/// Parse the first line of `nvidia-smi --format=csv,noheader,nounits`.
pub(crate) fn parse_nvidia_smi(stdout: &str) -> Option<GpuInfo> {
    let line = stdout.lines().map(str::trim).find(|line| !line.is_empty())?;
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < 4 {
        debug!(line, "Unexpected nvidia-smi output");
        return None;
    }

    Some(GpuInfo {
        name: parts[0].to_string(),
        memory_used_mb: parts[1].parse().ok()?,
        memory_total_mb: parts[2].parse().ok()?,
        utilization_percent: parts[3].parse().ok()?,
    })
}
