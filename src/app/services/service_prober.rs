//! Two-tier health probing of a single service.

use std::time::Instant;

use tracing::debug;
use url::Url;

use crate::domain::health::classify_status;
use crate::domain::{Endpoint, HealthCheckResult, HealthEndpoint, ServiceState};
use crate::ports::NetworkProbe;

/// Runs reachability then protocol checks against resolved endpoints.
///
/// Never fails: every outcome is folded into a [`HealthCheckResult`].
pub struct ServiceProber<'a, P: NetworkProbe> {
    probe: &'a P,
}

impl<'a, P: NetworkProbe> ServiceProber<'a, P> {
    pub fn new(probe: &'a P) -> Self {
        Self { probe }
    }

    /// Check a service at its effective host and port.
    pub fn check(&self, state: &ServiceState) -> HealthCheckResult {
        self.check_endpoint(&state.endpoint(), &state.descriptor().health_check)
    }

    /// Check a service at the catalogue default location, ignoring overrides.
    pub fn check_default(&self, state: &ServiceState) -> HealthCheckResult {
        let descriptor = state.descriptor();
        let endpoint = Endpoint {
            scheme: "http".to_string(),
            host: descriptor.default_host.clone(),
            port: descriptor.default_port,
        };
        self.check_endpoint(&endpoint, &descriptor.health_check)
    }

    pub fn check_endpoint(&self, endpoint: &Endpoint, health: &HealthEndpoint) -> HealthCheckResult {
        if !self.port_open(endpoint) {
            return HealthCheckResult::unhealthy(format!(
                "Port {} not accessible on {}",
                endpoint.port, endpoint.host
            ));
        }

        match health_url(endpoint, health) {
            None => HealthCheckResult::healthy(),
            Some(Ok(url)) => self.http_check(&url),
            Some(Err(message)) => HealthCheckResult::unhealthy(message),
        }
    }

    /// Reachability tier only.
    pub fn port_open(&self, endpoint: &Endpoint) -> bool {
        match self.probe.tcp_connect(&endpoint.host, endpoint.port) {
            Ok(()) => true,
            Err(e) => {
                debug!(endpoint = %endpoint.connection_string(), error = %e, "Port not reachable");
                false
            }
        }
    }

    /// Protocol tier only, timed.
    pub fn http_check(&self, url: &Url) -> HealthCheckResult {
        let started = Instant::now();
        let outcome = self.probe.http_get(url);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let result = match outcome.and_then(classify_status) {
            Ok(()) => HealthCheckResult::healthy(),
            Err(message) => HealthCheckResult::unhealthy(message),
        };
        debug!(%url, healthy = result.healthy, elapsed_ms, "HTTP health check");
        result.with_elapsed_ms(elapsed_ms)
    }
}

/// HTTP URL for a protocol-tier check, or `None` for TCP-only services.
pub fn health_url(endpoint: &Endpoint, health: &HealthEndpoint) -> Option<Result<Url, String>> {
    let suffix = health.path_and_query()?;
    let raw = format!("{}{}", endpoint.base_url(), suffix);
    Some(Url::parse(&raw).map_err(|e| format!("Invalid health URL {}: {}", raw, e)))
}
