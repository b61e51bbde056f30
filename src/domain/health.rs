//! Probe results and HTTP status classification.

use serde::Serialize;

/// Status codes that prove liveness even though the request was rejected.
const LIVE_CLIENT_ERRORS: [u16; 3] = [401, 403, 404];

/// Outcome of a single service probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthCheckResult {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<f64>,
}

impl HealthCheckResult {
    pub fn healthy() -> Self {
        Self { healthy: true, error: None, elapsed_ms: None }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self { healthy: false, error: Some(error.into()), elapsed_ms: None }
    }

    pub fn with_elapsed_ms(mut self, elapsed_ms: f64) -> Self {
        self.elapsed_ms = Some(round_tenth(elapsed_ms));
        self
    }
}

/// Classify an HTTP status code returned by a health endpoint.
///
/// Anything below 500 is live. 401, 403, and 404 are named explicitly since
/// authenticated backends answer with them while fully up.
pub fn classify_status(status: u16) -> Result<(), String> {
    if status < 500 || LIVE_CLIENT_ERRORS.contains(&status) {
        Ok(())
    } else {
        Err(format!("HTTP {}", status))
    }
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_prove_liveness() {
        for status in [200, 204, 301, 401, 403, 404, 418, 499] {
            assert!(classify_status(status).is_ok(), "{} should be healthy", status);
        }
    }

    #[test]
    fn server_errors_carry_status_code() {
        assert_eq!(classify_status(500), Err("HTTP 500".to_string()));
        assert_eq!(classify_status(503), Err("HTTP 503".to_string()));
    }

    #[test]
    fn elapsed_time_is_rounded() {
        let result = HealthCheckResult::healthy().with_elapsed_ms(12.345);
        assert_eq!(result.elapsed_ms, Some(12.3));
    }
}
