//! Per-session service state and effective-value resolution.

use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};
use url::{Host, Url};

use super::descriptor::ServiceDescriptor;
use crate::domain::AppError;

const DEFAULT_SCHEME: &str = "http";

/// Resolved network location of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// `http` unless the configured host embedded another scheme.
    pub scheme: String,
    /// Bare hostname with any scheme stripped.
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// `host:port` form used for display. IPv6 literals are bracketed.
    pub fn connection_string(&self) -> String {
        let host = if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        format!("{}:{}", host, self.port)
    }

    /// `scheme://host:port` form used for HTTP access.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.connection_string())
    }
}

/// Split a host value that may carry a pasted `http://` or `https://` prefix.
///
/// Returns the scheme (if one was embedded) and the bare hostname.
pub fn split_scheme(host: &str) -> (Option<String>, String) {
    let trimmed = host.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return (None, trimmed.to_string());
    }

    match Url::parse(trimmed) {
        Ok(url) => {
            let hostname = match url.host() {
                Some(Host::Ipv6(addr)) => addr.to_string(),
                Some(host) => host.to_string(),
                None => trimmed.to_string(),
            };
            (Some(url.scheme().to_string()), hostname)
        }
        Err(_) => (None, trimmed.to_string()),
    }
}

/// Mutable state of one service for a configuration session.
///
/// Host precedence: custom, then detected (only when reusing existing
/// infrastructure), then default. Port precedence: custom, then detected,
/// then default. Empty hosts and zero ports count as unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceState {
    #[serde(flatten)]
    descriptor: ServiceDescriptor,
    #[serde(default)]
    pub detected_host: Option<String>,
    #[serde(default)]
    pub detected_port: Option<u16>,
    #[serde(default)]
    use_existing: bool,
    #[serde(default)]
    pub custom_host: Option<String>,
    #[serde(default)]
    pub custom_port: Option<u16>,
}

impl ServiceState {
    pub fn new(descriptor: ServiceDescriptor) -> Self {
        Self {
            descriptor,
            detected_host: None,
            detected_port: None,
            use_existing: false,
            custom_host: None,
            custom_port: None,
        }
    }

    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn use_existing(&self) -> bool {
        self.use_existing
    }

    /// Record the deploy-fresh vs. reuse decision.
    ///
    /// Services that cannot reuse existing infrastructure only accept `false`.
    pub fn set_use_existing(&mut self, key: &str, use_existing: bool) -> Result<(), AppError> {
        if use_existing && !self.descriptor.can_use_existing {
            return Err(AppError::ReuseNotPermitted(key.to_string()));
        }
        self.use_existing = use_existing;
        Ok(())
    }

    pub(crate) fn replace_descriptor(&mut self, descriptor: ServiceDescriptor) {
        self.descriptor = descriptor;
    }

    /// Drop a reuse flag the descriptor does not allow. Returns whether it changed.
    pub(crate) fn enforce_reuse_policy(&mut self) -> bool {
        if self.use_existing && !self.descriptor.can_use_existing {
            self.use_existing = false;
            return true;
        }
        false
    }

    /// Whether this service is excluded from fresh deployment.
    pub fn is_reused(&self) -> bool {
        self.use_existing && self.descriptor.can_use_existing
    }

    pub fn clear_detection(&mut self) {
        self.detected_host = None;
        self.detected_port = None;
    }

    /// Effective host, possibly still carrying a pasted scheme.
    pub fn effective_host(&self) -> &str {
        if let Some(custom) = non_empty(self.custom_host.as_deref()) {
            return custom;
        }
        if self.use_existing {
            if let Some(detected) = non_empty(self.detected_host.as_deref()) {
                return detected;
            }
        }
        &self.descriptor.default_host
    }

    pub fn effective_port(&self) -> u16 {
        self.custom_port
            .filter(|port| *port != 0)
            .or(self.detected_port.filter(|port| *port != 0))
            .unwrap_or(self.descriptor.default_port)
    }

    /// Effective endpoint with any embedded scheme split from the hostname.
    pub fn endpoint(&self) -> Endpoint {
        let (scheme, host) = split_scheme(self.effective_host());
        Endpoint {
            scheme: scheme.unwrap_or_else(|| DEFAULT_SCHEME.to_string()),
            host,
            port: self.effective_port(),
        }
    }

    /// `host:port` of the effective endpoint.
    pub fn connection_string(&self) -> String {
        self.endpoint().connection_string()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::domain::service::HealthEndpoint;

    fn descriptor(port: u16, can_use_existing: bool) -> ServiceDescriptor {
        ServiceDescriptor {
            name: "Ollama".into(),
            description: "Local LLM inference server".into(),
            default_host: "localhost".into(),
            default_port: port,
            health_check: HealthEndpoint::http("/api/tags"),
            required: true,
            can_use_existing,
        }
    }

    #[test]
    fn defaults_produce_default_connection_string() {
        let state = ServiceState::new(descriptor(11434, true));
        assert_eq!(state.connection_string(), "localhost:11434");
    }

    #[test]
    fn custom_host_wins_over_detection() {
        let mut state = ServiceState::new(descriptor(5432, true));
        state.set_use_existing("postgres", true).unwrap();
        state.detected_host = Some("127.0.0.1".into());
        state.custom_host = Some("db.example.com".into());
        assert_eq!(state.effective_host(), "db.example.com");
    }

    #[test]
    fn detection_is_ignored_for_fresh_deployments() {
        let mut state = ServiceState::new(descriptor(5432, true));
        state.detected_host = Some("10.0.0.5".into());
        assert_eq!(state.effective_host(), "localhost");

        state.set_use_existing("postgres", true).unwrap();
        assert_eq!(state.effective_host(), "10.0.0.5");
    }

    #[test]
    fn zero_and_empty_values_fall_through() {
        let mut state = ServiceState::new(descriptor(6379, true));
        state.custom_port = Some(0);
        state.detected_port = Some(0);
        state.custom_host = Some("  ".into());
        assert_eq!(state.effective_port(), 6379);
        assert_eq!(state.effective_host(), "localhost");
    }

    #[test]
    fn custom_port_applies_to_fresh_deployments() {
        let mut state = ServiceState::new(descriptor(3000, true));
        state.custom_port = Some(3001);
        assert!(!state.use_existing());
        assert_eq!(state.effective_port(), 3001);
    }

    #[test]
    fn embedded_scheme_is_split_from_host() {
        let mut state = ServiceState::new(descriptor(443, true));
        state.custom_host = Some("https://llm.example.com".into());
        let endpoint = state.endpoint();
        assert_eq!(endpoint.scheme, "https");
        assert_eq!(endpoint.host, "llm.example.com");
        assert_eq!(state.connection_string(), "llm.example.com:443");
        assert_eq!(endpoint.base_url(), "https://llm.example.com:443");
    }

    #[test]
    fn ipv6_host_is_bracketed_in_urls() {
        let mut state = ServiceState::new(descriptor(8123, true));
        state.custom_host = Some("::1".into());
        let endpoint = state.endpoint();
        assert_eq!(endpoint.host, "::1");
        assert_eq!(endpoint.base_url(), "http://[::1]:8123");
        assert_eq!(state.connection_string(), "[::1]:8123");
        assert!(Url::parse(&format!("{}/api/", endpoint.base_url())).is_ok());
    }

    #[test]
    fn bracketed_ipv6_url_yields_bare_address() {
        assert_eq!(split_scheme("https://[::1]"), (Some("https".to_string()), "::1".to_string()));

        let mut state = ServiceState::new(descriptor(8443, true));
        state.custom_host = Some("https://[fe80::1]".into());
        assert_eq!(state.endpoint().host, "fe80::1");
        assert_eq!(state.endpoint().base_url(), "https://[fe80::1]:8443");
    }

    #[test]
    fn plain_host_defaults_to_http() {
        assert_eq!(split_scheme("db.local"), (None, "db.local".to_string()));
        assert_eq!(ServiceState::new(descriptor(8123, true)).endpoint().scheme, "http");
    }

    #[test]
    fn reuse_is_rejected_for_non_reusable_services() {
        let mut state = ServiceState::new(descriptor(5678, false));
        let err = state.set_use_existing("n8n", true).unwrap_err();
        assert!(matches!(err, AppError::ReuseNotPermitted(key) if key == "n8n"));
        assert!(!state.use_existing());
        assert!(state.set_use_existing("n8n", false).is_ok());
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = ServiceState::new(descriptor(11434, true));
        state.set_use_existing("ollama", true).unwrap();
        state.detected_host = Some("localhost".into());
        state.detected_port = Some(11434);
        state.custom_host = Some("gpu-box".into());
        let json = serde_json::to_string(&state).unwrap();
        let parsed: ServiceState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }

    fn opt_host() -> impl Strategy<Value = Option<String>> {
        prop::option::of(prop_oneof![Just(String::new()), "[a-z]{1,8}(\\.[a-z]{2,4})?"])
    }

    proptest! {
        #[test]
        fn host_resolution_precedence(
            custom in opt_host(),
            detected in opt_host(),
            use_existing in any::<bool>(),
        ) {
            let mut state = ServiceState::new(descriptor(8123, true));
            state.custom_host = custom.clone();
            state.detected_host = detected.clone();
            state.set_use_existing("homeassistant", use_existing).unwrap();

            let custom = custom.filter(|h| !h.is_empty());
            let detected = detected.filter(|h| !h.is_empty());
            match (&custom, &detected) {
                (Some(c), _) => prop_assert_eq!(state.effective_host(), c.as_str()),
                (None, Some(d)) if use_existing => prop_assert_eq!(state.effective_host(), d.as_str()),
                _ => prop_assert_eq!(state.effective_host(), "localhost"),
            }
            if !use_existing && custom.is_none() {
                prop_assert_eq!(state.effective_host(), "localhost");
            }
        }

        #[test]
        fn port_resolution_precedence(
            custom in prop::option::of(0u16..=u16::MAX),
            detected in prop::option::of(0u16..=u16::MAX),
            use_existing in any::<bool>(),
        ) {
            let mut state = ServiceState::new(descriptor(6379, true));
            state.custom_port = custom;
            state.detected_port = detected;
            state.set_use_existing("redis", use_existing).unwrap();

            let expected = custom
                .filter(|p| *p != 0)
                .or(detected.filter(|p| *p != 0))
                .unwrap_or(6379);
            prop_assert_eq!(state.effective_port(), expected);
        }
    }
}
