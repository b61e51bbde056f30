//! Validation of user-supplied hosts and ports.

use url::Url;

use crate::domain::service::split_scheme;

/// Structured validation result. Never an error; callers decide how to surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome<T> {
    /// Normalized value when valid.
    pub value: Option<T>,
    /// Rejection reason, or an advisory note for a valid value.
    pub message: Option<String>,
}

impl<T> ValidationOutcome<T> {
    fn valid(value: T) -> Self {
        Self { value: Some(value), message: None }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self { value: None, message: Some(message.into()) }
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// Validate a port number given as text.
pub fn validate_port(input: &str) -> ValidationOutcome<u16> {
    let Ok(port) = input.trim().parse::<i64>() else {
        return ValidationOutcome::invalid("Port must be a number");
    };
    match u16::try_from(port) {
        Ok(port) if port >= 1 => ValidationOutcome::valid(port),
        _ => ValidationOutcome::invalid("Port must be between 1 and 65535"),
    }
}

/// Validate a hostname or IP address, optionally prefixed with `http://` or `https://`.
///
/// `resolves` reports whether the bare hostname currently resolves.
/// Unresolvable names stay valid with an advisory message, since the
/// infrastructure may not exist yet.
pub fn validate_hostname(input: &str, resolves: impl Fn(&str) -> bool) -> ValidationOutcome<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ValidationOutcome::invalid("Hostname cannot be empty");
    }

    if let Some(message) = url_form_error(trimmed) {
        return ValidationOutcome::invalid(message);
    }

    let (_, hostname) = split_scheme(trimmed);
    if hostname.is_empty() || hostname.chars().any(|c| c.is_whitespace() || c == '/') {
        return ValidationOutcome::invalid(format!("'{}' is not a valid hostname", trimmed));
    }

    if LOOPBACK_HOSTS.contains(&hostname.as_str()) || resolves(&hostname) {
        return ValidationOutcome::valid(trimmed.to_string());
    }

    ValidationOutcome {
        value: Some(trimmed.to_string()),
        message: Some(format!("'{}' does not resolve yet", hostname)),
    }
}

/// Reject URL forms that carry more than a scheme and a host.
///
/// Ports must be configured separately; anything after the authority would
/// otherwise be dropped without notice.
fn url_form_error(input: &str) -> Option<String> {
    let rest = input.strip_prefix("http://").or_else(|| input.strip_prefix("https://"))?;

    let Ok(url) = Url::parse(input) else {
        return Some(format!("'{}' is not a valid hostname", input));
    };
    if !matches!(url.path(), "" | "/") || url.query().is_some() || url.fragment().is_some() {
        return Some(format!("'{}' must not include a path or query", input));
    }

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_and_port = authority.rsplit('@').next().unwrap_or_default();
    let after_literal = host_and_port.rsplit(']').next().unwrap_or_default();
    if url.port().is_some() || after_literal.contains(':') {
        return Some(format!("'{}' must not include a port; set the port separately", input));
    }
    None
}
