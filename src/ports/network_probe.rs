//! Network reachability port definition.

use url::Url;

/// Raw network operations used by the infrastructure prober.
///
/// Implementations apply their own timeouts and never panic on network
/// failure; errors are returned as display text.
pub trait NetworkProbe {
    /// Open (and immediately drop) a TCP connection to `host:port`.
    fn tcp_connect(&self, host: &str, port: u16) -> Result<(), String>;

    /// Issue an HTTP GET and return the response status code.
    fn http_get(&self, url: &Url) -> Result<u16, String>;

    /// Whether `host` currently resolves to at least one address.
    fn resolves(&self, host: &str) -> bool;
}
