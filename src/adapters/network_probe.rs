//! TCP and HTTP probing over the real network.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::domain::{AppError, ProbeConfig};
use crate::ports::NetworkProbe;

/// Network probe backed by `std::net` for TCP and `reqwest` for HTTP.
#[derive(Debug, Clone)]
pub struct TcpHttpProbe {
    tcp_timeout: Duration,
    client: Client,
}

impl TcpHttpProbe {
    pub fn new(config: &ProbeConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .connect_timeout(config.tcp_timeout())
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { tcp_timeout: config.tcp_timeout(), client })
    }
}

impl NetworkProbe for TcpHttpProbe {
    fn tcp_connect(&self, host: &str, port: u16) -> Result<(), String> {
        let addrs: Vec<_> = (host, port)
            .to_socket_addrs()
            .map_err(|e| format!("Failed to resolve {}: {}", host, e))?
            .collect();

        if addrs.is_empty() {
            return Err(format!("No addresses found for {}", host));
        }

        let mut last_error = None;
        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.tcp_timeout) {
                Ok(_) => {
                    debug!(%addr, "TCP connect succeeded");
                    return Ok(());
                }
                Err(e) => {
                    debug!(%addr, error = %e, "TCP connect failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.map(|e| e.to_string()).unwrap_or_else(|| "connection failed".to_string()))
    }

    fn http_get(&self, url: &Url) -> Result<u16, String> {
        debug!(%url, "HTTP GET");
        match self.client.get(url.clone()).send() {
            Ok(response) => Ok(response.status().as_u16()),
            Err(e) if e.is_timeout() => Err("Timeout".to_string()),
            Err(e) if e.is_connect() => Err(format!("Connection failed: {}", e)),
            Err(e) => Err(e.to_string()),
        }
    }

    fn resolves(&self, host: &str) -> bool {
        (host, 0).to_socket_addrs().map(|mut addrs| addrs.next().is_some()).unwrap_or(false)
    }
}
