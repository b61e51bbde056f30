use std::collections::BTreeSet;
use std::sync::Mutex;

use url::Url;

use crate::ports::NetworkProbe;

/// Scripted network: a set of open `(host, port)` pairs and one HTTP status for every URL.
#[derive(Default)]
pub struct FakeNetwork {
    open: BTreeSet<(String, u16)>,
    resolvable: BTreeSet<String>,
    http_status: Option<u16>,
    pub http_log: Mutex<Vec<String>>,
    pub tcp_log: Mutex<Vec<String>>,
}

impl FakeNetwork {
    pub fn open(mut self, host: &str, port: u16) -> Self {
        self.open.insert((host.to_string(), port));
        self
    }

    pub fn close(mut self, host: &str, port: u16) -> Self {
        self.open.remove(&(host.to_string(), port));
        self
    }

    /// Status returned by every HTTP GET. Without one, GETs fail to connect.
    pub fn status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn resolvable(mut self, host: &str) -> Self {
        self.resolvable.insert(host.to_string());
        self
    }

    pub fn http_requests(&self) -> Vec<String> {
        self.http_log.lock().unwrap().clone()
    }

    pub fn tcp_attempts(&self) -> Vec<String> {
        self.tcp_log.lock().unwrap().clone()
    }
}

impl NetworkProbe for FakeNetwork {
    fn tcp_connect(&self, host: &str, port: u16) -> Result<(), String> {
        self.tcp_log.lock().unwrap().push(format!("{}:{}", host, port));
        if self.open.contains(&(host.to_string(), port)) {
            Ok(())
        } else {
            Err("Connection refused".to_string())
        }
    }

    fn http_get(&self, url: &Url) -> Result<u16, String> {
        self.http_log.lock().unwrap().push(url.to_string());
        self.http_status.ok_or_else(|| "Connection failed: refused".to_string())
    }

    fn resolves(&self, host: &str) -> bool {
        self.resolvable.contains(host)
    }
}
