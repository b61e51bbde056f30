//! Shared testing utilities for lcars CLI tests.

use assert_cmd::Command;
use std::env;
use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated project directory for CLI exercises.
///
/// Commands run with a `PATH` that holds no `docker` or `nvidia-smi`, so
/// container and GPU introspection always degrade to "no information".
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    bin_dir: PathBuf,
    original_cwd: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let bin_dir = root.path().join("bin");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        fs::create_dir_all(&bin_dir).expect("Failed to create empty bin directory");

        let original_cwd = env::current_dir().expect("Failed to get current directory");

        Self { root, work_dir, bin_dir, original_cwd }
    }

    /// Path to the project directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Directory holding the generated artifacts under the default configuration.
    pub fn docker_dir(&self) -> PathBuf {
        self.work_dir.join("docker")
    }

    /// Build a command for invoking the compiled `lcars` binary within the project.
    pub fn cli(&self) -> Command {
        self.cli_in(self.work_dir())
    }

    /// Build a command for invoking the compiled `lcars` binary within a custom directory.
    pub fn cli_in<P: AsRef<Path>>(&self, dir: P) -> Command {
        let mut cmd = Command::cargo_bin("lcars").expect("Failed to locate lcars binary");
        cmd.current_dir(dir.as_ref())
            .env("HOME", self.root.path())
            .env("PATH", &self.bin_dir)
            .env_remove("LCARS_LOG");
        cmd
    }

    /// Write `lcars.toml` in the project directory.
    pub fn write_config(&self, content: &str) {
        fs::write(self.work_dir.join("lcars.toml"), content).expect("Failed to write lcars.toml");
    }

    /// Read a generated artifact from the docker directory.
    pub fn read_artifact(&self, name: &str) -> String {
        fs::read_to_string(self.docker_dir().join(name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }

    /// Parse the persisted deployment configuration.
    pub fn deployment_config(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_artifact("deployment_config.json"))
            .expect("deployment_config.json should be valid JSON")
    }

    /// Run a closure with the process working directory set to the project.
    pub fn with_work_dir<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        env::set_current_dir(&self.work_dir).expect("Failed to enter work directory");
        let result = f();
        env::set_current_dir(&self.original_cwd).expect("Failed to restore working directory");
        result
    }
}

/// A localhost port with nothing listening on it.
#[allow(dead_code)]
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    listener.local_addr().expect("listener has an address").port()
}

/// A localhost listener that accepts TCP connections while alive.
#[allow(dead_code)]
pub fn open_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener.local_addr().expect("listener has an address").port();
    (listener, port)
}
