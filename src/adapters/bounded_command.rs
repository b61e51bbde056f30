//! External command execution with a wall-clock bound.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
}

/// Run `program args...`, killing it once `timeout` elapses.
///
/// Returns `None` when the binary is missing, cannot be spawned, or times out.
pub fn run_bounded(program: &str, args: &[&str], timeout: Duration) -> Option<CommandOutput> {
    debug!(program, ?args, "Running external command");

    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            debug!(program, error = %e, "External command unavailable");
            return None;
        }
    };

    // Drain stdout on a separate thread so a chatty child cannot block on a full pipe.
    let reader = child.stdout.take().map(|mut stdout| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stdout.read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).into_owned()
        })
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                warn!(program, timeout_secs = timeout.as_secs(), "External command timed out");
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                warn!(program, error = %e, "Failed to wait for external command");
                let _ = child.kill();
                return None;
            }
        }
    };

    let stdout = reader.and_then(|handle| handle.join().ok()).unwrap_or_default();
    debug!(program, success = status.success(), "External command finished");
    Some(CommandOutput { success: status.success(), stdout })
}
