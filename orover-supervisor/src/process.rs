//! A single supervised child process: spawn, graceful terminate, and kill.

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use tokio::process::{Child, Command};
use tracing::{info, warn};

// Layer 3: Internal module imports
use crate::error::SupervisorError;

/// How long to wait for a SIGTERM'd child to exit before escalating to
/// SIGKILL. The original launcher gave no explicit figure; five seconds is
/// a reasonable default for a handful of lightweight actor processes on a
/// single board (§9 Open Question).
pub const GRACE_PERIOD: Duration = Duration::from_secs(5);

/// A named child process launched from a `[scripts]` entry.
pub struct ChildProcess {
    name: String,
    command: String,
    child: Child,
}

impl ChildProcess {
    /// Spawn `{python_exec} {command} --config={config_path}`, matching the
    /// original launcher's invocation of each configured script.
    pub fn spawn(
        name: &str,
        python_exec: &str,
        command: &str,
        config_path: &str,
    ) -> Result<Self, SupervisorError> {
        let child = Command::new(python_exec)
            .arg(command)
            .arg(format!("--config={config_path}"))
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| SupervisorError::SpawnFailed {
                name: name.to_string(),
                command: command.to_string(),
                source,
            })?;

        info!(name, command, pid = child.id(), "started process");

        Ok(Self {
            name: name.to_string(),
            command: command.to_string(),
            child,
        })
    }

    /// The `[scripts]` key identifying this process.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send SIGTERM, wait up to [`GRACE_PERIOD`], then SIGKILL if it hasn't
    /// exited. Best-effort: a failure to signal or reap is logged, not
    /// propagated, so one stuck child never blocks the rest of shutdown.
    pub async fn shutdown(mut self) {
        let pid = self.child.id();

        #[cfg(unix)]
        if let Some(pid) = pid {
            use nix::sys::signal::{self, Signal};
            use nix::unistd::Pid;
            if let Err(e) = signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                warn!(name = %self.name, error = %e, "failed to send SIGTERM");
            }
        }

        match tokio::time::timeout(GRACE_PERIOD, self.child.wait()).await {
            Ok(Ok(status)) => {
                info!(name = %self.name, command = %self.command, %status, "process exited");
            }
            Ok(Err(e)) => {
                warn!(name = %self.name, error = %e, "failed to reap process");
            }
            Err(_) => {
                warn!(name = %self.name, "process did not exit within grace period, killing");
                if let Err(e) = self.child.start_kill() {
                    warn!(name = %self.name, error = %e, "failed to send SIGKILL");
                }
                let _ = self.child.wait().await;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spawn_and_shutdown_a_short_lived_process() {
        // `/bin/true --config=...` exits immediately; exercises the happy
        // path of spawn + graceful wait without needing the grace period.
        let child = ChildProcess::spawn("truthy", "/bin/true", "", "config.ini").unwrap();
        assert_eq!(child.name(), "truthy");
        child.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_escalates_to_kill_after_grace_period() {
        // `sleep 100` ignores nothing in particular but outlives the test's
        // patience; shutdown() must still return once the grace period
        // elapses rather than waiting for natural exit.
        let child = ChildProcess::spawn("sleeper", "sleep", "100", "config.ini").unwrap();
        let start = std::time::Instant::now();
        child.shutdown().await;
        // Should not have waited for the full 100s sleep.
        assert!(start.elapsed() < Duration::from_secs(90));
    }

    #[test]
    fn spawn_failure_is_reported_not_panicked() {
        let result = ChildProcess::spawn(
            "missing",
            "/no/such/executable-orover-test",
            "arg",
            "config.ini",
        );
        assert!(matches!(result, Err(SupervisorError::SpawnFailed { .. })));
    }
}
