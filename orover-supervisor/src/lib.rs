//! The oRover process supervisor (§4.6): launches every process named in
//! `[scripts]` in file order and, on shutdown, terminates them in reverse
//! start order so that dependents (e.g. actors publishing onto the bus)
//! stop before the services they depend on (e.g. the event bus itself).
//!
//! This deliberately does not carry over a supervision tree, restart
//! policies, or health monitoring: the original launcher starts its
//! children once and waits for a termination signal, and §9 scopes this
//! component down to exactly that.

pub mod error;
pub mod process;

use orover_core::config::Config;
use tracing::warn;

pub use error::SupervisorError;
pub use process::{ChildProcess, GRACE_PERIOD};

/// Launches and owns the configured child processes, in start order.
pub struct Supervisor {
    children: Vec<ChildProcess>,
}

impl Supervisor {
    /// Validate `[scripts]`, then spawn each non-blank entry in file order
    /// as `{python_exec} {command} --config={config_path}`.
    ///
    /// A single child failing to spawn does not abort the rest: it is
    /// logged and skipped, mirroring the best-effort posture the rest of
    /// the fabric takes toward individual component failures.
    pub fn start(
        config: &Config,
        python_exec: &str,
        config_path: &str,
    ) -> Result<Self, SupervisorError> {
        config.validate_scripts_section()?;

        let mut children = Vec::new();
        for (name, command) in config.scripts()? {
            match ChildProcess::spawn(&name, python_exec, &command, config_path) {
                Ok(child) => children.push(child),
                Err(e) => warn!(error = %e, "skipping process that failed to start"),
            }
        }

        Ok(Self { children })
    }

    /// Names of the processes currently tracked, in start order.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(ChildProcess::name).collect()
    }

    /// Terminate every child in reverse start order, waiting up to
    /// [`GRACE_PERIOD`] per child before escalating to SIGKILL.
    pub async fn shutdown(self) {
        for child in self.children.into_iter().rev() {
            child.shutdown().await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn start_rejects_missing_scripts_section() {
        let file = write_temp("[orover]\nloglevel=DEBUG\n");
        let config = Config::load(file.path()).unwrap();
        let result = Supervisor::start(&config, "/bin/true", "config.ini");
        assert!(matches!(result, Err(SupervisorError::Config(_))));
    }

    #[tokio::test]
    async fn start_spawns_every_entry_in_order() {
        let file = write_temp("[scripts]\nfirst = a\nsecond = b\n");
        let config = Config::load(file.path()).unwrap();
        let supervisor = Supervisor::start(&config, "/bin/true", "config.ini").unwrap();
        assert_eq!(supervisor.child_names(), vec!["first", "second"]);
        supervisor.shutdown().await;
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn shutdown_terminates_children_in_reverse_start_order() {
        // §8 "Supervisor ordering": children started first/second/third must
        // be signalled for termination third, second, first. Each child is a
        // tiny shell script that traps SIGTERM and appends its own name to a
        // shared log, so the recorded order is observable after shutdown.
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("order.log");

        let mut scripts_section = String::from("[scripts]\n");
        for name in ["first", "second", "third"] {
            let script_path = dir.path().join(format!("{name}.sh"));
            let mut script = std::fs::File::create(&script_path).unwrap();
            writeln!(
                script,
                "trap 'echo {name} >> {log}; exit 0' TERM\nwhile true; do sleep 0.05; done\n",
                log = log_path.display(),
            )
            .unwrap();
            scripts_section.push_str(&format!("{name} = {}\n", script_path.display()));
        }

        let config_file = write_temp(&scripts_section);
        let config = Config::load(config_file.path()).unwrap();
        let supervisor = Supervisor::start(&config, "/bin/sh", "config.ini").unwrap();
        assert_eq!(supervisor.child_names(), vec!["first", "second", "third"]);

        // Let every child install its trap before shutdown starts signalling.
        tokio::time::sleep(Duration::from_millis(200)).await;
        supervisor.shutdown().await;

        let recorded = std::fs::read_to_string(&log_path).unwrap();
        let order: Vec<&str> = recorded.lines().collect();
        assert_eq!(order, vec!["third", "second", "first"]);
    }
}
