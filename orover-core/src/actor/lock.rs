//! Single-instance lock (§4.5 Initialize step).
//!
//! `oroverlib.get_lock()` in the retrieved original is a no-op stub; it
//! names the intent but never implements it. This resolves that open
//! question with a real lock: an atomically-created PID file per actor
//! name, removed on drop.

// Layer 1: Standard library imports
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::ActorError;

/// Holds the lock for as long as it is alive; the lock file is removed on
/// drop so a crashed actor does not wedge its next restart.
pub struct ActorLock {
    path: PathBuf,
}

impl ActorLock {
    /// Acquire the lock for `actor_name` under `dir` (typically `/tmp`).
    /// Fails with [`ActorError::AlreadyRunning`] if another live instance
    /// holds it.
    pub fn acquire(dir: &Path, actor_name: &str) -> Result<Self, ActorError> {
        let path = dir.join(format!("orover-{actor_name}.lock"));
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                io::ErrorKind::AlreadyExists => ActorError::AlreadyRunning(actor_name.to_string()),
                _ => ActorError::LockFailed {
                    name: actor_name.to_string(),
                    source,
                },
            })?;
        let _ = write!(file, "{}", std::process::id());
        Ok(Self { path })
    }
}

impl Drop for ActorLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_rejected_while_first_is_held() {
        let dir = std::env::temp_dir();
        let name = "lock-test-actor";
        let _ = fs::remove_file(dir.join(format!("orover-{name}.lock")));

        let first = ActorLock::acquire(&dir, name).unwrap();
        let second = ActorLock::acquire(&dir, name);
        assert!(matches!(second, Err(ActorError::AlreadyRunning(_))));

        drop(first);
        let third = ActorLock::acquire(&dir, name);
        assert!(third.is_ok());
    }
}
