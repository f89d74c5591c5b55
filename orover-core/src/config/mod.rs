//! Sectioned INI configuration loader (§4.3).
//!
//! No crate in the corpus this workspace is descended from reads an INI-style
//! file (the teacher's own `SystemConfig` is a pure in-memory builder, never
//! file-backed); this module introduces the `ini` crate for that one
//! genuinely new concern, matching the `configparser` semantics of the
//! original source's `readConfig`/`get(section, key, fallback=...)` pattern
//! faithfully rather than inventing a new format.

pub mod error;

// Layer 1: Standard library imports
use std::path::{Path, PathBuf};

// Layer 2: Third-party crate imports
use ini::Ini;

// Layer 3: Internal module imports
pub use error::ConfigError;

/// A loaded, sectioned configuration file with `fallback`-style typed
/// accessors: a missing section or key returns the fallback, it never
/// raises (mirrors `configparser.get(section, key, fallback=...)`).
#[derive(Debug, Clone)]
pub struct Config {
    ini: Ini,
    path: PathBuf,
}

impl Config {
    /// Resolve the active config path: the `--config` argument if given,
    /// otherwise `config.ini` in the working directory.
    pub fn resolve_path(cli_arg: Option<PathBuf>) -> PathBuf {
        cli_arg.unwrap_or_else(|| PathBuf::from("config.ini"))
    }

    /// Load and parse the file at `path`. Fails fast (no config is ever
    /// synthesized) if the file is absent or malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            ini,
            path: path.to_path_buf(),
        })
    }

    /// The file this configuration was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw string lookup; `None` if the section or key is absent.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.ini.section(Some(section)).and_then(|s| s.get(key))
    }

    /// String lookup with fallback.
    pub fn get_string(&self, section: &str, key: &str, fallback: &str) -> String {
        self.get(section, key).unwrap_or(fallback).to_string()
    }

    /// Integer lookup with fallback; an unparsable value also falls back
    /// (configparser would raise, but the fabric never raises on
    /// configuration content beyond the fatal file-level errors of §7).
    pub fn get_i64(&self, section: &str, key: &str, fallback: i64) -> i64 {
        self.get(section, key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(fallback)
    }

    /// Whether the `[scripts]` section exists and names at least one
    /// process; the one precondition the supervisor checks at start (§4.6).
    pub fn validate_scripts_section(&self) -> Result<(), ConfigError> {
        let section = self.ini.section(Some("scripts")).ok_or(ConfigError::MissingScripts)?;
        if section.iter().next().is_none() {
            return Err(ConfigError::EmptyScripts);
        }
        Ok(())
    }

    /// `(name, command)` pairs from `[scripts]`, in the file's declared
    /// order, skipping entries whose command is blank (§4.6: "if command is
    /// empty skip the process").
    pub fn scripts(&self) -> Result<Vec<(String, String)>, ConfigError> {
        self.validate_scripts_section()?;
        let section = self
            .ini
            .section(Some("scripts"))
            .ok_or(ConfigError::MissingScripts)?;
        Ok(section
            .iter()
            .filter(|(_, command)| !command.trim().is_empty())
            .map(|(name, command)| (name.to_string(), command.to_string()))
            .collect())
    }

    /// Resolve the invoking actor's name: the `scripts` key whose command's
    /// basename matches `invoked_command`, or (falling back) the stem of
    /// `invoked_command` up to its first `.` — matching
    /// `oroverlib.getmodulename`.
    pub fn derive_actor_name(&self, invoked_command: &str) -> String {
        if let Ok(scripts) = self.scripts() {
            let invoked_basename = Path::new(invoked_command)
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| invoked_command.to_string());
            for (name, command) in &scripts {
                let command_basename = command
                    .split_whitespace()
                    .last()
                    .and_then(|c| Path::new(c).file_name())
                    .map(|s| s.to_string_lossy().into_owned());
                if command_basename.as_deref() == Some(invoked_basename.as_str()) {
                    return name.clone();
                }
            }
        }
        invoked_command
            .split('.')
            .next()
            .unwrap_or(invoked_command)
            .to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_missing_file_fails_fast() {
        let err = Config::load("/nonexistent/config.ini").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn fallback_used_for_missing_key() {
        let file = write_temp("[orover]\nloglevel=DEBUG\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.get_string("orover", "loglevel", "INFO"), "DEBUG");
        assert_eq!(config.get_string("orover", "logfile", "orover.log"), "orover.log");
        assert_eq!(config.get_i64("orover", "heartbeat_interval", 0), 0);
    }

    #[test]
    fn validate_scripts_requires_section_and_content() {
        let file = write_temp("[orover]\nloglevel=DEBUG\n");
        let config = Config::load(file.path()).unwrap();
        assert!(matches!(
            config.validate_scripts_section(),
            Err(ConfigError::MissingScripts)
        ));

        let file = write_temp("[scripts]\n");
        let config = Config::load(file.path()).unwrap();
        assert!(matches!(
            config.validate_scripts_section(),
            Err(ConfigError::EmptyScripts)
        ));
    }

    #[test]
    fn scripts_skips_blank_commands_and_preserves_order() {
        let file = write_temp(
            "[scripts]\neventbus = eventbus.py\nlogserver = logserver.py\nunused = \nboss = boss.py\n",
        );
        let config = Config::load(file.path()).unwrap();
        let scripts = config.scripts().unwrap();
        assert_eq!(
            scripts,
            vec![
                ("eventbus".to_string(), "eventbus.py".to_string()),
                ("logserver".to_string(), "logserver.py".to_string()),
                ("boss".to_string(), "boss.py".to_string()),
            ]
        );
    }

    #[test]
    fn derive_actor_name_matches_scripts_entry() {
        let file = write_temp("[scripts]\nboss = /opt/orover/boss.py\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.derive_actor_name("boss.py"), "boss");
    }

    #[test]
    fn derive_actor_name_falls_back_to_stem() {
        let file = write_temp("[scripts]\nboss = boss.py\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.derive_actor_name("standalone.py"), "standalone");
    }
}
