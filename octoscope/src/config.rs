//! User configuration for octoscope.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/octoscope/config.toml`. Every
//! key is optional; a missing file means all defaults.
//!
//! ```toml
//! theme = "dark"
//! log_level = "debug"
//! debounce_ms = 250
//! undo_window_secs = 5
//! toast_secs = 4
//! fetch_timeout_ms = 10000   # 0 disables the client-side timeout
//! data_dir = "/tmp/octoscope"
//!
//! [mock]
//! search_latency_ms = 300
//! fetch_latency_ms = 800
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Why the config file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Simulated service latencies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MockConfig {
    pub search_latency_ms: u64,
    pub fetch_latency_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            search_latency_ms: 300,
            fetch_latency_ms: 800,
        }
    }
}

/// Everything the user can tune.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub theme: String,
    pub log_level: String,
    pub debounce_ms: u64,
    pub undo_window_secs: u64,
    pub toast_secs: u64,
    pub fetch_timeout_ms: u64,
    pub data_dir: Option<PathBuf>,
    pub mock: MockConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            log_level: "info".to_owned(),
            debounce_ms: 300,
            undo_window_secs: 5,
            toast_secs: 4,
            fetch_timeout_ms: 10_000,
            data_dir: None,
            mock: MockConfig::default(),
        }
    }
}

impl Config {
    /// Loads the config from its default location.
    ///
    /// A missing file is not an error and yields [`Config::default`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    /// Loads the config from `path`. See [`Config::load`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_owned(),
                    source,
                })
            }
        };
        Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    fn parse(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn undo_window(&self) -> Duration {
        Duration::from_secs(self.undo_window_secs)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }

    /// `None` when the timeout is disabled with `fetch_timeout_ms = 0`.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        (self.fetch_timeout_ms > 0).then(|| Duration::from_millis(self.fetch_timeout_ms))
    }

    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.mock.search_latency_ms)
    }

    pub fn fetch_latency(&self) -> Duration {
        Duration::from_millis(self.mock.fetch_latency_ms)
    }

    /// Directory holding the database and the log file.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

/// Returns the path to the octoscope config file.
///
/// Prefers `$XDG_CONFIG_HOME/octoscope/config.toml`; falls back to
/// `~/.config/octoscope/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
        .join("octoscope")
        .join("config.toml")
}

/// `$XDG_DATA_HOME/octoscope`, falling back to `~/.local/share/octoscope`.
fn default_data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share").join("octoscope")
}

fn xdg_dir(var: &str, home_relative: &str) -> PathBuf {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(home_relative)))
        .unwrap_or_else(|| PathBuf::from(home_relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::parse(
            "theme = \"dark\"\nfetch_timeout_ms = 0\n[mock]\nfetch_latency_ms = 50\n",
        )
        .unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.fetch_timeout(), None);
        assert_eq!(config.fetch_latency(), Duration::from_millis(50));
        assert_eq!(config.search_latency(), Duration::from_millis(300));
        assert_eq!(config.debounce(), Duration::from_millis(300));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("colour = \"red\"").is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = Path::new("/definitely/not/here/octoscope.toml");
        assert_eq!(Config::load_from(path).unwrap(), Config::default());
    }

    #[test]
    fn data_dir_override_wins() {
        let config = Config::parse("data_dir = \"/tmp/octo\"").unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/octo"));
    }
}
