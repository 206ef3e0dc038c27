//! Huddle configuration.
//!
//! Loaded from `~/.huddle/config.toml`. Every key is optional; a missing file
//! means all defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "http://localhost:5001/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Huddle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Root of the backend REST API.
    pub api_base_url: String,

    /// Per-request timeout. Idea and roadmap generation can be slow.
    pub timeout_secs: u64,

    /// Bearer token, used when neither `--token` nor `HUDDLE_TOKEN` is set.
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token: None,
        }
    }
}

impl Config {
    /// Load config from `~/.huddle/config.toml`, falling back to defaults.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))?;

        if config.api_base_url.trim().is_empty() {
            return Err(format!("api-base-url is empty in {}", path.display()));
        }

        Ok(config)
    }

    /// The config file path: `~/.huddle/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".huddle").join("config.toml"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout-secs = 90\ntoken = \"abc\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_secs, 90);
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout-secs = \"soon\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.starts_with("invalid config"));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api-base-url = \"\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
