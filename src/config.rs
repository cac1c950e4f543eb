// Runtime configuration
//
// JSON file next to the executable, overridable per invocation. Every
// field has a default so a missing or partial file still yields a
// working setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DESCRIBE_ENDPOINT, DEFAULT_PREDICT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::error::{DayreelError, Result};

/// Where the two analysis servers live and how long to wait on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_predict_endpoint")]
    pub predict_endpoint: String,
    #[serde(default = "default_describe_endpoint")]
    pub describe_endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            predict_endpoint: default_predict_endpoint(),
            describe_endpoint: default_describe_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Where recorded footage is looked up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FootageConfig {
    /// Footage directory; the platform documents directory when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub footage: FootageConfig,
}

fn default_predict_endpoint() -> String {
    DEFAULT_PREDICT_ENDPOINT.to_string()
}

fn default_describe_endpoint() -> String {
    DEFAULT_DESCRIBE_ENDPOINT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Default config location, next to the binary.
pub fn config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join("config.json")))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}

/// Load configuration from `path`, or the default location when `None`.
///
/// A missing file yields defaults; a file that exists but does not parse
/// is an error rather than a silent fallback.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No config at {:?}, using defaults", path);
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&contents)
        .map_err(|e| DayreelError::Config(format!("{}: {}", path.display(), e)))
}

/// Write configuration as pretty JSON to `path`, or the default location
/// when `None`.
pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<()> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
    let contents = serde_json::to_string_pretty(cfg)?;
    std::fs::write(&path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.server.predict_endpoint, "http://127.0.0.1:5010/predict");
        assert_eq!(
            cfg.server.describe_endpoint,
            "http://127.0.0.1:5020/describe_video"
        );
        assert_eq!(cfg.server.request_timeout_secs, 300);
        assert!(cfg.footage.dir.is_none());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.server.request_timeout_secs, 300);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"server": {"predict_endpoint": "http://10.0.0.5:5010/predict"}}"#,
        )
        .unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.server.predict_endpoint, "http://10.0.0.5:5010/predict");
        assert_eq!(
            cfg.server.describe_endpoint,
            "http://127.0.0.1:5020/describe_video"
        );
        assert_eq!(cfg.server.request_timeout_secs, 300);
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, DayreelError::Config(_)));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        let mut cfg = Config::default();
        cfg.server.request_timeout_secs = 30;
        cfg.footage.dir = Some(PathBuf::from("/footage"));

        save_config(&cfg, Some(&path)).unwrap();
        let loaded = load_config(Some(&path)).unwrap();

        assert_eq!(loaded.server.request_timeout_secs, 30);
        assert_eq!(loaded.footage.dir, Some(PathBuf::from("/footage")));
    }
}
