use crate::error::{PagekeepError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3000";

/// Configuration for pagekeep, stored in `<data-dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Quiet period after the last edit before content is flushed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Address the content API listens on
    #[serde(default = "default_server_addr")]
    pub server_addr: String,

    /// Base URL of the content API used for remote saves (e.g. "http://127.0.0.1:3000").
    /// Remote saves are skipped when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_server_addr() -> String {
    DEFAULT_SERVER_ADDR.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            remote_url: None,
        }
    }
}

impl AppConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PagekeepError::Io)?;
        let config: AppConfig =
            serde_json::from_str(&content).map_err(PagekeepError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PagekeepError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PagekeepError::Serialization)?;
        fs::write(config_path, content).map_err(PagekeepError::Io)?;
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Sets a key by its config-file name. Returns an error for unknown keys
    /// or unparsable values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "debounce_ms" => {
                self.debounce_ms = value
                    .parse()
                    .map_err(|_| PagekeepError::Api(format!("Invalid debounce_ms: {}", value)))?;
            }
            "server_addr" => self.server_addr = value.to_string(),
            "remote_url" => {
                self.remote_url = if value.is_empty() {
                    None
                } else {
                    Some(value.trim_end_matches('/').to_string())
                };
            }
            _ => return Err(PagekeepError::Api(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "debounce_ms" => Some(self.debounce_ms.to_string()),
            "server_addr" => Some(self.server_addr.clone()),
            "remote_url" => Some(self.remote_url.clone().unwrap_or_default()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.remote_url, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "debounce_ms": 50 }"#).unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.server_addr, DEFAULT_SERVER_ADDR);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.set("remote_url", "http://localhost:4000/").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = AppConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.remote_url.as_deref(), Some("http://localhost:4000"));
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = AppConfig::default();
        assert!(config.set("debounce_ms", "soon").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config.get("colour"), None);
    }
}
