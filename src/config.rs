//! Configuration handling.
//!
//! Every field has a default, so a missing config file is not an error.
//! `OPENAI_API_KEY` and `LINUX_HELPER_CATALOG` override the file.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::*;
use crate::error::{Error, Result};

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_CATALOG: &str = "LINUX_HELPER_CATALOG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub bookmarks: BookmarksConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog snapshot written by `seed`. When absent the built-in seed is used.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

fn default_catalog_path() -> PathBuf {
    data_dir().join(CATALOG_PATH)
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_history_path() -> PathBuf {
    data_dir().join(HISTORY_PATH)
}

fn default_max_items() -> usize {
    MAX_HISTORY_ITEMS
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: default_history_path(),
            max_items: default_max_items(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarksConfig {
    #[serde(default = "default_bookmarks_path")]
    pub path: PathBuf,
}

fn default_bookmarks_path() -> PathBuf {
    data_dir().join(BOOKMARKS_PATH)
}

impl Default for BookmarksConfig {
    fn default() -> Self {
        Self {
            path: default_bookmarks_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Usually supplied through `OPENAI_API_KEY` rather than the file.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    AI_DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    AI_DEFAULT_MODEL.to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Per-user data directory, falling back to the working directory.
pub fn data_dir() -> PathBuf {
    ProjectDirs::from("", "", "linux-helper")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "linux-helper").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load `path` (or the default location), then apply environment overrides.
    /// An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_toml(&std::fs::read_to_string(p)?)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_toml(&std::fs::read_to_string(&p)?)?,
                _ => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Log where data lives. Call after the subscriber is installed; the
    /// API key itself is never logged.
    pub fn log_summary(&self) {
        debug!(
            catalog = %self.catalog.path.display(),
            history = %self.history.path.display(),
            bookmarks = %self.bookmarks.path.display(),
            ai_configured = self.ai.api_key.is_some(),
            "configuration loaded"
        );
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var(ENV_API_KEY).filter(|k| !k.is_empty()) {
            self.ai.api_key = Some(key);
        }
        if let Some(path) = var(ENV_CATALOG).filter(|p| !p.is_empty()) {
            self.catalog.path = PathBuf::from(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.history.max_items, MAX_HISTORY_ITEMS);
        assert_eq!(cfg.ai.model, AI_DEFAULT_MODEL);
        assert!(cfg.ai.api_key.is_none());
        assert!(cfg.catalog.path.ends_with(CATALOG_PATH));
    }

    #[test]
    fn partial_sections() {
        let cfg = Config::from_toml(
            r#"
            [server]
            port = 8080

            [history]
            max_items = 3

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, DEFAULT_HOST);
        assert_eq!(cfg.history.max_items, 3);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = Config::from_toml("[server\nport = 1").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn env_overrides() {
        let mut cfg = Config::default();
        cfg.apply_env(|key| match key {
            ENV_API_KEY => Some("sk-test".to_string()),
            ENV_CATALOG => Some("/tmp/cat.json".to_string()),
            _ => None,
        });
        assert_eq!(cfg.ai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(cfg.catalog.path, PathBuf::from("/tmp/cat.json"));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.apply_env(|_| Some(String::new()));
        assert!(cfg.ai.api_key.is_none());
    }

    #[test]
    fn explicit_missing_file_fails() {
        assert!(Config::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn summary_is_logged_without_the_key() {
        let mut cfg = Config::default();
        cfg.apply_env(|key| (key == ENV_API_KEY).then(|| "sk-secret".to_string()));

        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || cfg.log_summary());

        let logged = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("configuration loaded"));
        assert!(logged.contains("ai_configured=true"));
        assert!(!logged.contains("sk-secret"));
    }
}
