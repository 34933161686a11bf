use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Connect and whole-call timeout applied to every catalog request
pub const DEFAULT_TIMEOUT_SECS: u64 = 40;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Overrides the default `<data_dir>/cinescope.db`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PagingConfig {
    /// Optional ceiling on genre discover pages. `None` follows the provider's
    /// reported page count.
    #[serde(default)]
    pub genre_page_limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to the rotating file under the log directory instead of stderr
    #[serde(default)]
    pub to_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("api.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),
    #[error("api.image_base_url must start with http:// or https:// (got '{0}')")]
    InvalidImageBaseUrl(String),
    #[error("api.language must not be empty")]
    EmptyLanguage,
    #[error("api.timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("paging.genre_page_limit must be greater than zero when set")]
    ZeroPageLimit,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3/".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.api.base_url) {
            return Err(ConfigError::InvalidBaseUrl(self.api.base_url.clone()));
        }
        if !is_http_url(&self.api.image_base_url) {
            return Err(ConfigError::InvalidImageBaseUrl(self.api.image_base_url.clone()));
        }
        if self.api.language.trim().is_empty() {
            return Err(ConfigError::EmptyLanguage);
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.paging.genre_page_limit == Some(0) {
            return Err(ConfigError::ZeroPageLimit);
        }
        Ok(())
    }

    /// Database file, honoring the `database.path` override
    pub fn database_path(&self, paths: &crate::PathManager) -> PathBuf {
        self.database
            .path
            .clone()
            .unwrap_or_else(|| paths.database_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            api: ApiConfig {
                language: "de-DE".to_string(),
                ..ApiConfig::default()
            },
            database: DatabaseConfig {
                path: Some(PathBuf::from("/tmp/watch.db")),
            },
            paging: PagingConfig {
                genre_page_limit: Some(20),
            },
            logging: LoggingConfig::default(),
        };

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.api.language, "de-DE");
        assert_eq!(loaded.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(loaded.database.path, Some(PathBuf::from("/tmp/watch.db")));
        assert_eq!(loaded.paging.genre_page_limit, Some(20));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[api]\nlanguage = \"fr-FR\"\n").unwrap();
        assert_eq!(config.api.language, "fr-FR");
        assert_eq!(config.api.base_url, "https://api.themoviedb.org/3/");
        assert_eq!(config.paging.genre_page_limit, None);
        assert!(!config.logging.to_file);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.api.timeout_secs, 40);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.api.base_url = "ftp://example.org".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl("ftp://example.org".to_string()))
        );

        config.api.base_url = "http://localhost:8080/3/".to_string();
        config.api.timeout_secs = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));

        config.api.timeout_secs = 10;
        config.paging.genre_page_limit = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPageLimit));
    }

    #[test]
    fn test_database_path_override() {
        let paths = crate::PathManager::with_base(PathBuf::from("/base"));
        let mut config = Config::default();
        assert_eq!(config.database_path(&paths), PathBuf::from("/base/data/cinescope.db"));
        config.database.path = Some(PathBuf::from("/elsewhere/w.db"));
        assert_eq!(config.database_path(&paths), PathBuf::from("/elsewhere/w.db"));
    }
}
