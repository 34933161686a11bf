pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{ApiConfig, Config, ConfigError, DatabaseConfig, LoggingConfig, PagingConfig, DEFAULT_TIMEOUT_SECS};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
