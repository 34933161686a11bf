pub mod catalog;
pub mod clear;
pub mod config;
pub mod genre;
pub mod person;
pub mod prompts;
pub mod search;
pub mod watchlist;

use cinescope_config::{Config, CredentialStore, PathManager};
use cinescope_core::{AppContext, WatchListStore};
use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Paths and configuration shared by every command
pub struct Settings {
    pub paths: PathManager,
    pub config: Config,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {:#}", config_file.display(), e))?;
        Ok(Self { paths, config })
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        let credentials_file = self.paths.credentials_file();
        let mut store = CredentialStore::new(credentials_file.clone());
        store
            .load()
            .map_err(|e| eyre!("Failed to load credentials from {}: {:#}", credentials_file.display(), e))?;
        Ok(store)
    }

    /// Catalog client, repositories and the watch-list database
    pub async fn app(&self) -> Result<AppContext> {
        let credentials = self.credentials()?;
        if credentials.get_tmdb_api_key().is_none() {
            return Err(eyre!(
                "No TMDB API key configured. Run 'cinescope config set-key' first."
            ));
        }
        AppContext::open(&self.config, &credentials, &self.paths)
            .await
            .map_err(|e| eyre!("{:#}", e))
    }

    /// Only the watch-list database, for commands that stay offline
    pub async fn store(&self) -> Result<WatchListStore> {
        AppContext::open_store(&self.config, &self.paths)
            .await
            .map_err(|e| eyre!("{:#}", e))
    }
}
