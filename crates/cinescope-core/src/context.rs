//! Wiring from configuration to repositories and controllers.

use anyhow::{Context, Result};
use cinescope_api::{CatalogApi, TmdbClient};
use cinescope_config::{Config, CredentialStore, PathManager};
use std::sync::Arc;
use tracing::debug;
use crate::controller::{
    DetailBatchController, GenreController, HomeController, MovieDetailController,
    PersonController, SearchController, TvDetailController, WatchListController,
};
use crate::repository::Repositories;
use crate::store::WatchListStore;

/// Everything a front end needs to build screens
#[derive(Clone)]
pub struct AppContext {
    pub repos: Repositories,
    genre_page_limit: Option<u32>,
}

impl AppContext {
    /// Validate the configuration, build the catalog client and open the
    /// watch-list database.
    pub async fn open(config: &Config, credentials: &CredentialStore, paths: &PathManager) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        let client = TmdbClient::from_config(config, credentials)
            .context("Failed to create TMDB client")?;

        let db_path = config.database_path(paths);
        let store = WatchListStore::open(&db_path)
            .await
            .with_context(|| format!("Failed to open watch-list database at {}", db_path.display()))?;

        Ok(Self::new(Arc::new(client), store, config.paging.genre_page_limit))
    }

    /// Open only the watch-list database, for commands that never hit the network
    pub async fn open_store(config: &Config, paths: &PathManager) -> Result<WatchListStore> {
        let db_path = config.database_path(paths);
        WatchListStore::open(&db_path)
            .await
            .with_context(|| format!("Failed to open watch-list database at {}", db_path.display()))
    }

    pub fn new(api: Arc<dyn CatalogApi>, store: WatchListStore, genre_page_limit: Option<u32>) -> Self {
        debug!(?genre_page_limit, "Building application context");
        Self {
            repos: Repositories::new(api, store),
            genre_page_limit,
        }
    }

    pub fn home(&self) -> HomeController {
        HomeController::new(self.repos.movies.clone())
    }

    pub fn movie_detail(&self) -> MovieDetailController {
        MovieDetailController::new(self.repos.movies.clone(), self.repos.watch_list.clone())
    }

    pub fn tv_detail(&self) -> TvDetailController {
        TvDetailController::new(self.repos.tv.clone())
    }

    pub fn search(&self) -> SearchController {
        SearchController::new(self.repos.search.clone())
    }

    pub fn genres(&self) -> GenreController {
        GenreController::new(self.repos.genres.clone(), self.genre_page_limit)
    }

    pub fn person(&self) -> PersonController {
        PersonController::new(self.repos.people.clone())
    }

    /// Spawns the store observer, so call from inside the runtime
    pub fn watch_list(&self) -> WatchListController {
        WatchListController::new(self.repos.watch_list.clone())
    }

    pub fn detail_batch(&self) -> DetailBatchController {
        DetailBatchController::new(self.repos.movies.clone())
    }
}
