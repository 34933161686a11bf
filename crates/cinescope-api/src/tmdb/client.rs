use crate::error::ApiError;
use crate::tmdb::api;
use crate::traits::{CatalogApi, TimeWindow};
use async_trait::async_trait;
use cinescope_config::{Config, CredentialStore};
use cinescope_models::{
    Credits, GenreList, Movie, MovieDetail, MultiSearchResult, Paged, Person, PersonCredits,
    TvDetail, TvShow, Videos,
};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: Url,
    api_key: String,
    language: String,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        Ok(Self {
            client: Arc::new(api::create_http_client(timeout)?),
            base_url: api::parse_base_url(base_url)?,
            api_key,
            language: language.into(),
        })
    }

    /// Build a client from `config.toml` settings and the stored API key
    pub fn from_config(config: &Config, credentials: &CredentialStore) -> Result<Self, ApiError> {
        let api_key = credentials.get_tmdb_api_key().ok_or(ApiError::MissingApiKey)?;
        let client = Self::new(
            &config.api.base_url,
            api_key,
            config.api.language.clone(),
            Duration::from_secs(config.api.timeout_secs),
        )?;
        info!(
            base_url = %client.base_url,
            language = %client.language,
            timeout_secs = config.api.timeout_secs,
            "Catalog client ready"
        );
        Ok(client)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T, ApiError> {
        let url = api::build_url(&self.base_url, path, &self.api_key, &self.language, params)?;
        api::get_json(&self.client, url, path).await
    }

    async fn get_page<T: DeserializeOwned>(&self, path: &str, page: u32) -> Result<Paged<T>, ApiError> {
        self.get(path, &[("page", page.to_string())]).await
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn popular_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.get_page("movie/popular", page).await
    }

    async fn top_rated_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.get_page("movie/top_rated", page).await
    }

    async fn now_playing_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.get_page("movie/now_playing", page).await
    }

    async fn upcoming_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.get_page("movie/upcoming", page).await
    }

    async fn trending_movies(&self, window: TimeWindow, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.get_page(&format!("trending/movie/{}", window.as_str()), page).await
    }

    async fn movie_details(&self, id: i64) -> Result<MovieDetail, ApiError> {
        self.get(&format!("movie/{}", id), &[]).await
    }

    async fn movie_credits(&self, id: i64) -> Result<Credits, ApiError> {
        self.get(&format!("movie/{}/credits", id), &[]).await
    }

    async fn movie_videos(&self, id: i64) -> Result<Videos, ApiError> {
        self.get(&format!("movie/{}/videos", id), &[]).await
    }

    async fn similar_movies(&self, id: i64, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.get_page(&format!("movie/{}/similar", id), page).await
    }

    async fn recommended_movies(&self, id: i64, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.get_page(&format!("movie/{}/recommendations", id), page).await
    }

    async fn popular_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.get_page("tv/popular", page).await
    }

    async fn top_rated_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.get_page("tv/top_rated", page).await
    }

    async fn on_the_air_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.get_page("tv/on_the_air", page).await
    }

    async fn airing_today_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.get_page("tv/airing_today", page).await
    }

    async fn tv_details(&self, id: i64) -> Result<TvDetail, ApiError> {
        self.get(&format!("tv/{}", id), &[]).await
    }

    async fn tv_credits(&self, id: i64) -> Result<Credits, ApiError> {
        self.get(&format!("tv/{}/credits", id), &[]).await
    }

    async fn tv_videos(&self, id: i64) -> Result<Videos, ApiError> {
        self.get(&format!("tv/{}/videos", id), &[]).await
    }

    async fn similar_tv(&self, id: i64, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.get_page(&format!("tv/{}/similar", id), page).await
    }

    async fn movie_genres(&self) -> Result<GenreList, ApiError> {
        self.get("genre/movie/list", &[]).await
    }

    async fn tv_genres(&self) -> Result<GenreList, ApiError> {
        self.get("genre/tv/list", &[]).await
    }

    async fn discover_movies_by_genre(&self, genre_id: u32, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.get(
            "discover/movie",
            &[
                ("with_genres", genre_id.to_string()),
                ("sort_by", "popularity.desc".to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn search_multi(&self, query: &str, page: u32) -> Result<Paged<MultiSearchResult>, ApiError> {
        self.get(
            "search/multi",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn search_movies(&self, query: &str, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.get(
            "search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn person_details(&self, id: i64) -> Result<Person, ApiError> {
        self.get(&format!("person/{}", id), &[]).await
    }

    async fn person_movie_credits(&self, id: i64) -> Result<PersonCredits, ApiError> {
        self.get(&format!("person/{}/movie_credits", id), &[]).await
    }
}
