use async_trait::async_trait;
use cinescope_models::{
    Credits, GenreList, Movie, MovieDetail, MultiSearchResult, Paged, Person, PersonCredits,
    TvDetail, TvShow, Videos,
};
use crate::error::ApiError;

/// Trending aggregation window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Read-only catalog operations. Every call is one best-effort request.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    // Movie lists
    async fn popular_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError>;
    async fn top_rated_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError>;
    async fn now_playing_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError>;
    async fn upcoming_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError>;
    async fn trending_movies(&self, window: TimeWindow, page: u32) -> Result<Paged<Movie>, ApiError>;

    // Movie detail
    async fn movie_details(&self, id: i64) -> Result<MovieDetail, ApiError>;
    async fn movie_credits(&self, id: i64) -> Result<Credits, ApiError>;
    async fn movie_videos(&self, id: i64) -> Result<Videos, ApiError>;
    async fn similar_movies(&self, id: i64, page: u32) -> Result<Paged<Movie>, ApiError>;
    async fn recommended_movies(&self, id: i64, page: u32) -> Result<Paged<Movie>, ApiError>;

    // Series
    async fn popular_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError>;
    async fn top_rated_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError>;
    async fn on_the_air_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError>;
    async fn airing_today_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError>;
    async fn tv_details(&self, id: i64) -> Result<TvDetail, ApiError>;
    async fn tv_credits(&self, id: i64) -> Result<Credits, ApiError>;
    async fn tv_videos(&self, id: i64) -> Result<Videos, ApiError>;
    async fn similar_tv(&self, id: i64, page: u32) -> Result<Paged<TvShow>, ApiError>;

    // Genres
    async fn movie_genres(&self) -> Result<GenreList, ApiError>;
    async fn tv_genres(&self) -> Result<GenreList, ApiError>;
    async fn discover_movies_by_genre(&self, genre_id: u32, page: u32) -> Result<Paged<Movie>, ApiError>;

    // Search
    async fn search_multi(&self, query: &str, page: u32) -> Result<Paged<MultiSearchResult>, ApiError>;
    async fn search_movies(&self, query: &str, page: u32) -> Result<Paged<Movie>, ApiError>;

    // People
    async fn person_details(&self, id: i64) -> Result<Person, ApiError>;
    async fn person_movie_credits(&self, id: i64) -> Result<PersonCredits, ApiError>;
}
