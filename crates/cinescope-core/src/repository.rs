//! Per-feature facades over the catalog client and the watch-list store.
//!
//! Each method is exactly one remote or local call. Errors are passed through
//! untouched; translating them for display is the controllers' job.

use async_trait::async_trait;
use cinescope_api::{ApiError, CatalogApi, TimeWindow};
use cinescope_models::{
    Credits, GenreList, Movie, MovieDetail, MultiSearchResult, Paged, Person, PersonCredits,
    TvDetail, TvShow, Videos, WatchListEntry,
};
use futures::stream::BoxStream;
use std::sync::Arc;
use crate::error::StoreError;
use crate::paging::{PageSource, PagedAdapter};
use crate::store::WatchListStore;

/// Movie lists that can be scrolled page by page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieList {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
    Trending(TimeWindow),
    Similar(i64),
    Recommended(i64),
    Genre(u32),
    Search(String),
}

impl std::fmt::Display for MovieList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieList::Popular => write!(f, "popular movies"),
            MovieList::TopRated => write!(f, "top rated movies"),
            MovieList::NowPlaying => write!(f, "now playing movies"),
            MovieList::Upcoming => write!(f, "upcoming movies"),
            MovieList::Trending(window) => write!(f, "trending movies ({})", window.as_str()),
            MovieList::Similar(id) => write!(f, "movies similar to {}", id),
            MovieList::Recommended(id) => write!(f, "recommendations for {}", id),
            MovieList::Genre(id) => write!(f, "genre {} movies", id),
            MovieList::Search(query) => write!(f, "movie search '{}'", query),
        }
    }
}

pub struct MovieListSource {
    api: Arc<dyn CatalogApi>,
    list: MovieList,
}

#[async_trait]
impl PageSource for MovieListSource {
    type Item = Movie;

    fn describe(&self) -> String {
        self.list.to_string()
    }

    async fn fetch(&self, page: u32) -> Result<Paged<Movie>, ApiError> {
        match &self.list {
            MovieList::Popular => self.api.popular_movies(page).await,
            MovieList::TopRated => self.api.top_rated_movies(page).await,
            MovieList::NowPlaying => self.api.now_playing_movies(page).await,
            MovieList::Upcoming => self.api.upcoming_movies(page).await,
            MovieList::Trending(window) => self.api.trending_movies(*window, page).await,
            MovieList::Similar(id) => self.api.similar_movies(*id, page).await,
            MovieList::Recommended(id) => self.api.recommended_movies(*id, page).await,
            MovieList::Genre(genre_id) => self.api.discover_movies_by_genre(*genre_id, page).await,
            MovieList::Search(query) => self.api.search_movies(query, page).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TvList {
    Popular,
    TopRated,
    OnTheAir,
    AiringToday,
    Similar(i64),
}

impl std::fmt::Display for TvList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TvList::Popular => write!(f, "popular series"),
            TvList::TopRated => write!(f, "top rated series"),
            TvList::OnTheAir => write!(f, "series on the air"),
            TvList::AiringToday => write!(f, "series airing today"),
            TvList::Similar(id) => write!(f, "series similar to {}", id),
        }
    }
}

pub struct TvListSource {
    api: Arc<dyn CatalogApi>,
    list: TvList,
}

#[async_trait]
impl PageSource for TvListSource {
    type Item = TvShow;

    fn describe(&self) -> String {
        self.list.to_string()
    }

    async fn fetch(&self, page: u32) -> Result<Paged<TvShow>, ApiError> {
        match &self.list {
            TvList::Popular => self.api.popular_tv(page).await,
            TvList::TopRated => self.api.top_rated_tv(page).await,
            TvList::OnTheAir => self.api.on_the_air_tv(page).await,
            TvList::AiringToday => self.api.airing_today_tv(page).await,
            TvList::Similar(id) => self.api.similar_tv(*id, page).await,
        }
    }
}

#[derive(Clone)]
pub struct MovieRepository {
    api: Arc<dyn CatalogApi>,
}

impl MovieRepository {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    pub async fn list_page(&self, list: &MovieList, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.list_source(list.clone()).fetch(page).await
    }

    pub fn list_source(&self, list: MovieList) -> MovieListSource {
        MovieListSource {
            api: Arc::clone(&self.api),
            list,
        }
    }

    pub fn paged(&self, list: MovieList) -> PagedAdapter<MovieListSource> {
        PagedAdapter::new(self.list_source(list))
    }

    pub async fn details(&self, id: i64) -> Result<MovieDetail, ApiError> {
        self.api.movie_details(id).await
    }

    pub async fn credits(&self, id: i64) -> Result<Credits, ApiError> {
        self.api.movie_credits(id).await
    }

    pub async fn videos(&self, id: i64) -> Result<Videos, ApiError> {
        self.api.movie_videos(id).await
    }
}

#[derive(Clone)]
pub struct TvRepository {
    api: Arc<dyn CatalogApi>,
}

impl TvRepository {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    pub async fn list_page(&self, list: &TvList, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.list_source(list.clone()).fetch(page).await
    }

    pub fn list_source(&self, list: TvList) -> TvListSource {
        TvListSource {
            api: Arc::clone(&self.api),
            list,
        }
    }

    pub fn paged(&self, list: TvList) -> PagedAdapter<TvListSource> {
        PagedAdapter::new(self.list_source(list))
    }

    pub async fn details(&self, id: i64) -> Result<TvDetail, ApiError> {
        self.api.tv_details(id).await
    }

    pub async fn credits(&self, id: i64) -> Result<Credits, ApiError> {
        self.api.tv_credits(id).await
    }

    pub async fn videos(&self, id: i64) -> Result<Videos, ApiError> {
        self.api.tv_videos(id).await
    }
}

#[derive(Clone)]
pub struct GenreRepository {
    api: Arc<dyn CatalogApi>,
}

impl GenreRepository {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    pub async fn movie_genres(&self) -> Result<GenreList, ApiError> {
        self.api.movie_genres().await
    }

    pub async fn tv_genres(&self) -> Result<GenreList, ApiError> {
        self.api.tv_genres().await
    }

    pub fn discover(&self, genre_id: u32) -> MovieListSource {
        MovieListSource {
            api: Arc::clone(&self.api),
            list: MovieList::Genre(genre_id),
        }
    }
}

#[derive(Clone)]
pub struct SearchRepository {
    api: Arc<dyn CatalogApi>,
}

impl SearchRepository {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    pub async fn multi(&self, query: &str, page: u32) -> Result<Paged<MultiSearchResult>, ApiError> {
        self.api.search_multi(query, page).await
    }

    /// Movie-only search, scrollable page by page
    pub fn paged(&self, query: &str) -> PagedAdapter<MovieListSource> {
        PagedAdapter::new(MovieListSource {
            api: self.api.clone(),
            list: MovieList::Search(query.trim().to_string()),
        })
    }
}

#[derive(Clone)]
pub struct PersonRepository {
    api: Arc<dyn CatalogApi>,
}

impl PersonRepository {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    pub async fn details(&self, id: i64) -> Result<Person, ApiError> {
        self.api.person_details(id).await
    }

    pub async fn movie_credits(&self, id: i64) -> Result<PersonCredits, ApiError> {
        self.api.person_movie_credits(id).await
    }
}

#[derive(Clone)]
pub struct WatchListRepository {
    store: WatchListStore,
}

impl WatchListRepository {
    pub fn new(store: WatchListStore) -> Self {
        Self { store }
    }

    pub async fn insert(&self, entry: &WatchListEntry) -> Result<(), StoreError> {
        self.store.insert(entry).await
    }

    pub async fn remove(&self, id: i64) -> Result<(), StoreError> {
        self.store.remove(id).await
    }

    pub async fn exists(&self, id: i64) -> Result<i64, StoreError> {
        self.store.exists(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<WatchListEntry>, StoreError> {
        self.store.list_all().await
    }

    pub fn observe_all(&self) -> BoxStream<'static, Result<Vec<WatchListEntry>, StoreError>> {
        self.store.observe_all()
    }

    pub async fn clear(&self) -> Result<u64, StoreError> {
        self.store.clear().await
    }

    pub fn refresh(&self) {
        self.store.refresh()
    }
}

/// Every repository wired to one catalog client and one store
#[derive(Clone)]
pub struct Repositories {
    pub movies: MovieRepository,
    pub tv: TvRepository,
    pub genres: GenreRepository,
    pub search: SearchRepository,
    pub people: PersonRepository,
    pub watch_list: WatchListRepository,
}

impl Repositories {
    pub fn new(api: Arc<dyn CatalogApi>, store: WatchListStore) -> Self {
        Self {
            movies: MovieRepository::new(Arc::clone(&api)),
            tv: TvRepository::new(Arc::clone(&api)),
            genres: GenreRepository::new(Arc::clone(&api)),
            search: SearchRepository::new(Arc::clone(&api)),
            people: PersonRepository::new(api),
            watch_list: WatchListRepository::new(store),
        }
    }
}
