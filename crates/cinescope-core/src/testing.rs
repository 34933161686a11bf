//! In-process catalog used by controller and repository tests.

use async_trait::async_trait;
use cinescope_api::{ApiError, CatalogApi, TimeWindow};
use cinescope_models::{
    CastMember, Credits, Genre, GenreList, MediaType, Movie, MovieDetail, MultiSearchResult,
    Paged, Person, PersonCastCredit, PersonCredits, TvDetail, TvShow, Video, Videos,
};
use std::collections::HashSet;
use std::sync::Mutex;

pub fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        original_title: None,
        overview: String::new(),
        release_date: Some("2021-06-01".to_string()),
        genre_ids: vec![28],
        vote_average: 7.0,
        vote_count: 100,
        popularity: id as f64,
        poster_path: Some(format!("/{}.jpg", id)),
        backdrop_path: None,
        adult: false,
        original_language: Some("en".to_string()),
    }
}

pub fn movie_detail(id: i64) -> MovieDetail {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("Movie {}", id),
        "release_date": "2019-10-04",
        "vote_average": 8.2,
        "runtime": 122,
        "poster_path": format!("/{}.jpg", id),
        "backdrop_path": null,
        "genres": [{"id": 18, "name": "Drama"}]
    }))
    .expect("valid movie detail fixture")
}

pub fn tv_show(id: i64, name: &str) -> TvShow {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "first_air_date": "2008-01-20",
        "poster_path": null,
        "backdrop_path": null
    }))
    .expect("valid tv fixture")
}

fn failure(endpoint: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        message: format!("{} exploded", endpoint),
    }
}

fn paged<T>(page: u32, results: Vec<T>, total_pages: u32) -> Paged<T> {
    Paged {
        page,
        total_results: results.len() as u64,
        results,
        total_pages,
    }
}

/// Scriptable catalog. Endpoints named in `failing` return a 500, ids in
/// `failing_ids` fail their detail lookups.
#[derive(Default)]
pub struct FakeCatalog {
    pub failing: HashSet<&'static str>,
    pub failing_ids: HashSet<i64>,
    pub search_results: Vec<MultiSearchResult>,
    pub total_pages: u32,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            total_pages: 500,
            ..Self::default()
        }
    }

    pub fn failing(mut self, endpoint: &'static str) -> Self {
        self.failing.insert(endpoint);
        self
    }

    pub fn failing_id(mut self, id: i64) -> Self {
        self.failing_ids.insert(id);
        self
    }

    pub fn with_search_results(mut self, results: Vec<MultiSearchResult>) -> Self {
        self.search_results = results;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str, arg: impl std::fmt::Display) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(format!("{}:{}", endpoint, arg));
        if self.failing.contains(endpoint) {
            return Err(failure(endpoint));
        }
        Ok(())
    }

    fn movie_page(&self, prefix: &str, page: u32) -> Paged<Movie> {
        let base = i64::from(page) * 100;
        let results = (0..20)
            .map(|i| movie(base + i, &format!("{} {}", prefix, base + i)))
            .collect();
        paged(page, results, self.total_pages)
    }

    fn tv_page(&self, prefix: &str, page: u32) -> Paged<TvShow> {
        let base = i64::from(page) * 100;
        let results = (0..5)
            .map(|i| tv_show(base + i, &format!("{} {}", prefix, base + i)))
            .collect();
        paged(page, results, self.total_pages)
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn popular_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.record("popular", page)?;
        Ok(self.movie_page("Popular", page))
    }

    async fn top_rated_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.record("top_rated", page)?;
        Ok(self.movie_page("Top", page))
    }

    async fn now_playing_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.record("now_playing", page)?;
        Ok(self.movie_page("Now", page))
    }

    async fn upcoming_movies(&self, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.record("upcoming", page)?;
        Ok(self.movie_page("Upcoming", page))
    }

    async fn trending_movies(&self, window: TimeWindow, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.record("trending", format!("{}/{}", window.as_str(), page))?;
        Ok(self.movie_page("Trending", page))
    }

    async fn movie_details(&self, id: i64) -> Result<MovieDetail, ApiError> {
        self.record("movie_details", id)?;
        if self.failing_ids.contains(&id) {
            return Err(ApiError::Status {
                status: 404,
                message: "The resource you requested could not be found.".to_string(),
            });
        }
        Ok(movie_detail(id))
    }

    async fn movie_credits(&self, id: i64) -> Result<Credits, ApiError> {
        self.record("movie_credits", id)?;
        Ok(Credits {
            id,
            cast: vec![CastMember {
                id: 1,
                name: "Joaquin Phoenix".to_string(),
                character: Some("Arthur Fleck".to_string()),
                profile_path: None,
                order: Some(0),
                known_for_department: Some("Acting".to_string()),
            }],
            crew: Vec::new(),
        })
    }

    async fn movie_videos(&self, id: i64) -> Result<Videos, ApiError> {
        self.record("movie_videos", id)?;
        Ok(Videos {
            id,
            results: vec![Video {
                id: None,
                key: "zAGVQLHvwOY".to_string(),
                name: "Final Trailer".to_string(),
                site: "YouTube".to_string(),
                kind: "Trailer".to_string(),
                official: true,
                published_at: None,
            }],
        })
    }

    async fn similar_movies(&self, id: i64, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.record("similar", format!("{}/{}", id, page))?;
        Ok(self.movie_page("Similar", page))
    }

    async fn recommended_movies(&self, id: i64, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.record("recommended", format!("{}/{}", id, page))?;
        Ok(self.movie_page("Recommended", page))
    }

    async fn popular_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.record("popular_tv", page)?;
        Ok(self.tv_page("Popular show", page))
    }

    async fn top_rated_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.record("top_rated_tv", page)?;
        Ok(self.tv_page("Top show", page))
    }

    async fn on_the_air_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.record("on_the_air_tv", page)?;
        Ok(self.tv_page("On air", page))
    }

    async fn airing_today_tv(&self, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.record("airing_today_tv", page)?;
        Ok(self.tv_page("Today", page))
    }

    async fn tv_details(&self, id: i64) -> Result<TvDetail, ApiError> {
        self.record("tv_details", id)?;
        Ok(serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "Breaking Bad",
            "number_of_seasons": 5,
            "number_of_episodes": 62,
            "poster_path": null,
            "backdrop_path": null
        }))
        .expect("valid tv detail fixture"))
    }

    async fn tv_credits(&self, id: i64) -> Result<Credits, ApiError> {
        self.record("tv_credits", id)?;
        Ok(Credits {
            id,
            ..Credits::default()
        })
    }

    async fn tv_videos(&self, id: i64) -> Result<Videos, ApiError> {
        self.record("tv_videos", id)?;
        Ok(Videos {
            id,
            results: Vec::new(),
        })
    }

    async fn similar_tv(&self, id: i64, page: u32) -> Result<Paged<TvShow>, ApiError> {
        self.record("similar_tv", format!("{}/{}", id, page))?;
        Ok(self.tv_page("Similar show", page))
    }

    async fn movie_genres(&self) -> Result<GenreList, ApiError> {
        self.record("movie_genres", "")?;
        Ok(GenreList {
            genres: vec![
                Genre { id: 28, name: "Action".to_string() },
                Genre { id: 18, name: "Drama".to_string() },
            ],
        })
    }

    async fn tv_genres(&self) -> Result<GenreList, ApiError> {
        self.record("tv_genres", "")?;
        Ok(GenreList {
            genres: vec![Genre { id: 10765, name: "Sci-Fi & Fantasy".to_string() }],
        })
    }

    async fn discover_movies_by_genre(&self, genre_id: u32, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.record("discover", format!("{}/{}", genre_id, page))?;
        Ok(self.movie_page("Genre", page))
    }

    async fn search_multi(&self, query: &str, page: u32) -> Result<Paged<MultiSearchResult>, ApiError> {
        self.record("search_multi", format!("{}/{}", query, page))?;
        Ok(paged(page, self.search_results.clone(), 1))
    }

    async fn search_movies(&self, query: &str, page: u32) -> Result<Paged<Movie>, ApiError> {
        self.record("search_movies", format!("{}/{}", query, page))?;
        Ok(paged(page, vec![movie(1, query)], 1))
    }

    async fn person_details(&self, id: i64) -> Result<Person, ApiError> {
        self.record("person_details", id)?;
        Ok(serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "Florence Pugh",
            "profile_path": null,
            "popularity": 40.0
        }))
        .expect("valid person fixture"))
    }

    async fn person_movie_credits(&self, id: i64) -> Result<PersonCredits, ApiError> {
        self.record("person_movie_credits", id)?;
        let credit = |movie_id: i64, popularity: f64| PersonCastCredit {
            id: movie_id,
            title: Some(format!("Film {}", movie_id)),
            character: None,
            release_date: None,
            poster_path: None,
            vote_average: 7.0,
            popularity,
        };
        Ok(PersonCredits {
            id,
            cast: vec![credit(1, 3.0), credit(2, 90.0), credit(3, 12.5)],
        })
    }
}

pub fn search_result(id: i64, media_type: MediaType, title: Option<&str>, name: Option<&str>) -> MultiSearchResult {
    MultiSearchResult {
        id,
        media_type,
        title: title.map(str::to_string),
        name: name.map(str::to_string),
        overview: None,
        release_date: None,
        first_air_date: None,
        genre_ids: Vec::new(),
        vote_average: Some(6.5),
        popularity: 1.0,
        poster_path: None,
        backdrop_path: None,
        profile_path: None,
    }
}
