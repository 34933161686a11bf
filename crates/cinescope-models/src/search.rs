use serde::{Deserialize, Serialize};
use crate::media::MediaType;
use crate::movie::Movie;

/// Mixed result of the multi-search endpoint. Movies carry `title`, series and
/// people carry `name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MultiSearchResult {
    pub id: i64,
    pub media_type: MediaType,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: f64,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl MultiSearchResult {
    /// Project a movie result onto the list-item shape. Returns `None` for
    /// series, people and results without a title or name.
    pub fn into_movie(self) -> Option<Movie> {
        if self.media_type != MediaType::Movie {
            return None;
        }
        let title = self.title.or(self.name)?;
        Some(Movie {
            id: self.id,
            title,
            original_title: None,
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date,
            genre_ids: self.genre_ids,
            vote_average: self.vote_average.unwrap_or_default(),
            vote_count: 0,
            popularity: self.popularity,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            adult: false,
            original_language: None,
        })
    }
}
