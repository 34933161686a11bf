use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub also_known_as: Vec<String>,
}

/// One movie a person appeared in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonCastCredit {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub popularity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PersonCredits {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub cast: Vec<PersonCastCredit>,
}

impl PersonCredits {
    /// Credits ordered by popularity, most popular first
    pub fn by_popularity(mut self) -> Self {
        self.cast.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
        self
    }
}
