use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::movie::MovieDetail;

/// A saved catalog item. `id` is the provider's id and the primary key of the
/// watch-list table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchListEntry {
    pub id: i64,
    pub poster_path: Option<String>,
    pub title: String,
    pub release_date: String,
    pub rating: f64,
    pub added_on: DateTime<Utc>,
}

impl WatchListEntry {
    pub fn from_detail(detail: &MovieDetail, added_on: DateTime<Utc>) -> Self {
        Self {
            id: detail.id,
            poster_path: detail.poster_path.clone(),
            title: detail.title.clone(),
            release_date: detail.release_date.clone().unwrap_or_default(),
            rating: detail.vote_average,
            added_on,
        }
    }
}
