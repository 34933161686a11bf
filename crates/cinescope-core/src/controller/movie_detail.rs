use super::{
    publish, user_message, UserMessage, CREDITS_UNAVAILABLE, DETAILS_UNAVAILABLE,
    MOVIES_UNAVAILABLE, VIDEOS_UNAVAILABLE, WATCH_LIST_UNAVAILABLE, WATCH_LIST_UPDATE_FAILED,
};
use crate::paging::FIRST_PAGE;
use crate::repository::{MovieList, MovieRepository, WatchListRepository};
use crate::state::{Slot, UiState};
use chrono::Utc;
use cinescope_models::{Credits, Movie, MovieDetail, Video, Videos, WatchListEntry};
use tracing::info;

pub struct MovieDetailController {
    movies: MovieRepository,
    watch_list: WatchListRepository,
    pub details: Slot<MovieDetail>,
    pub credits: Slot<Credits>,
    pub videos: Slot<Videos>,
    pub similar: Slot<Vec<Movie>>,
    pub in_watch_list: Slot<bool>,
}

impl MovieDetailController {
    pub fn new(movies: MovieRepository, watch_list: WatchListRepository) -> Self {
        Self {
            movies,
            watch_list,
            details: Slot::new(),
            credits: Slot::new(),
            videos: Slot::new(),
            similar: Slot::new(),
            in_watch_list: Slot::new(),
        }
    }

    pub async fn load(&self, id: i64) {
        self.details.loading();
        self.credits.loading();
        self.videos.loading();
        self.similar.loading();
        self.in_watch_list.loading();

        let similar_list = MovieList::Similar(id);
        let (details, credits, videos, similar, saved) = tokio::join!(
            self.movies.details(id),
            self.movies.credits(id),
            self.movies.videos(id),
            self.movies.list_page(&similar_list, FIRST_PAGE),
            self.watch_list.exists(id),
        );

        publish(&self.details, "movie details", details, DETAILS_UNAVAILABLE);
        publish(&self.credits, "movie credits", credits, CREDITS_UNAVAILABLE);
        publish(&self.videos, "movie videos", videos, VIDEOS_UNAVAILABLE);
        publish(
            &self.similar,
            "similar movies",
            similar.map(|page| page.results),
            MOVIES_UNAVAILABLE,
        );
        publish(
            &self.in_watch_list,
            "watch-list lookup",
            saved.map(|count| count > 0),
            WATCH_LIST_UNAVAILABLE,
        );
    }

    /// Best trailer among the loaded videos
    pub fn trailer(&self) -> Option<Video> {
        self.videos.current().success().and_then(|v| v.trailer().cloned())
    }

    /// Add the loaded movie to the watch list, or remove it if already saved.
    /// Returns whether the movie is saved afterwards.
    pub async fn toggle_watch_list(&self) -> Result<bool, UserMessage> {
        let detail = match self.details.current() {
            UiState::Success(detail) => detail,
            UiState::Loading | UiState::Error(_) => return Err(UserMessage(DETAILS_UNAVAILABLE)),
        };

        let saved = match self.watch_list.exists(detail.id).await {
            Ok(count) => count > 0,
            Err(e) => return Err(user_message("watch-list lookup", e, WATCH_LIST_UNAVAILABLE)),
        };

        let result = if saved {
            self.watch_list.remove(detail.id).await
        } else {
            self.watch_list
                .insert(&WatchListEntry::from_detail(&detail, Utc::now()))
                .await
        };
        if let Err(e) = result {
            return Err(user_message("watch-list update", e, WATCH_LIST_UPDATE_FAILED));
        }

        info!(id = detail.id, saved = !saved, "Toggled watch list");
        self.in_watch_list.set(UiState::Success(!saved));
        Ok(!saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::WatchListStore;
    use crate::testing::FakeCatalog;
    use std::sync::Arc;

    async fn controller(fake: FakeCatalog) -> (MovieDetailController, WatchListRepository) {
        let store = WatchListStore::in_memory().await.unwrap();
        let watch_list = WatchListRepository::new(store);
        let controller =
            MovieDetailController::new(MovieRepository::new(Arc::new(fake)), watch_list.clone());
        (controller, watch_list)
    }

    #[tokio::test]
    async fn test_load_publishes_every_slot() {
        let (detail, _) = controller(FakeCatalog::new()).await;

        detail.load(475557).await;

        assert_eq!(detail.details.current().success().map(|d| d.id), Some(475557));
        assert_eq!(detail.credits.current().success().map(|c| c.cast.len()), Some(1));
        assert_eq!(detail.similar.current().success().map(Vec::len), Some(20));
        assert_eq!(detail.in_watch_list.current(), UiState::Success(false));
        assert_eq!(detail.trailer().map(|v| v.key), Some("zAGVQLHvwOY".to_string()));
    }

    #[tokio::test]
    async fn test_credits_failure_lands_on_credits_slot() {
        let (detail, _) = controller(FakeCatalog::new().failing("movie_credits")).await;

        detail.load(7).await;

        assert_eq!(
            detail.credits.current(),
            UiState::Error(CREDITS_UNAVAILABLE.to_string())
        );
        assert!(detail.similar.current().success().is_some());
        assert!(detail.details.current().success().is_some());
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let (detail, watch_list) = controller(FakeCatalog::new()).await;
        detail.load(42).await;

        assert_eq!(detail.toggle_watch_list().await, Ok(true));
        assert_eq!(watch_list.exists(42).await.unwrap(), 1);
        let saved = watch_list.list_all().await.unwrap();
        assert_eq!(saved[0].title, "Movie 42");
        assert_eq!(detail.in_watch_list.current(), UiState::Success(true));

        assert_eq!(detail.toggle_watch_list().await, Ok(false));
        assert_eq!(watch_list.exists(42).await.unwrap(), 0);
        assert_eq!(detail.in_watch_list.current(), UiState::Success(false));
    }

    #[tokio::test]
    async fn test_toggle_without_details_is_refused() {
        let (detail, watch_list) = controller(FakeCatalog::new().failing_id(13)).await;
        detail.load(13).await;

        assert_eq!(
            detail.toggle_watch_list().await,
            Err(UserMessage(DETAILS_UNAVAILABLE))
        );
        assert!(watch_list.list_all().await.unwrap().is_empty());
    }
}
