use super::{publish, user_message, GENRES_UNAVAILABLE, MOVIES_UNAVAILABLE};
use crate::paging::{PagedAdapter, Pager, PagerStep};
use crate::repository::{GenreRepository, MovieListSource};
use crate::state::{Slot, UiState};
use cinescope_api::ApiError;
use cinescope_models::{Genre, Movie};
use tracing::debug;

/// Genre list plus an infinite-scroll list of the selected genre's movies
pub struct GenreController {
    genres_repo: GenreRepository,
    page_limit: Option<u32>,
    selected: Option<(u32, Pager<MovieListSource>)>,
    pub genres: Slot<Vec<Genre>>,
    pub movies: Slot<Vec<Movie>>,
}

impl GenreController {
    /// `page_limit` caps how deep a genre list scrolls; `None` follows the provider
    pub fn new(genres_repo: GenreRepository, page_limit: Option<u32>) -> Self {
        Self {
            genres_repo,
            page_limit,
            selected: None,
            genres: Slot::new(),
            movies: Slot::new(),
        }
    }

    pub async fn load_movie_genres(&self) {
        self.genres.loading();
        let result = self.genres_repo.movie_genres().await.map(|list| list.genres);
        publish(&self.genres, "movie genres", result, GENRES_UNAVAILABLE);
    }

    pub async fn load_tv_genres(&self) {
        self.genres.loading();
        let result = self.genres_repo.tv_genres().await.map(|list| list.genres);
        publish(&self.genres, "tv genres", result, GENRES_UNAVAILABLE);
    }

    pub fn selected_genre(&self) -> Option<u32> {
        self.selected.as_ref().map(|(id, _)| *id)
    }

    /// A fresh pager over one genre, independent of the selection
    pub fn pager(&self, genre_id: u32) -> Pager<MovieListSource> {
        let adapter =
            PagedAdapter::new(self.genres_repo.discover(genre_id)).with_page_limit(self.page_limit);
        Pager::new(adapter)
    }

    /// Switch to `genre_id` and load its first page
    pub async fn select(&mut self, genre_id: u32) -> Result<PagerStep, ApiError> {
        debug!(genre_id, "Selected genre");
        self.selected = Some((genre_id, self.pager(genre_id)));
        self.movies.loading();
        self.load_more().await
    }

    /// Append the next page of the selected genre. Errors go back to the
    /// caller; once a page is loaded the movies stay published, before that
    /// the slot turns into an error.
    pub async fn load_more(&mut self) -> Result<PagerStep, ApiError> {
        let Some((genre_id, pager)) = self.selected.as_mut() else {
            return Ok(PagerStep::EndReached);
        };
        let step = match pager.load_next().await {
            Ok(step) => step,
            Err(e) => {
                if pager.pages().is_empty() {
                    let what = format!("genre {} movies", genre_id);
                    let message = user_message(&what, &e, MOVIES_UNAVAILABLE);
                    self.movies.set(UiState::Error(message.to_string()));
                }
                return Err(e);
            }
        };
        self.movies.set(UiState::Success(pager.items().cloned().collect()));
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeCatalog;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_genre_lists() {
        let controller = GenreController::new(GenreRepository::new(Arc::new(FakeCatalog::new())), None);

        controller.load_movie_genres().await;
        let names: Vec<String> = controller
            .genres
            .current()
            .success()
            .unwrap()
            .iter()
            .map(|g| g.name.clone())
            .collect();
        assert_eq!(names, vec!["Action", "Drama"]);

        controller.load_tv_genres().await;
        assert_eq!(controller.genres.current().success().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_select_and_scroll() {
        let fake = Arc::new(FakeCatalog::new());
        let mut controller = GenreController::new(GenreRepository::new(fake.clone()), None);

        assert_eq!(controller.select(28).await.unwrap(), PagerStep::Loaded(20));
        assert_eq!(controller.load_more().await.unwrap(), PagerStep::Loaded(20));

        assert_eq!(controller.selected_genre(), Some(28));
        assert_eq!(controller.movies.current().success().map(Vec::len), Some(40));
        assert_eq!(fake.calls(), vec!["discover:28/1", "discover:28/2"]);
    }

    #[tokio::test]
    async fn test_page_limit_stops_scrolling() {
        let fake = Arc::new(FakeCatalog::new());
        let mut controller = GenreController::new(GenreRepository::new(fake.clone()), Some(2));

        controller.select(18).await.unwrap();
        controller.load_more().await.unwrap();
        assert_eq!(controller.load_more().await.unwrap(), PagerStep::EndReached);
        assert_eq!(fake.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_first_page_publishes_error() {
        let fake = Arc::new(FakeCatalog::new().failing("discover"));
        let mut controller = GenreController::new(GenreRepository::new(fake), None);

        assert!(controller.select(28).await.is_err());
        assert_eq!(controller.movies.current(), UiState::Error(MOVIES_UNAVAILABLE.to_string()));

        // a retry goes through load_more and fails the same way
        assert!(controller.load_more().await.is_err());
        assert_eq!(controller.movies.current().error(), Some(MOVIES_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_load_more_without_selection() {
        let mut controller = GenreController::new(GenreRepository::new(Arc::new(FakeCatalog::new())), None);
        assert_eq!(controller.load_more().await.unwrap(), PagerStep::EndReached);
    }
}
