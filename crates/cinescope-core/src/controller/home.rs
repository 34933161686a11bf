use super::{publish, MOVIES_UNAVAILABLE};
use crate::paging::FIRST_PAGE;
use crate::repository::{MovieList, MovieRepository};
use crate::state::Slot;
use cinescope_api::TimeWindow;
use cinescope_models::Movie;
use tracing::debug;

/// Front page: five independent movie rows
pub struct HomeController {
    movies: MovieRepository,
    pub trending: Slot<Vec<Movie>>,
    pub popular: Slot<Vec<Movie>>,
    pub top_rated: Slot<Vec<Movie>>,
    pub upcoming: Slot<Vec<Movie>>,
    pub now_playing: Slot<Vec<Movie>>,
}

impl HomeController {
    pub fn new(movies: MovieRepository) -> Self {
        Self {
            movies,
            trending: Slot::new(),
            popular: Slot::new(),
            top_rated: Slot::new(),
            upcoming: Slot::new(),
            now_playing: Slot::new(),
        }
    }

    /// Fetch every row concurrently. A failing row publishes its own error and
    /// leaves the other rows alone.
    pub async fn load(&self) {
        let rows = [
            (&self.trending, MovieList::Trending(TimeWindow::Week)),
            (&self.popular, MovieList::Popular),
            (&self.top_rated, MovieList::TopRated),
            (&self.upcoming, MovieList::Upcoming),
            (&self.now_playing, MovieList::NowPlaying),
        ];
        for (slot, _) in &rows {
            slot.loading();
        }

        let (trending, popular, top_rated, upcoming, now_playing) = tokio::join!(
            self.movies.list_page(&rows[0].1, FIRST_PAGE),
            self.movies.list_page(&rows[1].1, FIRST_PAGE),
            self.movies.list_page(&rows[2].1, FIRST_PAGE),
            self.movies.list_page(&rows[3].1, FIRST_PAGE),
            self.movies.list_page(&rows[4].1, FIRST_PAGE),
        );
        debug!("Home rows fetched");

        let results = [trending, popular, top_rated, upcoming, now_playing];
        for ((slot, list), result) in rows.iter().zip(results) {
            publish(
                slot,
                &list.to_string(),
                result.map(|page| page.results),
                MOVIES_UNAVAILABLE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UiState;
    use crate::testing::FakeCatalog;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_starts_loading() {
        let home = HomeController::new(MovieRepository::new(Arc::new(FakeCatalog::new())));
        assert!(home.trending.current().is_loading());
        assert!(home.now_playing.current().is_loading());
    }

    #[tokio::test]
    async fn test_one_failing_row_leaves_the_others() {
        let fake = Arc::new(FakeCatalog::new().failing("upcoming"));
        let home = HomeController::new(MovieRepository::new(fake.clone()));

        home.load().await;

        assert_eq!(
            home.upcoming.current(),
            UiState::Error(MOVIES_UNAVAILABLE.to_string())
        );
        for slot in [&home.trending, &home.popular, &home.top_rated, &home.now_playing] {
            assert_eq!(slot.current().success().map(Vec::len), Some(20));
        }

        let mut calls = fake.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec!["now_playing:1", "popular:1", "top_rated:1", "trending:week/1", "upcoming:1"]
        );
    }

    #[tokio::test]
    async fn test_reload_notifies_subscribers() {
        let home = HomeController::new(MovieRepository::new(Arc::new(FakeCatalog::new())));
        let mut rx = home.popular.subscribe();

        home.load().await;
        rx.changed().await.unwrap();
        let first = rx.borrow_and_update().success().map(|m| m[0].id);
        assert_eq!(first, Some(100));
    }
}
