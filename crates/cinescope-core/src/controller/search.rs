use super::{publish, SEARCH_FAILED};
use crate::paging::FIRST_PAGE;
use crate::repository::SearchRepository;
use crate::state::{Slot, UiState};
use cinescope_models::Movie;
use tracing::debug;

pub struct SearchController {
    search: SearchRepository,
    pub results: Slot<Vec<Movie>>,
}

impl SearchController {
    pub fn new(search: SearchRepository) -> Self {
        Self {
            search,
            results: Slot::new(),
        }
    }

    /// Multi-search keeping only movies that have a title to show.
    /// A blank query clears the results without a request.
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.results.set(UiState::Success(Vec::new()));
            return;
        }

        self.results.loading();
        let result = self.search.multi(query, FIRST_PAGE).await.map(|page| {
            let total = page.results.len();
            let movies: Vec<Movie> = page.results.into_iter().filter_map(|r| r.into_movie()).collect();
            debug!(query, total, movies = movies.len(), "Filtered search results");
            movies
        });
        publish(&self.results, "search", result, SEARCH_FAILED);
    }
}
