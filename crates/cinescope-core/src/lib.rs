pub mod context;
pub mod controller;
pub mod error;
pub mod paging;
pub mod repository;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use context::AppContext;
pub use controller::{
    DetailBatch, DetailBatchController, GenreController, HomeController, MovieDetailController,
    PersonController, SearchController, TvDetailController, UserMessage, WatchListController,
};
pub use error::StoreError;
pub use paging::{LoadParams, LoadResult, LoadedPage, PageSource, PagedAdapter, Pager, PagerStep, PagingState};
pub use repository::{
    GenreRepository, MovieList, MovieListSource, MovieRepository, PersonRepository, Repositories,
    SearchRepository, TvList, TvListSource, TvRepository, WatchListRepository,
};
pub use state::{Slot, UiState};
pub use store::WatchListStore;
