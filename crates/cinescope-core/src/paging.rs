//! Page-number cursors for infinite-scroll lists.
//!
//! A [`PageSource`] fetches one provider page. [`PagedAdapter`] turns that into
//! a [`LoadResult`] with previous/next keys and computes the key to reload from
//! after a refresh. [`Pager`] keeps the loaded pages for one list and only
//! asks for page N+1 once page N reported a next key.

use async_trait::async_trait;
use cinescope_api::ApiError;
use cinescope_models::Paged;
use tracing::{debug, warn};

pub const FIRST_PAGE: u32 = 1;

#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// Short label used in logs
    fn describe(&self) -> String;

    async fn fetch(&self, page: u32) -> Result<Paged<Self::Item>, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadParams {
    /// Page to load; `None` means the first page
    pub key: Option<u32>,
}

impl LoadParams {
    pub fn page(key: u32) -> Self {
        Self { key: Some(key) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPage<T> {
    pub key: u32,
    pub data: Vec<T>,
    pub prev_key: Option<u32>,
    pub next_key: Option<u32>,
}

#[derive(Debug)]
pub enum LoadResult<T> {
    Page(LoadedPage<T>),
    /// Terminal for this load; the list view offers its own retry
    Error(ApiError),
}

/// Snapshot of what a list has loaded and where the user last looked
#[derive(Debug)]
pub struct PagingState<'a, T> {
    pub pages: &'a [LoadedPage<T>],
    pub anchor_position: Option<usize>,
}

impl<'a, T> PagingState<'a, T> {
    /// Page containing the item at `position` counted across all loaded
    /// pages. Positions past the end resolve to the last page.
    pub fn closest_page_to_position(&self, position: usize) -> Option<&'a LoadedPage<T>> {
        let mut remaining = position;
        for page in self.pages {
            if remaining < page.data.len() {
                return Some(page);
            }
            remaining -= page.data.len();
        }
        self.pages.last()
    }
}

pub struct PagedAdapter<S> {
    source: S,
    page_limit: Option<u32>,
}

impl<S: PageSource> PagedAdapter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            page_limit: None,
        }
    }

    /// Stop offering a next key after `limit` pages even if the provider reports more
    pub fn with_page_limit(mut self, limit: Option<u32>) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn load(&self, params: LoadParams) -> LoadResult<S::Item> {
        let key = params.key.unwrap_or(FIRST_PAGE).max(FIRST_PAGE);

        match self.source.fetch(key).await {
            Ok(page) => {
                let last_page = match self.page_limit {
                    Some(limit) => page.total_pages.min(limit),
                    None => page.total_pages,
                };
                let prev_key = if key == FIRST_PAGE { None } else { Some(key - 1) };
                let next_key = if page.results.is_empty() || key >= last_page {
                    None
                } else {
                    Some(key + 1)
                };
                debug!(
                    list = %self.source.describe(),
                    page = key,
                    items = page.results.len(),
                    total_pages = page.total_pages,
                    "Loaded page"
                );
                LoadResult::Page(LoadedPage {
                    key,
                    data: page.results,
                    prev_key,
                    next_key,
                })
            }
            Err(e) => {
                warn!(list = %self.source.describe(), page = key, "Page load failed: {}", e);
                LoadResult::Error(e)
            }
        }
    }

    /// Key to reload from so the refreshed list lands near the last viewed item
    pub fn refresh_key(&self, state: &PagingState<'_, S::Item>) -> Option<u32> {
        let anchor = state.anchor_position?;
        let page = state.closest_page_to_position(anchor)?;
        page.prev_key
            .map(|prev| prev + 1)
            .or_else(|| page.next_key.map(|next| next - 1))
    }
}

/// Outcome of asking a [`Pager`] for more items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStep {
    /// A page was added holding this many items
    Loaded(usize),
    /// The list has no further page in that direction
    EndReached,
}

/// Loaded pages of one list, in key order
pub struct Pager<S: PageSource> {
    adapter: PagedAdapter<S>,
    pages: Vec<LoadedPage<S::Item>>,
    anchor_position: Option<usize>,
}

impl<S: PageSource> Pager<S> {
    pub fn new(adapter: PagedAdapter<S>) -> Self {
        Self {
            adapter,
            pages: Vec::new(),
            anchor_position: None,
        }
    }

    pub fn pages(&self) -> &[LoadedPage<S::Item>] {
        &self.pages
    }

    pub fn items(&self) -> impl Iterator<Item = &S::Item> {
        self.pages.iter().flat_map(|p| p.data.iter())
    }

    pub fn len(&self) -> usize {
        self.pages.iter().map(|p| p.data.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once the last loaded page reported no next key
    pub fn is_exhausted(&self) -> bool {
        self.pages.last().map_or(false, |p| p.next_key.is_none())
    }

    /// Record the last item position the user looked at
    pub fn set_anchor(&mut self, position: usize) {
        self.anchor_position = Some(position);
    }

    pub fn state(&self) -> PagingState<'_, S::Item> {
        PagingState {
            pages: &self.pages,
            anchor_position: self.anchor_position,
        }
    }

    /// Append the page after the last loaded one. Errors leave the loaded pages untouched.
    pub async fn load_next(&mut self) -> Result<PagerStep, ApiError> {
        let key = match self.pages.last() {
            None => None,
            Some(last) => match last.next_key {
                Some(next) => Some(next),
                None => return Ok(PagerStep::EndReached),
            },
        };

        match self.adapter.load(LoadParams { key }).await {
            LoadResult::Page(page) => {
                let count = page.data.len();
                self.pages.push(page);
                Ok(PagerStep::Loaded(count))
            }
            LoadResult::Error(e) => Err(e),
        }
    }

    /// Prepend the page before the first loaded one (after a refresh that started mid-list)
    pub async fn load_previous(&mut self) -> Result<PagerStep, ApiError> {
        let key = match self.pages.first().and_then(|p| p.prev_key) {
            Some(prev) => prev,
            None => return Ok(PagerStep::EndReached),
        };

        match self.adapter.load(LoadParams::page(key)).await {
            LoadResult::Page(page) => {
                let count = page.data.len();
                if let Some(anchor) = self.anchor_position.as_mut() {
                    *anchor += count;
                }
                self.pages.insert(0, page);
                Ok(PagerStep::Loaded(count))
            }
            LoadResult::Error(e) => Err(e),
        }
    }

    /// Drop everything and reload starting from the refresh key (first page if none).
    /// On error the pager is left empty.
    pub async fn refresh(&mut self) -> Result<PagerStep, ApiError> {
        let key = self.adapter.refresh_key(&self.state());
        self.pages.clear();
        self.anchor_position = None;

        match self.adapter.load(LoadParams { key }).await {
            LoadResult::Page(page) => {
                let count = page.data.len();
                self.pages.push(page);
                Ok(PagerStep::Loaded(count))
            }
            LoadResult::Error(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests;
