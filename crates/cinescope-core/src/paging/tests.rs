use super::*;
use std::collections::HashSet;
use std::sync::Mutex;

/// Numbers list: page N holds `per_page` items starting at (N-1)*per_page
struct NumberSource {
    total_pages: u32,
    per_page: u32,
    failing_pages: HashSet<u32>,
    requested: Mutex<Vec<u32>>,
}

impl NumberSource {
    fn new(total_pages: u32, per_page: u32) -> Self {
        Self {
            total_pages,
            per_page,
            failing_pages: HashSet::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for NumberSource {
    type Item = u32;

    fn describe(&self) -> String {
        "numbers".to_string()
    }

    async fn fetch(&self, page: u32) -> Result<Paged<u32>, ApiError> {
        self.requested.lock().unwrap().push(page);
        if self.failing_pages.contains(&page) {
            return Err(ApiError::Status {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }
        let start = (page - 1) * self.per_page;
        let results = if page <= self.total_pages {
            (start..start + self.per_page).collect()
        } else {
            Vec::new()
        };
        Ok(Paged {
            page,
            results,
            total_pages: self.total_pages,
            total_results: u64::from(self.total_pages * self.per_page),
        })
    }
}

fn page(key: u32, len: usize, prev_key: Option<u32>, next_key: Option<u32>) -> LoadedPage<u32> {
    LoadedPage {
        key,
        data: vec![0; len],
        prev_key,
        next_key,
    }
}

fn expect_page<T: std::fmt::Debug>(result: LoadResult<T>) -> LoadedPage<T> {
    match result {
        LoadResult::Page(page) => page,
        LoadResult::Error(e) => panic!("expected a page, got error {e}"),
    }
}

#[tokio::test]
async fn test_first_page_of_large_list() {
    let adapter = PagedAdapter::new(NumberSource::new(500, 20));

    let loaded = expect_page(adapter.load(LoadParams::default()).await);
    assert_eq!(loaded.key, 1);
    assert_eq!(loaded.data.len(), 20);
    assert_eq!(loaded.prev_key, None);
    assert_eq!(loaded.next_key, Some(2));
}

#[tokio::test]
async fn test_prev_key_is_previous_page() {
    let adapter = PagedAdapter::new(NumberSource::new(500, 20));

    for key in [2u32, 3, 17, 499] {
        let loaded = expect_page(adapter.load(LoadParams::page(key)).await);
        assert_eq!(loaded.prev_key, Some(key - 1));
        assert_eq!(loaded.next_key, Some(key + 1));
    }
}

#[tokio::test]
async fn test_last_page_has_no_next_key() {
    let adapter = PagedAdapter::new(NumberSource::new(3, 20));

    let loaded = expect_page(adapter.load(LoadParams::page(3)).await);
    assert_eq!(loaded.prev_key, Some(2));
    assert_eq!(loaded.next_key, None);
}

#[tokio::test]
async fn test_empty_result_has_no_next_key() {
    let adapter = PagedAdapter::new(NumberSource::new(0, 20));

    let loaded = expect_page(adapter.load(LoadParams::default()).await);
    assert!(loaded.data.is_empty());
    assert_eq!(loaded.next_key, None);
}

#[tokio::test]
async fn test_page_limit_clamps_next_key() {
    let adapter = PagedAdapter::new(NumberSource::new(500, 20)).with_page_limit(Some(20));

    let below = expect_page(adapter.load(LoadParams::page(19)).await);
    assert_eq!(below.next_key, Some(20));

    let at_limit = expect_page(adapter.load(LoadParams::page(20)).await);
    assert_eq!(at_limit.next_key, None);
}

#[tokio::test]
async fn test_error_is_reported_without_retry() {
    let source = NumberSource::new(10, 20).failing_on(1);
    let adapter = PagedAdapter::new(source);

    match adapter.load(LoadParams::default()).await {
        LoadResult::Error(ApiError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(adapter.source().requested(), vec![1]);
}

#[test]
fn test_refresh_key_prefers_prev_key() {
    let adapter = PagedAdapter::new(NumberSource::new(10, 20));
    let pages = vec![
        page(4, 20, Some(3), Some(5)),
        page(5, 20, Some(4), Some(6)),
    ];
    let state = PagingState {
        pages: &pages,
        anchor_position: Some(25),
    };
    assert_eq!(adapter.refresh_key(&state), Some(5));
}

#[test]
fn test_refresh_key_falls_back_to_next_key() {
    let adapter = PagedAdapter::new(NumberSource::new(10, 20));
    let pages = vec![page(1, 20, None, Some(2))];
    let state = PagingState {
        pages: &pages,
        anchor_position: Some(3),
    };
    assert_eq!(adapter.refresh_key(&state), Some(1));
}

#[test]
fn test_refresh_key_without_anchor_or_pages() {
    let adapter = PagedAdapter::new(NumberSource::new(10, 20));
    let pages = vec![page(1, 20, None, Some(2))];
    let no_anchor = PagingState {
        pages: &pages,
        anchor_position: None,
    };
    assert_eq!(adapter.refresh_key(&no_anchor), None);

    let nothing_loaded: PagingState<'_, u32> = PagingState {
        pages: &[],
        anchor_position: Some(10),
    };
    assert_eq!(adapter.refresh_key(&nothing_loaded), None);
}

#[test]
fn test_closest_page_past_the_end_is_last_page() {
    let pages = vec![page(1, 20, None, Some(2)), page(2, 5, Some(1), None)];
    let state = PagingState {
        pages: &pages,
        anchor_position: None,
    };
    assert_eq!(state.closest_page_to_position(0).map(|p| p.key), Some(1));
    assert_eq!(state.closest_page_to_position(20).map(|p| p.key), Some(2));
    assert_eq!(state.closest_page_to_position(500).map(|p| p.key), Some(2));
}

#[tokio::test]
async fn test_pager_walks_pages_in_order_and_stops_at_end() {
    let mut pager = Pager::new(PagedAdapter::new(NumberSource::new(2, 3)));

    assert_eq!(pager.load_next().await.unwrap(), PagerStep::Loaded(3));
    assert_eq!(pager.load_next().await.unwrap(), PagerStep::Loaded(3));
    assert!(pager.is_exhausted());
    assert_eq!(pager.load_next().await.unwrap(), PagerStep::EndReached);

    let items: Vec<u32> = pager.items().copied().collect();
    assert_eq!(items, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(pager.adapter.source().requested(), vec![1, 2]);
}

#[tokio::test]
async fn test_pager_keeps_pages_when_next_load_fails() {
    let mut pager = Pager::new(PagedAdapter::new(NumberSource::new(5, 2).failing_on(2)));

    pager.load_next().await.unwrap();
    assert!(pager.load_next().await.is_err());
    assert_eq!(pager.len(), 2);
    assert_eq!(pager.pages().len(), 1);
    assert!(!pager.is_exhausted());
}

#[tokio::test]
async fn test_pager_refresh_restarts_near_anchor() {
    let mut pager = Pager::new(PagedAdapter::new(NumberSource::new(10, 10)));
    for _ in 0..3 {
        pager.load_next().await.unwrap();
    }
    // item 25 lives on page 3
    pager.set_anchor(25);

    assert_eq!(pager.refresh().await.unwrap(), PagerStep::Loaded(10));
    assert_eq!(pager.pages().len(), 1);
    assert_eq!(pager.pages()[0].key, 3);

    assert_eq!(pager.load_previous().await.unwrap(), PagerStep::Loaded(10));
    assert_eq!(pager.pages()[0].key, 2);
    assert_eq!(pager.items().next(), Some(&10));
}

#[tokio::test]
async fn test_pager_refresh_without_anchor_starts_at_first_page() {
    let mut pager = Pager::new(PagedAdapter::new(NumberSource::new(10, 10)));
    pager.load_next().await.unwrap();
    pager.load_next().await.unwrap();

    pager.refresh().await.unwrap();
    assert_eq!(pager.pages().len(), 1);
    assert_eq!(pager.pages()[0].key, 1);
    assert_eq!(pager.load_previous().await.unwrap(), PagerStep::EndReached);
}
