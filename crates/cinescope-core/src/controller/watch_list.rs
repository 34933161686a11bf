use super::{publish, user_message, UserMessage, WATCH_LIST_UNAVAILABLE, WATCH_LIST_UPDATE_FAILED};
use crate::repository::WatchListRepository;
use crate::state::Slot;
use cinescope_models::WatchListEntry;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Saved titles, republished whenever the store changes.
///
/// Must be created inside a Tokio runtime; the observer task stops when the
/// controller is dropped.
pub struct WatchListController {
    repo: WatchListRepository,
    observer: JoinHandle<()>,
    pub entries: Slot<Vec<WatchListEntry>>,
}

impl WatchListController {
    pub fn new(repo: WatchListRepository) -> Self {
        let entries = Slot::new();
        let slot = entries.clone();
        let mut updates = repo.observe_all();
        let observer = tokio::spawn(async move {
            while let Some(result) = updates.next().await {
                if let Ok(list) = &result {
                    debug!(count = list.len(), "Watch list changed");
                }
                publish(&slot, "watch list", result, WATCH_LIST_UNAVAILABLE);
            }
        });

        Self {
            repo,
            observer,
            entries,
        }
    }

    pub async fn add(&self, entry: WatchListEntry) -> Result<(), UserMessage> {
        let id = entry.id;
        self.repo
            .insert(&entry)
            .await
            .map_err(|e| user_message("watch-list insert", e, WATCH_LIST_UPDATE_FAILED))?;
        info!(id, title = %entry.title, "Added to watch list");
        Ok(())
    }

    /// Removing an id that is not saved is not an error
    pub async fn remove(&self, id: i64) -> Result<(), UserMessage> {
        self.repo
            .remove(id)
            .await
            .map_err(|e| user_message("watch-list remove", e, WATCH_LIST_UPDATE_FAILED))?;
        info!(id, "Removed from watch list");
        Ok(())
    }

    /// Re-read the list, picking up writes made outside this process
    pub fn refresh(&self) {
        self.repo.refresh();
    }

    pub async fn exists(&self, id: i64) -> Result<bool, UserMessage> {
        self.repo
            .exists(id)
            .await
            .map(|count| count > 0)
            .map_err(|e| user_message("watch-list lookup", e, WATCH_LIST_UNAVAILABLE))
    }
}

impl Drop for WatchListController {
    fn drop(&mut self) {
        self.observer.abort();
    }
}
