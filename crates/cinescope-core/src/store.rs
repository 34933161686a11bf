//! Watch-list persistence.
//!
//! One SQLite table keyed by catalog id. Writes go through [`WatchListStore`],
//! which bumps a change counter so [`WatchListStore::observe_all`] can re-run
//! its query after every insert or delete.

use chrono::{DateTime, SecondsFormat, Utc};
use cinescope_models::WatchListEntry;
use futures::stream::{self, BoxStream, StreamExt};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};
use crate::error::StoreError;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS watch_list_table (
    id INTEGER PRIMARY KEY NOT NULL,
    image_path TEXT,
    title TEXT NOT NULL,
    release_date TEXT NOT NULL,
    rating REAL NOT NULL,
    added_on TEXT NOT NULL
)";

type EntryRow = (i64, Option<String>, String, String, f64, String);

#[derive(Clone, Debug)]
pub struct WatchListStore {
    pool: SqlitePool,
    changes: Arc<watch::Sender<u64>>,
}

impl WatchListStore {
    /// Open (or create) the database file and make sure the table exists
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;
        info!("Opened watch-list database at {}", path.display());
        Self::from_pool(pool).await
    }

    /// Private in-memory database. A single pinned connection keeps it alive.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        let (changes, _) = watch::channel(0);
        Ok(Self {
            pool,
            changes: Arc::new(changes),
        })
    }

    fn notify(&self) {
        self.changes.send_modify(|version| *version += 1);
    }

    /// Upsert by id; an existing row with the same id is replaced
    pub async fn insert(&self, entry: &WatchListEntry) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT OR REPLACE INTO watch_list_table (id, image_path, title, release_date, rating, added_on) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(entry.id)
        .bind(&entry.poster_path)
        .bind(&entry.title)
        .bind(&entry.release_date)
        .bind(entry.rating)
        .bind(format_timestamp(&entry.added_on))
        .execute(&self.pool)
        .await?;
        debug!(id = entry.id, title = %entry.title, "Saved watch-list entry");
        self.notify();
        Ok(())
    }

    /// Delete by id. Removing an id that is not stored is a no-op.
    pub async fn remove(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM watch_list_table WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(id = id, removed = result.rows_affected(), "Removed watch-list entry");
        if result.rows_affected() > 0 {
            self.notify();
        }
        Ok(())
    }

    /// Number of rows stored under `id` (0 or 1)
    pub async fn exists(&self, id: i64) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM watch_list_table WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Every entry, most recently added first
    pub async fn list_all(&self) -> Result<Vec<WatchListEntry>, StoreError> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            "SELECT id, image_path, title, release_date, rating, added_on \
             FROM watch_list_table ORDER BY added_on DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(entry_from_row).collect()
    }

    /// Re-run live queries without a local write, e.g. after another process
    /// changed the database file
    pub fn refresh(&self) {
        self.notify();
    }

    /// Delete every entry, returning how many were removed
    pub async fn clear(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM watch_list_table")
            .execute(&self.pool)
            .await?;
        if result.rows_affected() > 0 {
            self.notify();
        }
        Ok(result.rows_affected())
    }

    /// Live query: yields the current list right away, then again after each
    /// write. Writes that land before the consumer polls are coalesced.
    pub fn observe_all(&self) -> BoxStream<'static, Result<Vec<WatchListEntry>, StoreError>> {
        let store = self.clone();
        let changes = self.changes.subscribe();

        stream::unfold((store, changes, true), |(store, mut changes, first)| async move {
            if !first && changes.changed().await.is_err() {
                return None;
            }
            changes.borrow_and_update();
            let snapshot = store.list_all().await;
            Some((snapshot, (store, changes, false)))
        })
        .boxed()
    }
}

/// Fixed-width UTC timestamps so lexical order in SQL matches time order
fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn entry_from_row(row: EntryRow) -> Result<WatchListEntry, StoreError> {
    let (id, poster_path, title, release_date, rating, added_on) = row;
    let parsed = DateTime::parse_from_rfc3339(&added_on)
        .map_err(|source| StoreError::Timestamp {
            id,
            value: added_on.clone(),
            source,
        })?
        .with_timezone(&Utc);
    Ok(WatchListEntry {
        id,
        poster_path,
        title,
        release_date,
        rating,
        added_on: parsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn entry(id: i64, title: &str, minutes: i64) -> WatchListEntry {
        WatchListEntry {
            id,
            poster_path: Some(format!("/{}.jpg", id)),
            title: title.to_string(),
            release_date: "2020-01-01".to_string(),
            rating: 7.5,
            added_on: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn test_exists_before_and_after_insert() {
        let store = WatchListStore::in_memory().await.unwrap();
        assert_eq!(store.exists(42).await.unwrap(), 0);

        store.insert(&entry(42, "Hitchhiker", 0)).await.unwrap();
        assert_eq!(store.exists(42).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_replaces_existing_id() {
        let store = WatchListStore::in_memory().await.unwrap();
        store.insert(&entry(5, "A", 0)).await.unwrap();
        store.insert(&entry(5, "B", 1)).await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "B");
    }

    #[tokio::test]
    async fn test_remove_missing_id_is_noop() {
        let store = WatchListStore::in_memory().await.unwrap();
        store.insert(&entry(1, "Kept", 0)).await.unwrap();

        store.remove(999).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);

        store.remove(1).await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_is_reverse_chronological() {
        let store = WatchListStore::in_memory().await.unwrap();
        store.insert(&entry(1, "Oldest", 0)).await.unwrap();
        store.insert(&entry(2, "Newest", 30)).await.unwrap();
        store.insert(&entry(3, "Middle", 10)).await.unwrap();

        let titles: Vec<String> = store.list_all().await.unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
    }

    #[tokio::test]
    async fn test_round_trips_nullable_poster_and_timestamp() {
        let store = WatchListStore::in_memory().await.unwrap();
        let mut original = entry(7, "No poster", 0);
        original.poster_path = None;
        store.insert(&original).await.unwrap();

        let loaded = store.list_all().await.unwrap().remove(0);
        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn test_observe_all_emits_after_writes() {
        let store = WatchListStore::in_memory().await.unwrap();
        let mut live = store.observe_all();

        let initial = live.next().await.unwrap().unwrap();
        assert!(initial.is_empty());

        store.insert(&entry(10, "Alien", 0)).await.unwrap();
        let after_insert = live.next().await.unwrap().unwrap();
        assert_eq!(after_insert.len(), 1);
        assert_eq!(after_insert[0].id, 10);

        store.remove(10).await.unwrap();
        let after_remove = live.next().await.unwrap().unwrap();
        assert!(after_remove.is_empty());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = WatchListStore::in_memory().await.unwrap();
        store.insert(&entry(1, "One", 0)).await.unwrap();
        store.insert(&entry(2, "Two", 1)).await.unwrap();
        assert_eq!(store.clear().await.unwrap(), 2);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cinescope.db");

        let store = WatchListStore::open(&path).await.unwrap();
        store.insert(&entry(3, "Persisted", 0)).await.unwrap();
        drop(store);

        let reopened = WatchListStore::open(&path).await.unwrap();
        assert_eq!(reopened.exists(3).await.unwrap(), 1);
    }
}
