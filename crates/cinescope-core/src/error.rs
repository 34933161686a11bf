use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to prepare database location: {0}")]
    Io(#[from] std::io::Error),

    #[error("watch-list entry {id} has an unreadable timestamp '{value}': {source}")]
    Timestamp {
        id: i64,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
