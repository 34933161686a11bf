use crate::repository::MovieRepository;
use crate::state::{Slot, UiState};
use cinescope_models::MovieDetail;
use futures::future::join_all;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Details for a set of ids. Ids whose lookup failed are missing from
/// `details` and listed in `failed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailBatch {
    pub details: HashMap<i64, MovieDetail>,
    pub failed: Vec<i64>,
    /// Set once every requested id has resolved, successfully or not
    pub all_loaded: bool,
}

pub struct DetailBatchController {
    movies: MovieRepository,
    pub batch: Slot<DetailBatch>,
}

impl DetailBatchController {
    pub fn new(movies: MovieRepository) -> Self {
        Self {
            movies,
            batch: Slot::new(),
        }
    }

    /// Fetch all ids concurrently and publish once every lookup has finished.
    /// Individual failures never fail the batch.
    pub async fn load(&self, ids: &[i64]) {
        self.batch.loading();

        let mut seen = HashSet::new();
        let unique: Vec<i64> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let lookups = unique.iter().map(|&id| async move { (id, self.movies.details(id).await) });
        let outcomes = join_all(lookups).await;

        let mut batch = DetailBatch::default();
        for (id, outcome) in outcomes {
            match outcome {
                Ok(detail) => {
                    batch.details.insert(id, detail);
                }
                Err(e) => {
                    warn!(id, "Skipping movie whose details failed: {}", e);
                    batch.failed.push(id);
                }
            }
        }
        batch.all_loaded = true;

        info!(
            requested = unique.len(),
            loaded = batch.details.len(),
            failed = batch.failed.len(),
            "Detail batch finished"
        );
        self.batch.set(UiState::Success(batch));
    }
}
