use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tidemark_core::connector::HistoryStore;
use tidemark_core::{Category, HistoryRow, NaturalKey, TidemarkError};

#[derive(Default)]
struct StoreState {
    rows: BTreeMap<NaturalKey, HistoryRow>,
    attempts: usize,
    failures: HashMap<Category, TidemarkError>,
}

/// In-memory [`HistoryStore`] enforcing natural-key uniqueness.
///
/// Clones share the same underlying rows, so a test can hand one clone to the
/// orchestrator and inspect another.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert of `category` fail with `error` until cleared.
    pub async fn fail_category(&self, category: Category, error: TidemarkError) {
        self.state.lock().await.failures.insert(category, error);
    }

    /// Remove all injected failures.
    pub async fn clear_failures(&self) {
        self.state.lock().await.failures.clear();
    }

    /// Snapshot of stored rows, ordered by natural key.
    pub async fn rows(&self) -> Vec<HistoryRow> {
        self.state.lock().await.rows.values().cloned().collect()
    }

    /// Stored rows of one category.
    pub async fn rows_of(&self, category: Category) -> Vec<HistoryRow> {
        self.state
            .lock()
            .await
            .rows
            .values()
            .filter(|r| r.category() == category)
            .cloned()
            .collect()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    /// Returns `true` if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of `create` calls received, including rejected ones.
    pub async fn attempts(&self) -> usize {
        self.state.lock().await.attempts
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    fn name(&self) -> &'static str {
        "tidemark-memory"
    }

    async fn create(&self, row: &HistoryRow) -> Result<(), TidemarkError> {
        let mut guard = self.state.lock().await;
        guard.attempts += 1;
        if let Some(err) = guard.failures.get(&row.category()) {
            return Err(err.clone());
        }
        let key = row.natural_key();
        if guard.rows.contains_key(&key) {
            return Err(TidemarkError::already_exists(key.to_string()));
        }
        guard.rows.insert(key, row.clone());
        Ok(())
    }
}
