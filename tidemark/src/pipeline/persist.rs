use tidemark_core::connector::HistoryStore;
use tidemark_core::{Category, CategoryTally, Dataset, HistoryRow, TidemarkError};

/// Persist one category's records in entity then timestamp order.
///
/// Records that cannot become a row are dropped and counted. Duplicate
/// rejections are counted and skipped. Any other store error stops the
/// category immediately; rows inserted before it stay committed.
///
/// # Errors
/// Returns the first non-duplicate store error.
pub async fn persist_dataset(
    store: &dyn HistoryStore,
    category: Category,
    dataset: &Dataset,
) -> Result<CategoryTally, TidemarkError> {
    let mut tally = CategoryTally::default();
    for (entity, series) in dataset {
        if !series.is_empty() {
            tally.entities += 1;
        }
        for record in series {
            let row = match HistoryRow::from_record(category, record) {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!(%category, entity = %entity, error = %e, "record not persistable; dropping");
                    tally.dropped += 1;
                    continue;
                }
            };
            match store.create(&row).await {
                Ok(()) => tally.inserted += 1,
                Err(e) if e.is_duplicate() => {
                    tracing::debug!(%category, key = %row.natural_key(), "row already stored");
                    tally.duplicates += 1;
                }
                Err(e) => {
                    tracing::error!(
                        %category,
                        store = store.name(),
                        key = %row.natural_key(),
                        error = %e,
                        "persistence failed"
                    );
                    return Err(e);
                }
            }
        }
    }
    if tally.duplicates > 0 {
        tracing::info!(%category, skipped = tally.duplicates, "skipped rows already stored");
    }
    Ok(tally)
}
