use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::record::{Dataset, Record, Series};

/// Collapse repeated timestamps in one series.
///
/// The last element in input order wins; output is ascending by timestamp
/// regardless of input order. Returns the series and how many records were
/// collapsed.
#[must_use]
pub fn dedup_series(series: Series) -> (Series, usize) {
    let before = series.len();
    let mut by_ts: BTreeMap<DateTime<Utc>, Record> = BTreeMap::new();
    for r in series {
        by_ts.insert(r.timestamp, r);
    }
    let out: Series = by_ts.into_values().collect();
    let collapsed = before - out.len();
    (out, collapsed)
}

/// [`dedup_series`] over every entity in a dataset.
#[must_use]
pub fn dedup_dataset(dataset: Dataset) -> Dataset {
    dataset
        .into_iter()
        .map(|(entity, series)| {
            let (series, collapsed) = dedup_series(series);
            if collapsed > 0 {
                tracing::debug!(entity = %entity, collapsed, "collapsed duplicate timestamps");
            }
            (entity, series)
        })
        .collect()
}
