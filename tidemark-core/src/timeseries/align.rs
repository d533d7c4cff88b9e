use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::record::{Dataset, Metric, Tag};

/// First inconsistency found between the TVL and activity datasets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignMismatch {
    /// An activity entity has no TVL series.
    #[error("no TVL series for {entity}")]
    MissingTvl {
        /// Entity name.
        entity: String,
    },
    /// Series lengths differ.
    #[error("{entity}: TVL has {tvl} records, activity has {activity}")]
    Length {
        /// Entity name.
        entity: String,
        /// TVL series length.
        tvl: usize,
        /// Activity series length.
        activity: usize,
    },
    /// Timestamps disagree at a position.
    #[error("{entity}: timestamps differ at index {index} ({tvl} vs {activity})")]
    Timestamp {
        /// Entity name.
        entity: String,
        /// Position in both series.
        index: usize,
        /// TVL timestamp.
        tvl: DateTime<Utc>,
        /// Activity timestamp.
        activity: DateTime<Utc>,
    },
    /// A TVL record lacks the TVL metric.
    #[error("{entity}: TVL record at index {index} has no tvlUsd")]
    MissingTvlValue {
        /// Entity name.
        entity: String,
        /// Position in the TVL series.
        index: usize,
    },
    /// No pool address is configured for the entity.
    #[error("no pool address configured for {entity}")]
    MissingAddress {
        /// Entity name.
        entity: String,
    },
}

/// Enrich activity records with the matching TVL value and pool address.
///
/// Inputs must already be reconciled (sorted, unique). Alignment is strictly
/// positional. On any mismatch the whole result is discarded and an empty
/// dataset is returned.
#[must_use]
pub fn align_pool_activity(
    tvl: &Dataset,
    activity: Dataset,
    addresses: &BTreeMap<String, String>,
) -> Dataset {
    match try_align(tvl, activity, addresses) {
        Ok(ds) => ds,
        Err(mismatch) => {
            tracing::warn!(%mismatch, "pool activity does not align with TVL; discarding all activity");
            Dataset::new()
        }
    }
}

/// Fallible form of [`align_pool_activity`] that reports the first mismatch.
///
/// # Errors
/// Returns the first [`AlignMismatch`] found, in entity-name order.
pub fn try_align(
    tvl: &Dataset,
    activity: Dataset,
    addresses: &BTreeMap<String, String>,
) -> Result<Dataset, AlignMismatch> {
    let mut out = Dataset::new();
    for (entity, mut series) in activity {
        let Some(tvl_series) = tvl.get(&entity) else {
            return Err(AlignMismatch::MissingTvl { entity });
        };
        if tvl_series.len() != series.len() {
            return Err(AlignMismatch::Length {
                tvl: tvl_series.len(),
                activity: series.len(),
                entity,
            });
        }
        let Some(address) = addresses.get(&entity) else {
            return Err(AlignMismatch::MissingAddress { entity });
        };
        for (index, (t, a)) in tvl_series.iter().zip(series.iter_mut()).enumerate() {
            if t.timestamp != a.timestamp {
                return Err(AlignMismatch::Timestamp {
                    index,
                    tvl: t.timestamp,
                    activity: a.timestamp,
                    entity,
                });
            }
            let Some(value) = t.metric(Metric::TvlUsd) else {
                return Err(AlignMismatch::MissingTvlValue { index, entity });
            };
            a.metrics.insert(Metric::TvlUsd, value);
            a.tags.insert(Tag::PoolAddress, address.clone());
        }
        out.insert(entity, series);
    }
    Ok(out)
}
