//! Canonical daily records and the collections built from them.

use core::fmt;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Named numeric value carried by a [`Record`].
///
/// Serde names match the field names downstream consumers already use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Staking APY, in percent.
    #[serde(rename = "apyPercentage")]
    ApyPercentage,
    /// Pool total value locked, in USD.
    #[serde(rename = "tvlUsd")]
    TvlUsd,
    /// Token price, in USD.
    #[serde(rename = "priceUsd")]
    PriceUsd,
    /// Pool fees collected over the day, in USD.
    #[serde(rename = "feesUSD")]
    FeesUsd,
    /// Pool volume traded over the day, in USD.
    #[serde(rename = "volumeUSD")]
    VolumeUsd,
}

impl Metric {
    /// Wire name of the metric.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApyPercentage => "apyPercentage",
            Self::TvlUsd => "tvlUsd",
            Self::PriceUsd => "priceUsd",
            Self::FeesUsd => "feesUSD",
            Self::VolumeUsd => "volumeUSD",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String attribute attached to a record after reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    /// On-chain address of the pool a record describes.
    PoolAddress,
    /// Uppercase ticker of the token a record describes.
    TokenSymbol,
}

/// One day of data for one entity.
///
/// Invariants: `timestamp` is a UTC day start and every metric is finite. The
/// normalizer is the only producer of records from untrusted input and enforces
/// both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// UTC calendar day at 00:00:00.
    pub timestamp: DateTime<Utc>,
    /// Metric values for the day.
    pub metrics: BTreeMap<Metric, f64>,
    /// Attributes attached by the orchestrator or aligner.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<Tag, String>,
}

impl Record {
    /// Create a record with no metrics for the given instant.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            metrics: BTreeMap::new(),
            tags: BTreeMap::new(),
        }
    }

    /// Builder-style metric insert.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.metrics.insert(metric, value);
        self
    }

    /// Builder-style tag insert.
    #[must_use]
    pub fn with_tag(mut self, tag: Tag, value: impl Into<String>) -> Self {
        self.tags.insert(tag, value.into());
        self
    }

    /// Metric value, if present.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(&metric).copied()
    }

    /// Tag value, if present.
    #[must_use]
    pub fn tag(&self, tag: Tag) -> Option<&str> {
        self.tags.get(&tag).map(String::as_str)
    }

    /// Calendar day (UTC) of the record.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Ordered records for one entity.
pub type Series = Vec<Record>;

/// Entity name → series, for one category.
pub type Dataset = BTreeMap<String, Series>;

/// Entity name → ordered missing day starts. Lives between gap detection and filling.
pub type MissingDateSet = BTreeMap<String, Vec<DateTime<Utc>>>;

/// Entity name → raw provider payload, as fetched.
pub type RawPayload = BTreeMap<String, serde_json::Value>;

/// UTC instant at 00:00:00 of `date`.
#[must_use]
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Truncate an instant to the start of its UTC day.
#[must_use]
pub fn floor_to_day(ts: DateTime<Utc>) -> DateTime<Utc> {
    day_start(ts.date_naive())
}
