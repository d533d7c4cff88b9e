use core::fmt;

use serde_json::Value;

use crate::record::Metric;
use crate::rows::{APY_DECIMALS, USD_DECIMALS};

/// Location of a value inside one raw payload element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef {
    /// Object member by name.
    Key(String),
    /// Tuple position.
    Index(usize),
}

impl FieldRef {
    /// Shorthand for [`FieldRef::Key`].
    pub fn key(name: impl Into<String>) -> Self {
        Self::Key(name.into())
    }

    /// Resolve against an element. An explicit JSON `null` counts as absent.
    #[must_use]
    pub fn lookup<'a>(&self, element: &'a Value) -> Option<&'a Value> {
        let v = match self {
            Self::Key(k) => element.as_object()?.get(k)?,
            Self::Index(i) => element.as_array()?.get(*i)?,
        };
        (!v.is_null()).then_some(v)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// How a raw timestamp value encodes its instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// Date-like string; only the leading `YYYY-MM-DD` is significant.
    DateString,
    /// Unix epoch seconds, as a JSON number.
    EpochSeconds,
    /// Unix epoch milliseconds, as a JSON number.
    EpochMillis,
}

/// Source of the record timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampField {
    /// Where the value lives.
    pub source: FieldRef,
    /// How it is encoded.
    pub format: TimestampFormat,
}

/// One metric to extract, and its output precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricField {
    /// Where the raw value lives. Numbers and numeric strings are accepted.
    pub source: FieldRef,
    /// Output metric name.
    pub metric: Metric,
    /// Decimal places kept after rounding half away from zero.
    pub decimals: u32,
}

/// Ordering of elements in a provider payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrder {
    /// Elements arrive oldest first.
    OldestFirst,
    /// Elements arrive newest first and are reversed before output.
    NewestFirst,
}

/// Value-extraction spec consumed by the normalizer.
///
/// Every listed metric is required: an element lacking any of them is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionSpec {
    /// Timestamp source.
    pub timestamp: TimestampField,
    /// Metrics to extract.
    pub metrics: Vec<MetricField>,
    /// Payload ordering.
    pub order: SourceOrder,
}

impl ExtractionSpec {
    fn single(timestamp: TimestampField, source: FieldRef, metric: Metric, decimals: u32) -> Self {
        Self {
            timestamp,
            metrics: vec![MetricField {
                source,
                metric,
                decimals,
            }],
            order: SourceOrder::OldestFirst,
        }
    }

    fn yield_feed(source: &str, metric: Metric, decimals: u32) -> Self {
        Self::single(
            TimestampField {
                source: FieldRef::key("timestamp"),
                format: TimestampFormat::DateString,
            },
            FieldRef::key(source),
            metric,
            decimals,
        )
    }

    /// Staking APY from the yield feed: `{timestamp, apy}`, 2 dp.
    #[must_use]
    pub fn staking_apy() -> Self {
        Self::yield_feed("apy", Metric::ApyPercentage, APY_DECIMALS)
    }

    /// Pool TVL from the yield feed: `{timestamp, tvlUsd}`, 6 dp.
    #[must_use]
    pub fn tvl() -> Self {
        Self::yield_feed("tvlUsd", Metric::TvlUsd, USD_DECIMALS)
    }

    /// Token price tuples: `[epochMillis, price]`, 6 dp.
    #[must_use]
    pub fn token_price() -> Self {
        Self::single(
            TimestampField {
                source: FieldRef::Index(0),
                format: TimestampFormat::EpochMillis,
            },
            FieldRef::Index(1),
            Metric::PriceUsd,
            USD_DECIMALS,
        )
    }

    /// Pool day data: `{date, feesUSD, volumeUSD}` newest first, 6 dp.
    #[must_use]
    pub fn pool_activity() -> Self {
        Self {
            timestamp: TimestampField {
                source: FieldRef::key("date"),
                format: TimestampFormat::EpochSeconds,
            },
            metrics: vec![
                MetricField {
                    source: FieldRef::key("feesUSD"),
                    metric: Metric::FeesUsd,
                    decimals: USD_DECIMALS,
                },
                MetricField {
                    source: FieldRef::key("volumeUSD"),
                    metric: Metric::VolumeUsd,
                    decimals: USD_DECIMALS,
                },
            ],
            order: SourceOrder::NewestFirst,
        }
    }
}
