//! Storage-facing rows converted from reconciled records.
//!
//! Each category persists a fixed shape with fixed decimal precision. The
//! conversions are fallible: a record lacking a required metric or tag is a
//! data error, and the caller decides whether to skip it.

use core::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::scaled;
use crate::record::{Metric, Record, Tag};
use crate::{Category, TidemarkError};

/// Decimal places kept for APY values.
pub const APY_DECIMALS: u32 = 2;
/// Decimal places kept for USD amounts.
pub const USD_DECIMALS: u32 = 6;

/// One persisted staking APY observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldRow {
    /// UTC day start.
    pub timestamp: DateTime<Utc>,
    /// APY in percent, 2 decimal places.
    pub apy_percentage: Decimal,
}

/// One persisted daily token price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRow {
    /// UTC day start.
    pub timestamp: DateTime<Utc>,
    /// Uppercase ticker.
    pub token_symbol: String,
    /// Price in USD, 6 decimal places.
    pub price_usd: Decimal,
}

/// One persisted day of pool activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolActivityRow {
    /// UTC day start.
    pub timestamp: DateTime<Utc>,
    /// On-chain pool address.
    pub pool_address: String,
    /// Total value locked in USD, 6 decimal places.
    pub tvl_usd: Decimal,
    /// Daily volume in USD, 6 decimal places.
    pub volume_24h_usd: Decimal,
    /// Daily fees in USD, 6 decimal places.
    pub fees_24h_usd: Decimal,
}

/// Any persisted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "kebab-case")]
pub enum HistoryRow {
    /// Staking APY.
    Yield(YieldRow),
    /// Token price.
    Price(PriceRow),
    /// Pool TVL, volume, and fees.
    PoolActivity(PoolActivityRow),
}

/// Uniqueness key enforced by stores.
///
/// Staking rows are unique per day; price rows per day and symbol; activity
/// rows per day and pool address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NaturalKey {
    /// Row category.
    pub category: Category,
    /// UTC day start.
    pub timestamp: DateTime<Utc>,
    /// Token symbol or pool address; `None` for staking rows.
    pub discriminator: Option<String>,
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.category,
            self.discriminator.as_deref().unwrap_or("-"),
            self.timestamp.format("%Y-%m-%d")
        )
    }
}

impl HistoryRow {
    /// Category the row belongs to.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Yield(_) => Category::Yield,
            Self::Price(_) => Category::Price,
            Self::PoolActivity(_) => Category::PoolActivity,
        }
    }

    /// Row timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Yield(r) => r.timestamp,
            Self::Price(r) => r.timestamp,
            Self::PoolActivity(r) => r.timestamp,
        }
    }

    /// Key the store must keep unique.
    #[must_use]
    pub fn natural_key(&self) -> NaturalKey {
        let discriminator = match self {
            Self::Yield(_) => None,
            Self::Price(r) => Some(r.token_symbol.clone()),
            Self::PoolActivity(r) => Some(r.pool_address.clone()),
        };
        NaturalKey {
            category: self.category(),
            timestamp: self.timestamp(),
            discriminator,
        }
    }
}

fn required_metric(record: &Record, metric: Metric) -> Result<f64, TidemarkError> {
    record.metric(metric).ok_or_else(|| {
        TidemarkError::Data(format!(
            "record at {} is missing metric {metric}",
            record.timestamp
        ))
    })
}

fn required_tag(record: &Record, tag: Tag) -> Result<String, TidemarkError> {
    record.tag(tag).map(str::to_owned).ok_or_else(|| {
        TidemarkError::Data(format!(
            "record at {} is missing tag {tag:?}",
            record.timestamp
        ))
    })
}

fn to_decimal(value: f64, dp: u32, metric: Metric) -> Result<Decimal, TidemarkError> {
    scaled(value, dp)
        .ok_or_else(|| TidemarkError::Data(format!("{metric} value {value} is not representable")))
}

impl TryFrom<&Record> for YieldRow {
    type Error = TidemarkError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let apy = required_metric(record, Metric::ApyPercentage)?;
        Ok(Self {
            timestamp: record.timestamp,
            apy_percentage: to_decimal(apy, APY_DECIMALS, Metric::ApyPercentage)?,
        })
    }
}

impl TryFrom<&Record> for PriceRow {
    type Error = TidemarkError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let price = required_metric(record, Metric::PriceUsd)?;
        Ok(Self {
            timestamp: record.timestamp,
            token_symbol: required_tag(record, Tag::TokenSymbol)?,
            price_usd: to_decimal(price, USD_DECIMALS, Metric::PriceUsd)?,
        })
    }
}

impl TryFrom<&Record> for PoolActivityRow {
    type Error = TidemarkError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        let tvl = required_metric(record, Metric::TvlUsd)?;
        let volume = required_metric(record, Metric::VolumeUsd)?;
        let fees = required_metric(record, Metric::FeesUsd)?;
        Ok(Self {
            timestamp: record.timestamp,
            pool_address: required_tag(record, Tag::PoolAddress)?,
            tvl_usd: to_decimal(tvl, USD_DECIMALS, Metric::TvlUsd)?,
            volume_24h_usd: to_decimal(volume, USD_DECIMALS, Metric::VolumeUsd)?,
            fees_24h_usd: to_decimal(fees, USD_DECIMALS, Metric::FeesUsd)?,
        })
    }
}

impl HistoryRow {
    /// Convert a reconciled record into the row shape of `category`.
    ///
    /// # Errors
    /// Returns [`TidemarkError::Data`] when a required metric or tag is absent
    /// or a value cannot be represented as a decimal.
    pub fn from_record(category: Category, record: &Record) -> Result<Self, TidemarkError> {
        match category {
            Category::Yield => YieldRow::try_from(record).map(Self::Yield),
            Category::Price => PriceRow::try_from(record).map(Self::Price),
            Category::PoolActivity => PoolActivityRow::try_from(record).map(Self::PoolActivity),
        }
    }
}
