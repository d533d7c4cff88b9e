use async_trait::async_trait;
use serde_json::Value;

use crate::TidemarkError;
use crate::rows::HistoryRow;

/// Focused role trait for connectors that serve daily yield history (APY and TVL).
#[async_trait]
pub trait YieldProvider: Send + Sync {
    /// Fetch the raw daily yield series for a provider-specific pool key.
    ///
    /// Returns the payload array as delivered upstream; shape checks happen in
    /// the normalizer.
    async fn yield_history(&self, pool_key: &str) -> Result<Value, TidemarkError>;
}

/// Focused role trait for connectors that serve daily token prices.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch `days` of raw daily price points for a provider-specific token key.
    async fn price_history(&self, token_key: &str, days: u32) -> Result<Value, TidemarkError>;
}

/// Focused role trait for connectors that serve daily pool volume and fees.
#[async_trait]
pub trait PoolActivityProvider: Send + Sync {
    /// Fetch up to `days` of raw daily activity entries for a pool address.
    async fn pool_activity(&self, pool_address: &str, days: u32)
    -> Result<Value, TidemarkError>;
}

/// Upstream data source advertising one or more role capabilities.
pub trait FeedConnector: Send + Sync {
    /// A stable identifier used in logs and errors (e.g., "tidemark-llama").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise yield capability by returning a usable trait object reference when supported.
    fn as_yield_provider(&self) -> Option<&dyn YieldProvider> {
        None
    }

    /// Advertise price capability by returning a usable trait object reference when supported.
    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        None
    }

    /// Advertise pool activity capability by returning a usable trait object reference when supported.
    fn as_pool_activity_provider(&self) -> Option<&dyn PoolActivityProvider> {
        None
    }
}

/// Persistence collaborator for reconciled rows.
///
/// Implementations must enforce uniqueness on [`HistoryRow::natural_key`] and
/// report a collision as [`TidemarkError::AlreadyExists`]. Any other error is
/// treated as fatal for the run.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// A stable identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Insert one row.
    async fn create(&self, row: &HistoryRow) -> Result<(), TidemarkError>;
}
