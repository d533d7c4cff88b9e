//! Mock feeds and an in-memory store for CI-safe tests and examples.
use async_trait::async_trait;
use serde_json::Value;
use tidemark_core::connector::{
    FeedConnector, PoolActivityProvider, PriceProvider, YieldProvider,
};
use tidemark_core::{EntityCatalog, PoolEntry, StakingEntry, TidemarkError, TokenEntry};

mod fixtures;

/// Mock feed serving deterministic payloads from static fixtures.
///
/// The key `FAIL` fails every capability; the key `SLOW` answers after a short
/// delay so callers can exercise fetch timeouts.
pub struct MockFeed;

impl Default for MockFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFeed {
    /// Fixture-backed feed serving all three categories.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Catalog matching the fixture keys.
    #[must_use]
    pub fn catalog() -> EntityCatalog {
        let mut catalog = EntityCatalog {
            staking: Some(StakingEntry {
                name: "lido-steth".into(),
                yield_key: "lido-steth".into(),
            }),
            ..EntityCatalog::default()
        };
        catalog.pools.insert(
            "usdc-eth".into(),
            PoolEntry {
                yield_key: "pool-usdc-eth".into(),
                address: "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640".into(),
            },
        );
        catalog.pools.insert(
            "wbtc-eth".into(),
            PoolEntry {
                yield_key: "pool-wbtc-eth".into(),
                address: "0xcbcdf9626bc03e24f779434178a73a0b4bad62ed".into(),
            },
        );
        for (name, key, symbol) in [
            ("eth", "ethereum", "eth"),
            ("btc", "bitcoin", "btc"),
            ("usdc", "usd-coin", "usdc"),
        ] {
            catalog.tokens.insert(
                name.into(),
                TokenEntry {
                    price_key: key.into(),
                    symbol: symbol.into(),
                },
            );
        }
        catalog
    }

    fn not_found(what: &str) -> TidemarkError {
        TidemarkError::not_found(what.to_string())
    }

    async fn maybe_fail_or_delay(key: &str, capability: &'static str) -> Result<(), TidemarkError> {
        match key {
            "FAIL" => Err(TidemarkError::connector(
                "tidemark-mock",
                format!("forced failure: {capability}"),
            )),
            "SLOW" => {
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl FeedConnector for MockFeed {
    fn name(&self) -> &'static str {
        "tidemark-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_yield_provider(&self) -> Option<&dyn YieldProvider> {
        Some(self as &dyn YieldProvider)
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        Some(self as &dyn PriceProvider)
    }

    fn as_pool_activity_provider(&self) -> Option<&dyn PoolActivityProvider> {
        Some(self as &dyn PoolActivityProvider)
    }
}

#[async_trait]
impl YieldProvider for MockFeed {
    async fn yield_history(&self, pool_key: &str) -> Result<Value, TidemarkError> {
        Self::maybe_fail_or_delay(pool_key, "yield").await?;
        fixtures::yields::by_key(pool_key)
            .ok_or_else(|| Self::not_found(&format!("yield history for {pool_key}")))
    }
}

#[async_trait]
impl PriceProvider for MockFeed {
    async fn price_history(&self, token_key: &str, days: u32) -> Result<Value, TidemarkError> {
        Self::maybe_fail_or_delay(token_key, "price").await?;
        fixtures::prices::by_key(token_key, days)
            .ok_or_else(|| Self::not_found(&format!("price history for {token_key}")))
    }
}

#[async_trait]
impl PoolActivityProvider for MockFeed {
    async fn pool_activity(
        &self,
        pool_address: &str,
        days: u32,
    ) -> Result<Value, TidemarkError> {
        Self::maybe_fail_or_delay(pool_address, "pool activity").await?;
        fixtures::activity::by_address(pool_address, days)
            .ok_or_else(|| Self::not_found(&format!("pool activity for {pool_address}")))
    }
}

pub mod dynamic;
pub use dynamic::{DynamicMockController, DynamicMockFeed, MockBehavior};

pub mod store;
pub use store::MemoryStore;

/// Fixture timeline helpers for tests that assert on concrete days.
pub mod timeline {
    pub use crate::fixtures::{SPAN_DAYS, base_date, day};
}
