// Shared builders for orchestrator tests. Not every test file uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde_json::{Value, json};
use tidemark::{EntityCatalog, PoolEntry, StakingEntry, Tidemark, TidemarkBuilder, TokenEntry};
use tidemark_mock::{DynamicMockController, DynamicMockFeed, MemoryStore, MockFeed};

pub const STAKING: &str = "lido";
pub const POOL: &str = "p1";
pub const POOL_YIELD_KEY: &str = "pool-p1";
pub const POOL_ADDRESS: &str = "0x00000000000000000000000000000000000000p1";
pub const TOKEN: &str = "eth";
pub const TOKEN_KEY: &str = "ethereum";

/// Rows a full `MockFeed` run persists: one staking entity, three tokens, two
/// pools, ten days each.
pub const MOCK_STAKING_ROWS: usize = 10;
pub const MOCK_PRICE_ROWS: usize = 30;
pub const MOCK_ACTIVITY_ROWS: usize = 20;
pub const MOCK_TOTAL_ROWS: usize = MOCK_STAKING_ROWS + MOCK_PRICE_ROWS + MOCK_ACTIVITY_ROWS;

/// Construct a UTC midnight `DateTime` for readability in tests.
pub fn dt(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("invalid date")
        .and_hms_opt(0, 0, 0)
        .expect("invalid time")
        .and_utc()
}

/// Day `offset` after 2024-03-01.
pub fn day(offset: u64) -> DateTime<Utc> {
    dt(2024, 3, 1)
        .checked_add_days(Days::new(offset))
        .expect("day in range")
}

/// Yield chart payload with one point per `(offset, apy, tvl)`.
pub fn yield_payload(points: &[(u64, f64, f64)]) -> Value {
    Value::Array(
        points
            .iter()
            .map(|(d, apy, tvl)| {
                json!({ "timestamp": day(*d).to_rfc3339(), "apy": apy, "tvlUsd": tvl })
            })
            .collect(),
    )
}

/// Price payload of `[epochMillis, price]` tuples, oldest first.
pub fn price_payload(points: &[(u64, f64)]) -> Value {
    Value::Array(
        points
            .iter()
            .map(|(d, p)| json!([day(*d).timestamp_millis(), p]))
            .collect(),
    )
}

/// Pool day data payload, newest first, values as strings like the subgraph.
pub fn activity_payload(days: &[u64]) -> Value {
    let mut out: Vec<Value> = days
        .iter()
        .map(|d| {
            json!({
                "date": day(*d).timestamp(),
                "feesUSD": format!("{}", 100.5 + *d as f64),
                "volumeUSD": format!("{}", 200_000.25 + *d as f64),
            })
        })
        .collect();
    out.reverse();
    Value::Array(out)
}

/// Catalog with one staking entity, one pool, and one token.
pub fn small_catalog() -> EntityCatalog {
    let mut catalog = EntityCatalog {
        staking: Some(StakingEntry {
            name: STAKING.into(),
            yield_key: STAKING.into(),
        }),
        ..EntityCatalog::default()
    };
    catalog.pools.insert(
        POOL.into(),
        PoolEntry {
            yield_key: POOL_YIELD_KEY.into(),
            address: POOL_ADDRESS.into(),
        },
    );
    catalog.tokens.insert(
        TOKEN.into(),
        TokenEntry {
            price_key: TOKEN_KEY.into(),
            symbol: "eth".into(),
        },
    );
    catalog
}

/// Builder wired to the fixture `MockFeed` and its catalog.
pub fn mock_builder(store: &MemoryStore) -> TidemarkBuilder {
    Tidemark::builder()
        .with_connector(Arc::new(MockFeed::new()))
        .with_store(Arc::new(store.clone()))
        .catalog(MockFeed::catalog())
        .rng_seed(7)
}

/// Orchestrator over a dynamic mock and `small_catalog()`.
pub fn dynamic_tidemark(store: &MemoryStore) -> (Tidemark, DynamicMockController) {
    let (feed, controller) = DynamicMockFeed::new_with_controller("dyn");
    let tidemark = Tidemark::builder()
        .with_connector(feed)
        .with_store(Arc::new(store.clone()))
        .catalog(small_catalog())
        .rng_seed(11)
        .build()
        .expect("valid builder");
    (tidemark, controller)
}
