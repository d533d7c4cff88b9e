//! Tidemark fetches daily DeFi history from independent feeds, reconciles it
//! into gap-free daily series, and persists it.
//!
//! Overview
//! - Fetches staking yield, pool TVL, token prices, and pool activity through
//!   connectors implementing the `tidemark_core` role traits.
//! - Runs each category through one generic reconcile stage: normalize,
//!   de-duplicate, trim to the window, detect and fill calendar gaps, trim again.
//! - Aligns pool activity with pool TVL and discards all activity on any
//!   disagreement.
//! - Persists through a `HistoryStore` that rejects duplicate natural keys, so
//!   re-running over the same data is harmless.
//!
//! Key behaviors and trade-offs
//! - Runs are mutually exclusive: a trigger that arrives while a run is in
//!   flight is skipped, not queued.
//! - Per-entity fetch failures are isolated and reported as warnings. A
//!   category whose entities all failed, or whose payloads are malformed,
//!   comes back empty while the others still persist.
//! - Persistence is sequential (staking, price, pool activity) with no
//!   cross-category transaction; a failure leaves earlier categories committed.
//! - Gap synthesis draws uniformly between neighbor means and truncates to an
//!   integer. Seed the RNG for reproducible output.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use tidemark::{ScheduleConfig, Tidemark};
//! use tidemark_mock::{MemoryStore, MockFeed};
//!
//! let tidemark = Arc::new(
//!     Tidemark::builder()
//!         .with_connector(Arc::new(MockFeed::new()))
//!         .with_store(Arc::new(MemoryStore::new()))
//!         .catalog(MockFeed::catalog())
//!         .build()?,
//! );
//!
//! let outcome = tidemark.run().await?;
//! let handle = tidemark.clone().schedule(ScheduleConfig::default())?;
//! // ...
//! handle.stop().await;
//! ```
//!
//! See `tidemark/examples/` for a runnable demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
mod pipeline;

pub use core::{Tidemark, TidemarkBuilder};
pub use pipeline::reconcile::attach_symbols;
pub use pipeline::util::{call_with_timeout, collect_entities};

// Re-export core types for convenience
pub use tidemark_core::{
    Category, CategoryTally, Dataset, EntityCatalog, FeedConnector, GapFillConfig, HistoryRow,
    HistoryStore, Metric, PoolEntry, Record, RunOutcome, RunReport, ScheduleConfig,
    ScheduleHandle, Series, StakingEntry, Tag, TidemarkConfig, TidemarkError, TokenEntry,
};
