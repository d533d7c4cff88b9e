//! tidemark-core
//!
//! Record model, collaborator traits, and reconciliation stages shared across
//! the tidemark workspace.
//!
//! - `record`: canonical daily records, series, and datasets.
//! - `rows`: storage-facing row shapes and their natural keys.
//! - `connector`: feed role traits, the `FeedConnector` interface, and `HistoryStore`.
//! - `timeseries`: normalize, dedup, trim, gap detection and filling, alignment.
//! - `schedule`: handle type for the periodic trigger loop.
//!
//! Async runtime (Tokio)
//! ---------------------
//! The reconciliation stages are synchronous. `schedule::ScheduleHandle` wraps a
//! `tokio::task::JoinHandle<()>` and a `tokio::sync::oneshot::Sender<()>`, so
//! code that schedules runs must execute under a Tokio 1.x runtime.
#![warn(missing_docs)]

/// Feed role traits, the primary `FeedConnector` interface, and the store trait.
pub mod connector;
/// Half-away-from-zero decimal rounding.
pub mod decimal;
/// Canonical record, series, and dataset types.
pub mod record;
/// Persisted row shapes.
pub mod rows;
/// Periodic trigger handle.
pub mod schedule;
/// Reconciliation stages.
pub mod timeseries;
pub mod types;

pub use connector::{FeedConnector, HistoryStore};
pub use record::{Dataset, Metric, MissingDateSet, RawPayload, Record, Series, Tag};
pub use rows::{HistoryRow, NaturalKey, PoolActivityRow, PriceRow, YieldRow};
pub use schedule::ScheduleHandle;
pub use timeseries::align::align_pool_activity;
pub use timeseries::dedup::{dedup_dataset, dedup_series};
pub use timeseries::extract::ExtractionSpec;
pub use timeseries::fill::{fill_gaps, fill_series};
pub use timeseries::gaps::{detect_gaps, detect_gaps_in_window, missing_days, missing_days_in_window};
pub use timeseries::normalize::normalize;
pub use timeseries::reconcile::{ReconcileParams, reconcile_dataset};
pub use timeseries::window::{trim_dataset, trim_series};
pub use types::*;
