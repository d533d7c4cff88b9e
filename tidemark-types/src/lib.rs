//! Tidemark error, configuration, catalog, and report types shared across the workspace.
#![warn(missing_docs)]

mod catalog;
mod category;
mod config;
mod error;
mod reports;

pub use catalog::{EntityCatalog, PoolEntry, StakingEntry, TokenEntry};
pub use category::Category;
pub use config::{DEFAULT_WINDOW_LEN, GapFillConfig, ScheduleConfig, TidemarkConfig};
pub use error::TidemarkError;
pub use reports::{CategoryTally, RunOutcome, RunReport};
