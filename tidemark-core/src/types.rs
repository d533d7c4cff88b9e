//! Re-export of shared configuration, catalog, and report types from `tidemark-types`.
// Downstream crates can depend on `tidemark-core` only.

pub use tidemark_types::{Category, TidemarkError};
pub use tidemark_types::{DEFAULT_WINDOW_LEN, GapFillConfig, ScheduleConfig, TidemarkConfig};
pub use tidemark_types::{EntityCatalog, PoolEntry, StakingEntry, TokenEntry};
pub use tidemark_types::{CategoryTally, RunOutcome, RunReport};
