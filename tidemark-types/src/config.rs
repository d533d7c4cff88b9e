//! Configuration types shared by the orchestrator and the timeseries stages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default rolling window, in daily records, kept per series.
pub const DEFAULT_WINDOW_LEN: usize = 365;

/// Neighbor search used when synthesizing a record for a missing day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapFillConfig {
    /// How many days to look backward and forward from the missing day.
    pub search_days: u32,
    /// Maximum number of real records collected on each side.
    pub neighbors_per_side: usize,
}

impl Default for GapFillConfig {
    fn default() -> Self {
        Self {
            search_days: 7,
            neighbors_per_side: 2,
        }
    }
}

/// Global configuration for the `Tidemark` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TidemarkConfig {
    /// Maximum number of daily records kept per series (most recent wins).
    ///
    /// `0` is treated as invalid and disables trimming, with a warning.
    pub window_len: usize,
    /// Neighbor search parameters for gap synthesis.
    pub gap_fill: GapFillConfig,
    /// Optional timeout applied to each per-entity provider call.
    ///
    /// `None` leaves calls unbounded: a hung provider stalls the run until the
    /// underlying I/O fails.
    pub fetch_timeout: Option<Duration>,
    /// Optional seed for gap synthesis. When unset each run seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for TidemarkConfig {
    fn default() -> Self {
        Self {
            window_len: DEFAULT_WINDOW_LEN,
            gap_fill: GapFillConfig::default(),
            fetch_timeout: None,
            rng_seed: None,
        }
    }
}

/// Periodic trigger configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Time between scheduled runs.
    pub interval: Duration,
    /// Run once immediately when the schedule starts.
    pub run_on_startup: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(24 * 60 * 60),
            run_on_startup: true,
        }
    }
}
