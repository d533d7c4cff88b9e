//! Report envelopes produced by pipeline runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::TidemarkError;

/// Persistence counters for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryTally {
    /// Number of entities that produced a non-empty series.
    pub entities: usize,
    /// Rows the store accepted.
    pub inserted: usize,
    /// Rows the store rejected as already present.
    pub duplicates: usize,
    /// Records that could not be converted into a row and were skipped.
    pub dropped: usize,
}

/// Summary of a completed pipeline run.
///
/// Carries per-category persistence counters and any non-fatal warnings
/// encountered along the way, such as isolated per-entity fetch failures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Counters keyed by category.
    pub tallies: BTreeMap<Category, CategoryTally>,
    /// Non-fatal issues encountered while running.
    pub warnings: Vec<TidemarkError>,
}

impl RunReport {
    /// Counters for a category, zeroed if the category did not persist anything.
    #[must_use]
    pub fn tally(&self, category: Category) -> CategoryTally {
        self.tallies.get(&category).copied().unwrap_or_default()
    }

    /// Total rows accepted across categories.
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.tallies.values().map(|t| t.inserted).sum()
    }

    /// Total rows rejected as duplicates across categories.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.tallies.values().map(|t| t.duplicates).sum()
    }
}

/// Result of asking the orchestrator to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The run executed to completion.
    Completed(RunReport),
    /// Another run was already in flight; this trigger was skipped.
    Skipped,
}

impl RunOutcome {
    /// The report of a completed run, if any.
    #[must_use]
    pub const fn report(&self) -> Option<&RunReport> {
        match self {
            Self::Completed(r) => Some(r),
            Self::Skipped => None,
        }
    }

    /// Returns `true` if the trigger was skipped.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }
}
