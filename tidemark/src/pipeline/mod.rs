//! Pipeline stages driven by the orchestrator.
//!
//! - `fetch`: concurrent per-category, per-entity fetch fan-out
//! - `reconcile`: per-category reconcile pass, symbol tagging, TVL alignment
//! - `persist`: sequential create-or-reject persistence
//! - `schedule`: periodic trigger loop
pub mod fetch;
pub mod persist;
pub mod reconcile;
pub mod schedule;
pub mod util;

use tidemark_core::{Category, ReconcileParams, RunOutcome, RunReport, TidemarkError};

use crate::Tidemark;
use crate::pipeline::persist::persist_dataset;
use crate::pipeline::reconcile::reconcile_feeds;

impl Tidemark {
    /// Execute one pipeline run.
    ///
    /// Behavior:
    /// - Returns `Skipped` immediately if another run holds the gate.
    /// - Fetches the three categories concurrently. Failed or malformed
    ///   entities become warnings and empty series; only a category-level
    ///   fault fails the run before anything is persisted.
    /// - Reconciles each category, aligns pool activity with TVL, and tags
    ///   price records with their uppercase symbol.
    /// - Persists staking, then price, then pool activity, record by record.
    ///   Duplicate rejections are counted, not fatal.
    ///
    /// # Errors
    /// Returns the first fatal fetch or persistence error. Rows persisted by
    /// earlier categories stay committed.
    #[tracing::instrument(name = "tidemark::run", skip(self))]
    pub async fn run(&self) -> Result<RunOutcome, TidemarkError> {
        let Some(_gate) = self.try_begin_run() else {
            tracing::info!("run already in progress; skipping");
            return Ok(RunOutcome::Skipped);
        };
        match self.run_once().await {
            Ok(report) => {
                tracing::info!(
                    inserted = report.inserted(),
                    duplicates = report.duplicates(),
                    warnings = report.warnings.len(),
                    "run completed"
                );
                Ok(RunOutcome::Completed(report))
            }
            Err(e) => {
                tracing::error!(error = %e, "run failed");
                Err(e)
            }
        }
    }

    async fn run_once(&self) -> Result<RunReport, TidemarkError> {
        let feeds = self.fetch_all().await?;

        let mut report = RunReport::default();
        report.warnings.extend(feeds.yields.warnings.iter().cloned());
        report.warnings.extend(feeds.prices.warnings.iter().cloned());
        report.warnings.extend(feeds.activity.warnings.iter().cloned());

        let reconciled = {
            let mut rng = self.rng();
            reconcile_feeds(feeds, &self.catalog, &ReconcileParams::from(&self.cfg), &mut rng)
        };

        let store = self.store.as_ref();
        for (category, dataset) in [
            (Category::Yield, &reconciled.staking),
            (Category::Price, &reconciled.prices),
            (Category::PoolActivity, &reconciled.activity),
        ] {
            let tally = persist_dataset(store, category, dataset).await?;
            report.tallies.insert(category, tally);
        }
        Ok(report)
    }
}
