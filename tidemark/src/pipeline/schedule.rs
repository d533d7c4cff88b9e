use std::sync::Arc;

use tidemark_core::{RunOutcome, ScheduleConfig, ScheduleHandle, TidemarkError};
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;

use crate::Tidemark;

impl Tidemark {
    /// Spawn a periodic trigger loop.
    ///
    /// With `run_on_startup` a run is triggered immediately, then once per
    /// `interval`. Each trigger spawns its own run, so a trigger that fires
    /// while a run is in flight is skipped by the run gate rather than
    /// queued. Dropping or stopping the handle ends the loop; an in-flight run
    /// finishes on its own.
    ///
    /// Must be called within a Tokio runtime.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `interval` is zero.
    pub fn schedule(self: Arc<Self>, cfg: ScheduleConfig) -> Result<ScheduleHandle, TidemarkError> {
        if cfg.interval.is_zero() {
            return Err(TidemarkError::InvalidArg(
                "schedule interval must be positive".to_string(),
            ));
        }
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cfg.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick resolves immediately.
            ticker.tick().await;
            if cfg.run_on_startup {
                spawn_run(&self, "startup");
            }
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => spawn_run(&self, "interval"),
                }
            }
            tracing::debug!("schedule loop stopped");
        });
        Ok(ScheduleHandle::new(task, stop_tx))
    }
}

fn spawn_run(tidemark: &Arc<Tidemark>, trigger: &'static str) {
    let tidemark = Arc::clone(tidemark);
    tokio::spawn(async move {
        match tidemark.run().await {
            Ok(RunOutcome::Completed(report)) => tracing::info!(
                trigger,
                inserted = report.inserted(),
                duplicates = report.duplicates(),
                warnings = report.warnings.len(),
                "scheduled run completed"
            ),
            Ok(RunOutcome::Skipped) => {
                tracing::info!(trigger, "previous run still in progress; trigger skipped");
            }
            // Already logged at error level by `run`.
            Err(_) => {}
        }
    });
}
