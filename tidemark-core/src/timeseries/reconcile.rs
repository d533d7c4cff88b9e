use rand::Rng;

use crate::record::{Dataset, RawPayload};
use crate::timeseries::dedup::dedup_dataset;
use crate::timeseries::extract::ExtractionSpec;
use crate::timeseries::fill::fill_gaps;
use crate::timeseries::gaps::detect_gaps_in_window;
use crate::timeseries::normalize::normalize;
use crate::timeseries::window::trim_dataset;
use crate::{GapFillConfig, TidemarkConfig};

/// Parameters shared by every reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileParams {
    /// Maximum records kept per series.
    pub window_len: usize,
    /// Gap filler search bounds.
    pub gap_fill: GapFillConfig,
}

impl From<&TidemarkConfig> for ReconcileParams {
    fn from(cfg: &TidemarkConfig) -> Self {
        Self {
            window_len: cfg.window_len,
            gap_fill: cfg.gap_fill,
        }
    }
}

/// Run raw per-entity payloads through normalize, dedup, trim, gap detection,
/// gap filling and a final trim.
///
/// Every output series is sorted, unique by timestamp, bounded by the window
/// and free of calendar gaps within its trailing `window_len` days. Older gaps
/// are never synthesized. Entities whose payload yields no valid
/// records map to an empty series.
pub fn reconcile_dataset<R: Rng>(
    payloads: &RawPayload,
    spec: &ExtractionSpec,
    params: &ReconcileParams,
    rng: &mut R,
) -> Dataset {
    let normalized: Dataset = payloads
        .iter()
        .map(|(entity, raw)| (entity.clone(), normalize(raw, spec, entity)))
        .collect();
    let deduped = dedup_dataset(normalized);
    let trimmed = trim_dataset(deduped, params.window_len);
    let missing = detect_gaps_in_window(&trimmed, params.window_len);
    let filled = fill_gaps(trimmed, &missing, &params.gap_fill, rng);
    trim_dataset(filled, params.window_len)
}
