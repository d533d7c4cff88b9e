use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Days, NaiveDate, Utc};
use rand::Rng;

use crate::GapFillConfig;
use crate::record::{Dataset, Metric, MissingDateSet, Record, Series, day_start};

/// Real records found around a missing day.
#[derive(Debug, Default)]
struct Neighbors<'a> {
    before: Vec<&'a Record>,
    after: Vec<&'a Record>,
}

impl<'a> Neighbors<'a> {
    /// Walk outward day by day, taking at most `neighbors_per_side` records per side.
    fn around(
        index: &BTreeMap<NaiveDate, &'a Record>,
        day: NaiveDate,
        config: &GapFillConfig,
    ) -> Self {
        let want = config.neighbors_per_side;
        let mut found = Self::default();
        for offset in 1..=u64::from(config.search_days) {
            if found.before.len() >= want && found.after.len() >= want {
                break;
            }
            let step = Days::new(offset);
            if found.before.len() < want
                && let Some(r) = day.checked_sub_days(step).and_then(|d| index.get(&d).copied())
            {
                found.before.push(r);
            }
            if found.after.len() < want
                && let Some(r) = day.checked_add_days(step).and_then(|d| index.get(&d).copied())
            {
                found.after.push(r);
            }
        }
        found
    }

    fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    fn synthesize<R: Rng>(&self, timestamp: DateTime<Utc>, rng: &mut R) -> Record {
        let metrics: BTreeSet<Metric> = self
            .before
            .iter()
            .chain(&self.after)
            .flat_map(|r| r.metrics.keys().copied())
            .collect();
        let mut out = Record::new(timestamp);
        for metric in metrics {
            let value = synthesize_value(
                side_mean(&self.before, metric),
                side_mean(&self.after, metric),
                rng,
            );
            out.metrics.insert(metric, value);
        }
        out
    }
}

fn side_mean(records: &[&Record], metric: Metric) -> Option<f64> {
    let values: Vec<f64> = records.iter().filter_map(|r| r.metric(metric)).collect();
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    Some(values.iter().sum::<f64>() / n)
}

/// Synthesize one metric value from the mean of each side.
///
/// Both sides: uniform draw from `[min, max)`. One side: that mean. Neither:
/// zero. The result is always truncated toward zero to an integer.
pub fn synthesize_value<R: Rng>(before: Option<f64>, after: Option<f64>, rng: &mut R) -> f64 {
    let v = match (before, after) {
        (Some(b), Some(a)) => {
            let (lo, hi) = if b <= a { (b, a) } else { (a, b) };
            if lo < hi && (hi - lo).is_finite() {
                rng.random_range(lo..hi)
            } else {
                lo
            }
        }
        (Some(x), None) | (None, Some(x)) => x,
        (None, None) => 0.0,
    };
    v.trunc()
}

/// Insert a synthesized record for every missing day and re-sort.
///
/// Neighbors are looked up among the records present on input, never among
/// records synthesized in the same pass. Days already present are skipped.
/// A day with no neighbor in the search window gets zeros for the metrics of
/// the first record.
pub fn fill_series<R: Rng>(
    entity: &str,
    series: Series,
    missing: &[DateTime<Utc>],
    config: &GapFillConfig,
    rng: &mut R,
) -> Series {
    let Some(template) = series.first() else {
        return series;
    };
    let index: BTreeMap<NaiveDate, &Record> = series.iter().map(|r| (r.day(), r)).collect();

    let mut synthesized = Vec::with_capacity(missing.len());
    for ts in missing {
        let day = ts.date_naive();
        if index.contains_key(&day) {
            continue;
        }
        let neighbors = Neighbors::around(&index, day, config);
        let record = if neighbors.is_empty() {
            tracing::warn!(entity, day = %day, "no neighbors within search window; zero-filling");
            zero_record(day_start(day), template)
        } else {
            neighbors.synthesize(day_start(day), rng)
        };
        synthesized.push(record);
    }

    if synthesized.is_empty() {
        return series;
    }
    tracing::debug!(entity, filled = synthesized.len(), "filled calendar gaps");
    let mut out = series;
    out.extend(synthesized);
    out.sort_by_key(|r| r.timestamp);
    out
}

fn zero_record(timestamp: DateTime<Utc>, template: &Record) -> Record {
    let mut out = Record::new(timestamp);
    for metric in template.metrics.keys() {
        out.metrics.insert(*metric, 0.0);
    }
    out
}

/// [`fill_series`] for every entity with an entry in `missing`.
pub fn fill_gaps<R: Rng>(
    dataset: Dataset,
    missing: &MissingDateSet,
    config: &GapFillConfig,
    rng: &mut R,
) -> Dataset {
    dataset
        .into_iter()
        .map(|(entity, series)| {
            let series = match missing.get(&entity) {
                Some(days) if !days.is_empty() => {
                    fill_series(&entity, series, days, config, rng)
                }
                _ => series,
            };
            (entity, series)
        })
        .collect()
}
