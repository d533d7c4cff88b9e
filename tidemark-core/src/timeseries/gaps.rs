use std::collections::BTreeSet;

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::record::{Dataset, MissingDateSet, Record, day_start};

/// Calendar days strictly between the first and last present day with no record.
///
/// Fewer than two distinct days yields nothing; days outside the observed span
/// are never produced.
#[must_use]
pub fn missing_days(series: &[Record]) -> Vec<DateTime<Utc>> {
    missing_days_from(series, None)
}

/// [`missing_days`] restricted to the trailing `window_len` calendar days
/// ending on the last present day.
///
/// Days before that floor could never survive a trim to `window_len` records
/// once the span is gap-free, so they are not produced. The output is bounded
/// by `window_len` however far apart the records are. A zero window has no
/// floor.
#[must_use]
pub fn missing_days_in_window(series: &[Record], window_len: usize) -> Vec<DateTime<Utc>> {
    let Some(last) = series.iter().map(Record::day).max() else {
        return Vec::new();
    };
    let floor = window_len
        .checked_sub(1)
        .and_then(|back| u64::try_from(back).ok())
        .and_then(|back| last.checked_sub_days(Days::new(back)));
    missing_days_from(series, floor)
}

fn missing_days_from(series: &[Record], floor: Option<NaiveDate>) -> Vec<DateTime<Utc>> {
    let days: BTreeSet<NaiveDate> = series.iter().map(Record::day).collect();
    let mut out = Vec::new();
    let mut present = days.into_iter();
    let Some(mut prev) = present.next() else {
        return out;
    };
    for day in present {
        let mut cursor = prev.succ_opt();
        if let (Some(c), Some(f)) = (cursor, floor)
            && c < f
        {
            cursor = Some(f);
        }
        while let Some(d) = cursor {
            if d >= day {
                break;
            }
            out.push(day_start(d));
            cursor = d.succ_opt();
        }
        prev = day;
    }
    out
}

/// Missing days per entity. Entities without gaps are omitted.
#[must_use]
pub fn detect_gaps(dataset: &Dataset) -> MissingDateSet {
    dataset
        .iter()
        .filter_map(|(entity, series)| {
            let missing = missing_days(series);
            if missing.is_empty() {
                return None;
            }
            tracing::debug!(entity = %entity, missing = missing.len(), "detected calendar gaps");
            Some((entity.clone(), missing))
        })
        .collect()
}

/// [`detect_gaps`] bounded per entity by [`missing_days_in_window`].
#[must_use]
pub fn detect_gaps_in_window(dataset: &Dataset, window_len: usize) -> MissingDateSet {
    dataset
        .iter()
        .filter_map(|(entity, series)| {
            let missing = missing_days_in_window(series, window_len);
            if missing.is_empty() {
                return None;
            }
            tracing::debug!(
                entity = %entity,
                missing = missing.len(),
                window_len,
                "detected calendar gaps in window"
            );
            Some((entity.clone(), missing))
        })
        .collect()
}
