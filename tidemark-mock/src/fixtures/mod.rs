//! Deterministic payloads shaped like the real upstream feeds.
//!
//! Every series spans ten days starting 2024-01-01 with one day missing, so a
//! full run exercises gap filling. TVL and activity gaps sit on different days
//! and both fill back to the same ten timestamps, so alignment succeeds.

use chrono::{DateTime, Days, NaiveDate, Utc};

pub mod activity;
pub mod prices;
pub mod yields;

pub const SPAN_DAYS: u64 = 10;

pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

pub fn day(offset: u64) -> DateTime<Utc> {
    base_date()
        .checked_add_days(Days::new(offset))
        .unwrap_or_default()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

/// Offsets in `0..SPAN_DAYS` except `skip`.
pub fn offsets_without(skip: u64) -> impl Iterator<Item = u64> {
    (0..SPAN_DAYS).filter(move |d| *d != skip)
}
