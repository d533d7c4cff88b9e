use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::decimal::round_half_away;
use crate::record::{Record, Series, day_start, floor_to_day};
use crate::timeseries::extract::{ExtractionSpec, SourceOrder, TimestampFormat};

/// Why a raw element did not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// A required field is absent or `null`.
    #[error("missing field {0}")]
    MissingField(String),
    /// The timestamp field could not be parsed into a valid instant.
    #[error("unparsable timestamp in {field}: {raw}")]
    BadTimestamp {
        /// Field name.
        field: String,
        /// Raw value as JSON text.
        raw: String,
    },
    /// A metric value is neither a number nor a numeric string.
    #[error("non-numeric value in {0}")]
    NotNumeric(String),
    /// A metric value parsed to NaN or an infinity.
    #[error("non-finite value in {0}")]
    NonFinite(String),
    /// A metric value cannot be rounded at the requested precision.
    #[error("value in {0} is outside the representable range")]
    OutOfRange(String),
}

/// Convert one provider's raw per-entity payload into canonical records,
/// oldest first.
///
/// Malformed elements are dropped and logged; this never fails. A non-array
/// payload yields an empty series.
#[must_use]
pub fn normalize(raw: &Value, spec: &ExtractionSpec, entity: &str) -> Series {
    let Some(elements) = raw.as_array() else {
        tracing::warn!(entity, kind = json_kind(raw), "payload is not an array; treating as empty");
        return Vec::new();
    };

    let mut dropped = 0usize;
    let mut out: Series = elements
        .iter()
        .enumerate()
        .filter_map(|(index, el)| match normalize_element(el, spec) {
            Ok(r) => Some(r),
            Err(reason) => {
                dropped += 1;
                tracing::debug!(entity, index, %reason, "dropping malformed element");
                None
            }
        })
        .collect();

    if spec.order == SourceOrder::NewestFirst {
        out.reverse();
    }
    if dropped > 0 {
        tracing::warn!(entity, dropped, kept = out.len(), "dropped malformed elements");
    }
    out
}

/// Validate and convert a single payload element.
///
/// # Errors
/// Returns the first [`Rejection`] encountered.
pub fn normalize_element(element: &Value, spec: &ExtractionSpec) -> Result<Record, Rejection> {
    let ts_field = &spec.timestamp.source;
    let raw_ts = ts_field
        .lookup(element)
        .ok_or_else(|| Rejection::MissingField(ts_field.to_string()))?;
    let timestamp =
        parse_timestamp(raw_ts, spec.timestamp.format).ok_or_else(|| Rejection::BadTimestamp {
            field: ts_field.to_string(),
            raw: raw_ts.to_string(),
        })?;

    let mut record = Record::new(timestamp);
    for field in &spec.metrics {
        let name = field.source.to_string();
        let raw = field
            .source
            .lookup(element)
            .ok_or_else(|| Rejection::MissingField(name.clone()))?;
        let value = parse_number(raw).ok_or_else(|| Rejection::NotNumeric(name.clone()))?;
        if !value.is_finite() {
            return Err(Rejection::NonFinite(name));
        }
        let rounded = round_half_away(value, field.decimals).ok_or(Rejection::OutOfRange(name))?;
        record.metrics.insert(field.metric, rounded);
    }
    Ok(record)
}

/// Parse a raw timestamp to the start of its UTC day.
#[must_use]
pub fn parse_timestamp(raw: &Value, format: TimestampFormat) -> Option<DateTime<Utc>> {
    match format {
        TimestampFormat::DateString => {
            let date = raw.as_str()?.get(..10)?;
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .ok()
                .map(day_start)
        }
        TimestampFormat::EpochSeconds => {
            DateTime::from_timestamp(integral(raw)?, 0).map(floor_to_day)
        }
        TimestampFormat::EpochMillis => {
            DateTime::from_timestamp_millis(integral(raw)?).map(floor_to_day)
        }
    }
}

/// Accept a JSON number or a numeric string.
#[must_use]
pub fn parse_number(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral(raw: &Value) -> Option<i64> {
    if let Some(i) = raw.as_i64() {
        return Some(i);
    }
    let f = raw.as_f64()?;
    // i64::MAX as f64 rounds up, so the upper bound is exclusive.
    (f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| f.trunc() as i64)
}

const fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
