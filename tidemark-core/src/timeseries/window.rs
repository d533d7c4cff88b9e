use crate::record::{Dataset, Series};

/// Keep the last `max_len` records of a series, preserving relative order.
///
/// A `max_len` of zero is not a valid bound and leaves the series unchanged.
#[must_use]
pub fn trim_series(mut series: Series, max_len: usize) -> Series {
    if max_len == 0 || series.len() <= max_len {
        return series;
    }
    series.split_off(series.len() - max_len)
}

/// [`trim_series`] over every entity in a dataset.
///
/// A zero bound is logged and returns the input unchanged.
#[must_use]
pub fn trim_dataset(dataset: Dataset, max_len: usize) -> Dataset {
    if max_len == 0 {
        tracing::warn!("window length must be positive; leaving dataset untrimmed");
        return dataset;
    }
    dataset
        .into_iter()
        .map(|(entity, series)| {
            let len = series.len();
            let trimmed = trim_series(series, max_len);
            if trimmed.len() < len {
                tracing::debug!(entity = %entity, removed = len - trimmed.len(), "trimmed to window");
            }
            (entity, trimmed)
        })
        .collect()
}
