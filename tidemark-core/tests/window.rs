use chrono::{DateTime, Utc};
use tidemark_core::{Dataset, Metric, Record, trim_dataset, trim_series};

fn rec(offset: i64) -> Record {
    #[allow(clippy::cast_precision_loss)]
    let v = offset as f64;
    Record::new(DateTime::<Utc>::from_timestamp(1_600_000_000 + offset * 86_400, 0).unwrap())
        .with_metric(Metric::PriceUsd, v)
}

#[test]
fn keeps_exactly_the_last_365_in_order() {
    let series: Vec<Record> = (0..400).map(rec).collect();
    let out = trim_series(series.clone(), 365);
    assert_eq!(out.len(), 365);
    assert_eq!(out.as_slice(), &series[35..]);
}

#[test]
fn shorter_series_untouched() {
    let series: Vec<Record> = (0..10).map(rec).collect();
    assert_eq!(trim_series(series.clone(), 365), series);
}

#[test]
fn zero_window_is_a_no_op() {
    let mut ds = Dataset::new();
    ds.insert("eth".into(), (0..5).map(rec).collect());
    ds.insert("empty".into(), Vec::new());
    let out = trim_dataset(ds.clone(), 0);
    assert_eq!(out, ds);
}

#[test]
fn trims_every_entity() {
    let mut ds = Dataset::new();
    ds.insert("a".into(), (0..5).map(rec).collect());
    ds.insert("b".into(), (0..2).map(rec).collect());
    let out = trim_dataset(ds, 3);
    assert_eq!(out["a"].len(), 3);
    assert_eq!(out["a"][0].metric(Metric::PriceUsd), Some(2.0));
    assert_eq!(out["b"].len(), 2);
}
