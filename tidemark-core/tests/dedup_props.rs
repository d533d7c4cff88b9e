use chrono::{DateTime, Utc};
use proptest::prelude::*;
use std::collections::BTreeMap;
use tidemark_core::{Dataset, Metric, Record, dedup_dataset, dedup_series};

fn day(offset: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_672_531_200 + offset * 86_400, 0).unwrap()
}

fn rec(offset: i64, v: f64) -> Record {
    Record::new(day(offset)).with_metric(Metric::TvlUsd, v)
}

fn arb_series() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec((0i64..30, 0u32..10_000), 0..80).prop_map(|items| {
        items
            .into_iter()
            .map(|(o, v)| rec(o, f64::from(v)))
            .collect()
    })
}

#[test]
fn last_element_wins_on_duplicate_timestamp() {
    let mut ds = Dataset::new();
    ds.insert("pool".into(), vec![rec(0, 5.0), rec(0, 5.1)]);
    let out = dedup_dataset(ds);
    assert_eq!(out["pool"].len(), 1);
    assert_eq!(out["pool"][0].metric(Metric::TvlUsd), Some(5.1));
}

#[test]
fn output_is_ascending_regardless_of_input_order() {
    let (out, collapsed) = dedup_series(vec![rec(3, 3.0), rec(1, 1.0), rec(2, 2.0), rec(1, 9.0)]);
    assert_eq!(collapsed, 1);
    let values: Vec<f64> = out.iter().filter_map(|r| r.metric(Metric::TvlUsd)).collect();
    assert_eq!(values, [9.0, 2.0, 3.0]);
}

proptest! {
    #[test]
    fn dedup_idempotent(series in arb_series()) {
        let (once, _) = dedup_series(series);
        let (twice, collapsed) = dedup_series(once.clone());
        prop_assert_eq!(collapsed, 0);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn dedup_unique_sorted_last_wins(series in arb_series()) {
        let mut expected: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();
        for r in &series {
            expected.insert(r.timestamp, r.metric(Metric::TvlUsd).unwrap());
        }
        let (out, collapsed) = dedup_series(series.clone());
        prop_assert_eq!(collapsed, series.len() - out.len());
        prop_assert!(out.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        let got: BTreeMap<DateTime<Utc>, f64> = out
            .iter()
            .map(|r| (r.timestamp, r.metric(Metric::TvlUsd).unwrap()))
            .collect();
        prop_assert_eq!(got, expected);
    }
}
