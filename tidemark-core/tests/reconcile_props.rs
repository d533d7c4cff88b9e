use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{Value, json};
use tidemark_core::{
    ExtractionSpec, GapFillConfig, Metric, RawPayload, ReconcileParams, reconcile_dataset,
};

fn date(offset: i64) -> String {
    let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (base + Duration::days(offset)).format("%Y-%m-%dT12:00:00Z").to_string()
}

fn params(window_len: usize) -> ReconcileParams {
    ReconcileParams {
        window_len,
        gap_fill: GapFillConfig::default(),
    }
}

#[test]
fn staking_payload_reconciles_end_to_end() {
    let raw = json!([
        { "timestamp": date(0), "apy": 3.001 },
        { "timestamp": date(2), "apy": 4.0 },
        { "timestamp": date(2), "apy": 5.0 },
        { "timestamp": "bogus", "apy": 1.0 },
        { "timestamp": date(3), "apy": 6.0 },
    ]);
    let payloads = RawPayload::from([("staking".to_string(), raw)]);
    let mut rng = StdRng::seed_from_u64(9);
    let out = reconcile_dataset(&payloads, &ExtractionSpec::staking_apy(), &params(3), &mut rng);
    let s = &out["staking"];
    assert_eq!(s.len(), 3);
    assert_eq!(s[1].metric(Metric::ApyPercentage), Some(5.0));
    assert_eq!(s[2].metric(Metric::ApyPercentage), Some(6.0));
    // day 0 trimmed away after filling; day 1 drawn from [3.0, 5.5) and truncated
    assert_eq!(s[0].timestamp.format("%Y-%m-%d").to_string(), "2023-01-02");
    let filled = s[0].metric(Metric::ApyPercentage).unwrap();
    assert!([3.0, 4.0, 5.0].contains(&filled), "{filled}");
}

#[test]
fn non_array_payload_maps_to_empty_series() {
    let payloads = RawPayload::from([("eth".to_string(), json!({ "error": "rate limited" }))]);
    let mut rng = StdRng::seed_from_u64(0);
    let out = reconcile_dataset(&payloads, &ExtractionSpec::token_price(), &params(365), &mut rng);
    assert!(out["eth"].is_empty());
}

#[test]
fn far_apart_prices_only_fill_the_window() {
    let raw = json!([[-30_000_000_000_000_i64, 1.0], [1_700_000_000_000_i64, 2.0]]);
    let payloads = RawPayload::from([("eth".to_string(), raw)]);
    let mut rng = StdRng::seed_from_u64(1);
    let out = reconcile_dataset(&payloads, &ExtractionSpec::token_price(), &params(365), &mut rng);
    let s = &out["eth"];
    assert_eq!(s.len(), 365);
    assert_eq!(s[364].timestamp.format("%Y-%m-%d").to_string(), "2023-11-14");
    assert_eq!(s[364].metric(Metric::PriceUsd), Some(2.0));
    assert_eq!(s[0].timestamp.format("%Y-%m-%d").to_string(), "2022-11-15");
    assert!(s.windows(2).all(|w| w[1].timestamp - w[0].timestamp == Duration::days(1)));
}

fn arb_payload() -> impl Strategy<Value = Value> {
    proptest::collection::vec((0i64..90, 0u32..100_000), 0..60).prop_map(|items| {
        Value::Array(
            items
                .into_iter()
                .map(|(d, v)| json!({ "timestamp": date(d), "tvlUsd": f64::from(v) / 100.0 }))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn reconciled_series_hold_invariants(
        a in arb_payload(),
        b in arb_payload(),
        window_len in 1usize..120,
        seed in any::<u64>(),
    ) {
        let payloads = RawPayload::from([("a".to_string(), a), ("b".to_string(), b)]);
        let mut rng = StdRng::seed_from_u64(seed);
        let out = reconcile_dataset(&payloads, &ExtractionSpec::tvl(), &params(window_len), &mut rng);
        prop_assert_eq!(out.len(), 2);
        for series in out.values() {
            prop_assert!(series.len() <= window_len);
            prop_assert!(series.windows(2).all(|w| w[1].timestamp - w[0].timestamp == Duration::days(1)));
            prop_assert!(series.iter().all(|r| r.metric(Metric::TvlUsd).is_some_and(f64::is_finite)));
        }
    }
}
