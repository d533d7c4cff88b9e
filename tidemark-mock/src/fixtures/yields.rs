use serde_json::{Value, json};

use super::{day, offsets_without};

/// Yield chart points: `{timestamp, apy, tvlUsd}`, oldest first.
pub fn by_key(key: &str) -> Option<Value> {
    let (apy_base, tvl_base, skip) = match key {
        "lido-steth" => (3.1, 9_000_000_000.0, 3),
        "pool-usdc-eth" => (12.5, 250_000_000.0, 4),
        "pool-wbtc-eth" => (8.25, 120_000_000.0, 5),
        _ => return None,
    };
    let points: Vec<Value> = offsets_without(skip)
        .map(|d| {
            #[allow(clippy::cast_precision_loss)]
            let step = d as f64;
            json!({
                "timestamp": day(d).to_rfc3339(),
                "apy": apy_base + step * 0.011,
                "tvlUsd": tvl_base + step * 1_000.5,
            })
        })
        .collect();
    Some(Value::Array(points))
}
