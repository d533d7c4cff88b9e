use serde_json::{Value, json};

use super::{day, offsets_without};

/// Pool day data: `{date, feesUSD, volumeUSD}` newest first, limited to `days`.
pub fn by_address(address: &str, days: u32) -> Option<Value> {
    let (volume, skip) = match address {
        "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640" => (180_000_000.0, 6),
        "0xcbcdf9626bc03e24f779434178a73a0b4bad62ed" => (35_000_000.0, 2),
        _ => return None,
    };
    let mut points: Vec<Value> = offsets_without(skip)
        .map(|d| {
            #[allow(clippy::cast_precision_loss)]
            let v = volume + d as f64 * 12_345.678_9;
            json!({
                "date": day(d).timestamp(),
                "feesUSD": format!("{:.7}", v * 0.0005),
                "volumeUSD": format!("{v:.7}"),
            })
        })
        .collect();
    points.reverse();
    points.truncate(usize::try_from(days).unwrap_or(usize::MAX));
    Some(Value::Array(points))
}
