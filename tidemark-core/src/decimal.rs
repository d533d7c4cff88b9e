//! Decimal rounding helpers shared by the normalizer and row conversions.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round `value` to `dp` places, half away from zero, as a `Decimal`.
///
/// The value goes through its shortest round-trip decimal text first, so a
/// literal like `1.005` rounds as written rather than as its binary
/// approximation. Returns `None` for non-finite values or values outside the
/// `Decimal` range.
#[must_use]
pub fn scaled(value: f64, dp: u32) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let exact: Decimal = value.to_string().parse().ok()?;
    Some(exact.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

/// [`scaled`], converted back to the nearest `f64` through its decimal text.
#[must_use]
pub fn round_half_away(value: f64, dp: u32) -> Option<f64> {
    scaled(value, dp)?.to_string().parse().ok()
}
