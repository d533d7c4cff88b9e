//! Daily time-series reconciliation stages.
//!
//! Each stage is a pure, synchronous transform over in-memory data:
//! - `normalize`: raw provider payload to canonical records, per an `extract` spec
//! - `dedup`: collapse repeated timestamps, last write wins
//! - `window`: bound series to the most recent N records
//! - `gaps` / `fill`: detect and synthesize missing interior days
//! - `align`: join pool activity to TVL, failing closed
//! - `reconcile`: the composed normalize-to-trim pass for one category
/// Pool activity and TVL alignment.
pub mod align;
/// Timestamp de-duplication.
pub mod dedup;
/// Value-extraction specs and provider presets.
pub mod extract;
/// Gap synthesis from neighboring records.
pub mod fill;
/// Interior calendar gap detection.
pub mod gaps;
/// Raw payload validation and conversion.
pub mod normalize;
/// Composed per-category pass.
pub mod reconcile;
/// Rolling window trimming.
pub mod window;
