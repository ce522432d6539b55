//! Coordinate unit conversion between the capture grid (micrometers) and
//! the persisted grid (integer millimeters).
//!
//! The two directions are deliberately asymmetric, mirroring the persisted
//! contract:
//!
//! - µm -> mm rounds to the nearest integer, so a round trip through storage
//!   loses sub-millimeter precision. This is accepted and documented, and
//!   tests assert the exact rounding output rather than a perfect round trip.
//! - `to_storage_unit` passes malformed points through unchanged;
//!   `to_compute_unit` drops them, so its output may be shorter than its
//!   input. Both report how many points they could not convert.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Micrometers per storage millimeter.
const UM_PER_MM: f64 = 1000.0;

/// Rounding rule applied when converting micrometers to storage millimeters.
/// The choice silently affects which panel a near-boundary defect lands in,
/// so it is an explicit, injectable policy rather than a language default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Ties round to the nearest even millimeter (the persisted default).
    #[default]
    HalfToEven,
    /// Ties round away from zero.
    HalfAwayFromZero,
}

impl RoundingMode {
    fn round(self, value: f64) -> i64 {
        match self {
            RoundingMode::HalfToEven => value.round_ties_even() as i64,
            RoundingMode::HalfAwayFromZero => value.round() as i64,
        }
    }

    /// One micrometer coordinate to its storage millimeter value.
    pub fn um_to_mm(self, um: f64) -> i64 {
        self.round(um / UM_PER_MM)
    }
}

/// How a conversion pass went: points converted vs. points it had to skip
/// (or pass through untouched).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub converted: usize,
    pub skipped: usize,
}

/// First two numeric elements of a JSON coordinate entry, if it is a
/// `[x, y, ...]` array. Anything else is malformed for conversion purposes.
fn pair_of(entry: &Value) -> Option<(f64, f64)> {
    let items = entry.as_array()?;
    if items.len() < 2 {
        return None;
    }
    Some((items[0].as_f64()?, items[1].as_f64()?))
}

/// Convert a raw micrometer coordinate sequence to the storage grid
/// (integer millimeters, divided by 1000 and rounded per `mode`).
///
/// Malformed entries are kept in place unchanged. Non-array input is
/// returned as-is with zero stats.
pub fn to_storage_unit(coords: &Value, mode: RoundingMode) -> (Value, ConvertStats) {
    let mut stats = ConvertStats::default();
    let Some(entries) = coords.as_array() else {
        return (coords.clone(), stats);
    };

    let converted = entries
        .iter()
        .map(|entry| match pair_of(entry) {
            Some((x, y)) => {
                stats.converted += 1;
                Value::from(vec![
                    Value::from(mode.um_to_mm(x)),
                    Value::from(mode.um_to_mm(y)),
                ])
            }
            None => {
                stats.skipped += 1;
                entry.clone()
            }
        })
        .collect::<Vec<Value>>();

    (Value::from(converted), stats)
}

/// Convert a stored millimeter coordinate sequence back to micrometers
/// (multiplied by 1000 through f64, truncated toward zero).
///
/// Malformed entries are dropped, so the output may be shorter than the
/// input. Empty or non-array input yields an empty sequence.
pub fn to_compute_unit(coords: &Value) -> (Vec<[i64; 2]>, ConvertStats) {
    let mut stats = ConvertStats::default();
    let Some(entries) = coords.as_array() else {
        return (Vec::new(), stats);
    };

    let points = entries
        .iter()
        .filter_map(|entry| match pair_of(entry) {
            Some((x, y)) => {
                stats.converted += 1;
                Some([(x * UM_PER_MM) as i64, (y * UM_PER_MM) as i64])
            }
            None => {
                stats.skipped += 1;
                None
            }
        })
        .collect();

    (points, stats)
}
