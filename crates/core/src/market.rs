//! Price history primitives.
//!
//! A price history is an ascending sequence of [`PricePoint`]s, one per fixed
//! candle interval. Histories are fetched fresh per call by the exchange
//! client and owned by the caller; nothing in the core caches them.

use serde::{Deserialize, Serialize};

/// A single closing price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Candle open time as Unix epoch seconds.
    pub timestamp: i64,

    /// Closing price for the interval. Strictly positive.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point.
    #[must_use]
    pub const fn new(timestamp: i64, close: f64) -> Self {
        Self { timestamp, close }
    }
}

/// Returns true if the history is ascending by timestamp with no duplicates
/// and all prices strictly positive.
#[must_use]
pub fn is_well_formed(history: &[PricePoint]) -> bool {
    history.iter().all(|p| p.close > 0.0)
        && history.windows(2).all(|w| w[0].timestamp < w[1].timestamp)
}
