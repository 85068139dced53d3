//! Price history statistics used by the allocation engine.
//!
//! Both helpers are total functions: short or degenerate histories yield 0
//! rather than an error, so the engine never has to fail on thin data.

use pairalloc_core::PricePoint;

/// Number of most-recent points averaged for the momentum numerator.
const MOMENTUM_RECENT_WINDOW: usize = 3;

/// Minimum history length for a non-zero momentum reading.
const MOMENTUM_MIN_POINTS: usize = 5;

/// Sample standard deviation of period-over-period returns.
///
/// Returns 0 for histories with fewer than two points, and for histories
/// producing a single return (where the sample deviation is undefined).
#[must_use]
pub fn returns_volatility(history: &[PricePoint]) -> f64 {
    if history.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = history
        .windows(2)
        .map(|w| (w[1].close - w[0].close) / w[0].close)
        .collect();

    let n = returns.len();
    if n < 2 {
        return 0.0;
    }

    let mean = returns.iter().sum::<f64>() / n as f64;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Relative change of the recent average close against an earlier window.
///
/// The numerator averages the last three closes; the reference window covers
/// the points at positions `[n-6, n-4)` (clamped at the start for five-point
/// histories). Histories with fewer than five points, or a zero reference
/// average, yield 0.
#[must_use]
pub fn recent_momentum(history: &[PricePoint]) -> f64 {
    let n = history.len();
    if n < MOMENTUM_MIN_POINTS {
        return 0.0;
    }

    let recent = history[n - MOMENTUM_RECENT_WINDOW..]
        .iter()
        .map(|p| p.close)
        .sum::<f64>()
        / MOMENTUM_RECENT_WINDOW as f64;

    let older_slice = &history[n.saturating_sub(6)..n - 4];
    let older = older_slice.iter().map(|p| p.close).sum::<f64>() / older_slice.len() as f64;

    if older == 0.0 {
        return 0.0;
    }

    (recent - older) / older
}
