//! Trading signal and market sentiment value types.
//!
//! Signals are produced by external strategy implementations (neural,
//! ensemble, sentiment-driven); this crate only defines the contract they
//! must satisfy. Both types are immutable values: once produced for an
//! evaluation cycle they are never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recommended action for a single asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    /// Accumulate the asset.
    Buy,
    /// Reduce exposure to the asset.
    Sell,
    /// No directional recommendation.
    Hold,
}

impl SignalAction {
    /// Returns true if this action has a directional bias.
    #[must_use]
    pub const fn is_directional(self) -> bool {
        !matches!(self, Self::Hold)
    }
}

/// A per-asset trading signal produced by an external strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingSignal {
    /// Recommended action.
    pub action: SignalAction,

    /// Strategy confidence from 0 (none) to 100 (certain).
    pub confidence: u8,

    /// Name of the strategy that produced the signal.
    pub strategy: String,
}

impl TradingSignal {
    /// Creates a new signal, clamping confidence to the 0-100 contract.
    #[must_use]
    pub fn new(action: SignalAction, confidence: u8, strategy: impl Into<String>) -> Self {
        Self {
            action,
            confidence: confidence.min(100),
            strategy: strategy.into(),
        }
    }

    /// Creates a neutral HOLD signal with zero confidence.
    #[must_use]
    pub fn hold(strategy: impl Into<String>) -> Self {
        Self::new(SignalAction::Hold, 0, strategy)
    }
}

/// Aggregated market sentiment supplied by an external collector.
///
/// Optional input to allocation: absence of sentiment is valid, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSentiment {
    /// Overall sentiment score, collector-defined scale.
    pub overall: f64,

    /// Fear/greed index from 0 (extreme fear) to 100 (extreme greed).
    pub fear_greed_index: u8,

    /// Social media activity level, collector-defined scale.
    pub social_media_buzz: f64,

    /// Number of news items in the collection window.
    pub news_volume: u32,

    /// When the sentiment snapshot was taken.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_update: DateTime<Utc>,
}

impl MarketSentiment {
    /// Creates a sentiment snapshot, clamping the fear/greed index to 0-100.
    #[must_use]
    pub fn new(
        overall: f64,
        fear_greed_index: u8,
        social_media_buzz: f64,
        news_volume: u32,
        last_update: DateTime<Utc>,
    ) -> Self {
        Self {
            overall,
            fear_greed_index: fear_greed_index.min(100),
            social_media_buzz,
            news_volume,
            last_update,
        }
    }

    /// Returns true if the index signals extreme fear (below 30).
    #[must_use]
    pub fn is_fearful(&self) -> bool {
        self.fear_greed_index < 30
    }

    /// Returns true if the index signals extreme greed (above 70).
    #[must_use]
    pub fn is_greedy(&self) -> bool {
        self.fear_greed_index > 70
    }
}
