//! Multi-factor allocation engine.
//!
//! Turns two per-asset signals, their price histories, and an optional
//! sentiment snapshot into a BTC/ETH capital split. The computation is pure:
//! no I/O, no shared state, safe to invoke from any number of concurrent
//! evaluation flows.
//!
//! Scoring runs in a fixed order that must not be reshuffled, because the
//! per-asset clamp is applied after the signal and strategy terms but before
//! sentiment, volatility, and momentum. Scores may therefore leave the 0-100
//! band again in the later steps; normalization absorbs that.

use crate::decision::{AllocationDecision, FavoredAsset};
use crate::stats::{recent_momentum, returns_volatility};
use pairalloc_core::{MarketSentiment, PricePoint, SignalAction, TradingSignal};
use std::cmp::Ordering;

/// Neutral starting score for each asset.
const BASE_SCORE: f64 = 50.0;

/// Maximum score contribution of a full-confidence BUY signal.
const BUY_WEIGHT: f64 = 30.0;

/// Maximum score deduction of a full-confidence SELL signal.
const SELL_WEIGHT: f64 = 20.0;

/// Score added to BTC when the market is in fear (safe-haven tilt).
const FEAR_BTC_BONUS: f64 = 15.0;

/// Score added to ETH when the market is in greed (risk-on tilt).
const GREED_ETH_BONUS: f64 = 10.0;

/// Score added to the asset with strictly lower realized volatility.
const LOW_VOLATILITY_BONUS: f64 = 5.0;

/// Multiplier applied to each asset's momentum reading.
const MOMENTUM_WEIGHT: f64 = 10.0;

/// Lower and upper bounds of the BTC share of the split.
const MIN_ALLOCATION_PCT: f64 = 20.0;
const MAX_ALLOCATION_PCT: f64 = 80.0;

/// Bounds of the reported decision confidence.
const MIN_CONFIDENCE: f64 = 50.0;
const MAX_CONFIDENCE: f64 = 95.0;

/// Additive score bonus for a recognized strategy name.
fn strategy_bonus(strategy: &str) -> f64 {
    match strategy {
        "Hybrid AI" => 5.0,
        "AI Ensemble" => 4.0,
        "Neural Network" => 3.0,
        "News Sentiment" => 2.0,
        _ => 0.0,
    }
}

/// Base score plus signal and strategy terms, clamped to 0-100.
fn signal_score(signal: &TradingSignal) -> f64 {
    let confidence = f64::from(signal.confidence) / 100.0;
    let adjustment = match signal.action {
        SignalAction::Buy => confidence * BUY_WEIGHT,
        SignalAction::Sell => -(confidence * SELL_WEIGHT),
        SignalAction::Hold => 0.0,
    };

    (BASE_SCORE + adjustment + strategy_bonus(&signal.strategy)).clamp(0.0, 100.0)
}

/// Deterministic allocation engine for a two-asset portfolio.
///
/// Stateless; a single instance can be shared freely across flows.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationEngine;

impl AllocationEngine {
    /// Creates a new engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the optimal BTC/ETH split for the current evaluation cycle.
    ///
    /// Never fails: thin histories contribute zero volatility/momentum and
    /// absent sentiment simply skips the sentiment step.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn calculate_optimal_allocation(
        &self,
        btc_signal: &TradingSignal,
        eth_signal: &TradingSignal,
        btc_price: f64,
        eth_price: f64,
        btc_history: &[PricePoint],
        eth_history: &[PricePoint],
        sentiment: Option<&MarketSentiment>,
    ) -> AllocationDecision {
        let mut btc_score = signal_score(btc_signal);
        let mut eth_score = signal_score(eth_signal);

        if let Some(sentiment) = sentiment {
            if sentiment.is_fearful() {
                btc_score += FEAR_BTC_BONUS;
            } else if sentiment.is_greedy() {
                eth_score += GREED_ETH_BONUS;
            }
        }

        let btc_volatility = returns_volatility(btc_history);
        let eth_volatility = returns_volatility(eth_history);
        if btc_volatility < eth_volatility {
            btc_score += LOW_VOLATILITY_BONUS;
        } else if eth_volatility < btc_volatility {
            eth_score += LOW_VOLATILITY_BONUS;
        }

        btc_score += recent_momentum(btc_history) * MOMENTUM_WEIGHT;
        eth_score += recent_momentum(eth_history) * MOMENTUM_WEIGHT;

        let total = btc_score + eth_score;
        let btc_percentage = if total > 0.0 {
            (btc_score / total * 100.0).clamp(MIN_ALLOCATION_PCT, MAX_ALLOCATION_PCT)
        } else {
            50.0
        };
        let eth_percentage = 100.0 - btc_percentage;

        let confidence = if total > 0.0 {
            ((btc_score - eth_score).abs() / total * 100.0).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
                as u8
        } else {
            MIN_CONFIDENCE as u8
        };

        let reasoning = compose_reasoning(
            btc_score,
            eth_score,
            btc_percentage,
            eth_percentage,
            btc_signal,
            eth_signal,
            btc_price,
            eth_price,
            sentiment,
        );

        tracing::debug!(
            btc_score,
            eth_score,
            btc_percentage,
            confidence,
            "allocation computed"
        );

        AllocationDecision {
            btc_percentage,
            eth_percentage,
            reasoning,
            confidence,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn compose_reasoning(
    btc_score: f64,
    eth_score: f64,
    btc_pct: f64,
    eth_pct: f64,
    btc_signal: &TradingSignal,
    eth_signal: &TradingSignal,
    btc_price: f64,
    eth_price: f64,
    sentiment: Option<&MarketSentiment>,
) -> String {
    let favored = if btc_pct > 65.0 {
        FavoredAsset::Btc
    } else if eth_pct > 65.0 {
        FavoredAsset::Eth
    } else {
        FavoredAsset::Balanced
    };

    let mut parts = vec![format!(
        "BTC score {btc_score:.1}, ETH score {eth_score:.1}"
    )];

    parts.push(match favored {
        FavoredAsset::Btc => format!("allocation favors BTC at {btc_pct:.1}%"),
        FavoredAsset::Eth => format!("allocation favors ETH at {eth_pct:.1}%"),
        FavoredAsset::Balanced => {
            format!("allocation balanced at {btc_pct:.1}% BTC / {eth_pct:.1}% ETH")
        }
    });

    parts.push(match btc_signal.confidence.cmp(&eth_signal.confidence) {
        Ordering::Greater => format!(
            "strongest signal: {} on BTC ({} vs {} confidence)",
            btc_signal.strategy, btc_signal.confidence, eth_signal.confidence
        ),
        Ordering::Less => format!(
            "strongest signal: {} on ETH ({} vs {} confidence)",
            eth_signal.strategy, eth_signal.confidence, btc_signal.confidence
        ),
        Ordering::Equal => format!("signal confidence even at {}", btc_signal.confidence),
    });

    parts.push(format!("prices BTC {btc_price:.2} / ETH {eth_price:.2}"));

    if let Some(sentiment) = sentiment {
        parts.push(format!(
            "fear/greed index at {}",
            sentiment.fear_greed_index
        ));
    }

    parts.join("; ")
}
