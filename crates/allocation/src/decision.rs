//! Allocation decision output type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which asset a decision leans toward.
///
/// A side is "favored" only when its share exceeds 65%; anything closer is
/// reported as balanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FavoredAsset {
    /// BTC share above 65%.
    Btc,
    /// ETH share above 65%.
    Eth,
    /// Neither side dominates.
    Balanced,
}

impl fmt::Display for FavoredAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Btc => write!(f, "BTC"),
            Self::Eth => write!(f, "ETH"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

/// The percentage capital split produced by one engine invocation.
///
/// Immutable once produced; the orchestrator owns it thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationDecision {
    /// BTC share of capital, always within 20-80.
    pub btc_percentage: f64,

    /// ETH share of capital, always `100 - btc_percentage`.
    pub eth_percentage: f64,

    /// Human-readable explanation of the scoring.
    pub reasoning: String,

    /// Decision confidence, an integer within 50-95.
    pub confidence: u8,
}

impl AllocationDecision {
    /// Returns which asset the split favors.
    #[must_use]
    pub fn favored(&self) -> FavoredAsset {
        if self.btc_percentage > 65.0 {
            FavoredAsset::Btc
        } else if self.eth_percentage > 65.0 {
            FavoredAsset::Eth
        } else {
            FavoredAsset::Balanced
        }
    }
}
