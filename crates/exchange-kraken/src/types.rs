//! Data models for Kraken order placement.

use serde::{Deserialize, Serialize};

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Acquire the base asset.
    Buy,
    /// Dispose of the base asset.
    Sell,
}

impl OrderSide {
    /// Wire value for the `type` form parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

/// Parameters for a single order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Trading pair, e.g. "XBTUSD".
    pub pair: String,

    /// Buy or sell.
    pub side: OrderSide,

    /// Venue order type; "market" unless the caller overrides it.
    pub order_type: String,

    /// Volume in base asset units.
    pub volume: f64,
}

impl OrderRequest {
    /// Creates a market buy order.
    #[must_use]
    pub fn market_buy(pair: impl Into<String>, volume: f64) -> Self {
        Self {
            pair: pair.into(),
            side: OrderSide::Buy,
            order_type: "market".to_string(),
            volume,
        }
    }

    /// Creates a market sell order.
    #[must_use]
    pub fn market_sell(pair: impl Into<String>, volume: f64) -> Self {
        Self {
            pair: pair.into(),
            side: OrderSide::Sell,
            order_type: "market".to_string(),
            volume,
        }
    }

    /// Overrides the venue order type (e.g. "limit").
    #[must_use]
    pub fn with_order_type(mut self, order_type: impl Into<String>) -> Self {
        self.order_type = order_type.into();
        self
    }
}
