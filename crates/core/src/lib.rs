//! Core types shared by the allocation engine and exchange client.
//!
//! This crate defines the immutable value contracts at the seams of the
//! trading core: the [`TradingSignal`] produced by external strategies, the
//! optional [`MarketSentiment`] snapshot from an external collector, and the
//! [`PricePoint`] history delivered by the exchange client.

pub mod market;
pub mod signal;

pub use market::PricePoint;
pub use signal::{MarketSentiment, SignalAction, TradingSignal};
