//! BTC/ETH capital allocation engine.
//!
//! This crate provides:
//! - Multi-factor scoring over trading signals, sentiment, and price history
//! - Volatility and momentum statistics over candle sequences
//! - A bounded percentage split (20-80) with a 50-95 confidence reading
//!
//! # Example
//!
//! ```ignore
//! use pairalloc_allocation::AllocationEngine;
//! use pairalloc_core::{SignalAction, TradingSignal};
//!
//! let engine = AllocationEngine::new();
//! let btc = TradingSignal::new(SignalAction::Buy, 80, "Hybrid AI");
//! let eth = TradingSignal::new(SignalAction::Hold, 50, "Neural Network");
//!
//! let decision = engine.calculate_optimal_allocation(
//!     &btc, &eth, 50_000.0, 3_000.0, &btc_history, &eth_history, None,
//! );
//! println!("{}% BTC: {}", decision.btc_percentage, decision.reasoning);
//! ```
//!
//! The engine is pure and never fails; the orchestrator feeding it decides
//! when to act on a decision and how to execute it.

pub mod decision;
pub mod engine;
pub mod stats;

pub use decision::{AllocationDecision, FavoredAsset};
pub use engine::AllocationEngine;
pub use stats::{recent_momentum, returns_volatility};
