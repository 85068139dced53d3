//! Kraken exchange integration for the pair allocation engine.
//!
//! This crate provides:
//! - REST client for Kraken's public and private API
//! - Nonce-based HMAC-SHA512 request signing
//! - Balance, ticker, and OHLC retrieval plus market order placement
//! - A typed error taxonomy separating transport, venue, and parse failures
//!
//! # Example
//!
//! ```ignore
//! use pairalloc_kraken::{KrakenClient, KrakenClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = KrakenClient::new(KrakenClientConfig::default())?;
//!
//!     let history = client.get_ohlc("XBTUSD").await;
//!     println!("fetched {} hourly candles", history.len());
//!
//!     let txid = client.place_buy_order("XBTUSD", 0.01).await?;
//!     println!("order accepted: {txid}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Authentication
//!
//! Private endpoints are signed with HMAC-SHA512 over the endpoint path and
//! a SHA-256 digest of the nonce and form body. Set the following
//! environment variables:
//!
//! - `KRAKEN_API_KEY`: the API key
//! - `KRAKEN_API_SECRET`: the API secret, base64-encoded
//!
//! # Failure Policy
//!
//! `get_balance`, `get_current_price`, and order placement raise typed
//! errors so callers can react; `get_ticker` and `get_ohlc` absorb every
//! failure and return an absent/empty value so polling loops survive
//! transient outages. The asymmetry is deliberate and callers rely on it.
//!
//! # API Endpoints
//!
//! - `GET /0/public/Ticker` - last trade price for a pair
//! - `GET /0/public/OHLC` - hourly candles for a pair
//! - `POST /0/private/Balance` - account balances
//! - `POST /0/private/AddOrder` - order placement

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use auth::{KrakenAuth, KrakenAuthConfig, NonceGenerator};
pub use client::{KrakenClient, KrakenClientConfig, KRAKEN_API_URL, OHLC_INTERVAL_MINUTES};
pub use error::{KrakenError, Result};
pub use types::{OrderRequest, OrderSide};
