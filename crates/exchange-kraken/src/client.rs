//! Kraken REST API client.
//!
//! Public endpoints are plain GETs with query parameters; private endpoints
//! are form-encoded POSTs signed per [`crate::auth`]. Every call re-fetches
//! from the venue: the client holds no per-call state beyond the shared
//! connection pool and nonce sequence, so it is safe to invoke concurrently
//! from any number of flows. Retry policy belongs to the caller.
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
//!     let balances = client.get_balance().await?;
//!     println!("holdings: {balances:?}");
//!
//!     if let Some(price) = client.get_ticker("XBTUSD").await {
//!         println!("BTC last trade: {price}");
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::auth::{KrakenAuth, KrakenAuthConfig, NonceGenerator};
use crate::error::{KrakenError, Result};
use crate::types::OrderRequest;
use pairalloc_core::PricePoint;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

// =============================================================================
// Constants
// =============================================================================

/// Kraken production API base URL.
pub const KRAKEN_API_URL: &str = "https://api.kraken.com";

/// Candle interval requested from the OHLC endpoint, in minutes.
pub const OHLC_INTERVAL_MINUTES: u32 = 60;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the Kraken client.
#[derive(Debug, Clone)]
pub struct KrakenClientConfig {
    /// Base URL for the API.
    pub base_url: String,

    /// Authentication configuration.
    pub auth_config: KrakenAuthConfig,

    /// Request timeout in seconds, applied to connect and to the full call.
    pub timeout_secs: u64,
}

impl Default for KrakenClientConfig {
    fn default() -> Self {
        Self {
            base_url: KRAKEN_API_URL.to_string(),
            auth_config: KrakenAuthConfig::default(),
            timeout_secs: 30,
        }
    }
}

impl KrakenClientConfig {
    /// Sets the base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the authentication configuration.
    #[must_use]
    pub fn with_auth_config(mut self, config: KrakenAuthConfig) -> Self {
        self.auth_config = config;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Kraken response envelope: an error list plus an optional result payload.
///
/// The venue reports business failures in `error` with HTTP 200, so the
/// envelope must be inspected even on transport success.
#[derive(Debug, Deserialize)]
struct KrakenResponse<T> {
    #[serde(default)]
    error: Vec<String>,
    result: Option<T>,
}

/// Ticker payload; only the last-trade-closed array is consumed.
#[derive(Debug, Deserialize)]
struct RawTickerInfo {
    /// `[price, lot volume]`, both string-encoded.
    c: Vec<String>,
}

/// AddOrder payload; only the transaction ids are consumed.
#[derive(Debug, Deserialize)]
struct RawOrderResult {
    txid: Option<Vec<String>>,
}

/// Percent-encodes values and joins `key=value` pairs with `&`.
///
/// The result is both the POST body and the exact byte sequence the
/// signature covers, so it must be built once and reused verbatim.
fn encode_form(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

// =============================================================================
// KrakenClient
// =============================================================================

/// Authenticated Kraken REST client.
///
/// Construct once and share; all methods take `&self`.
pub struct KrakenClient {
    /// Configuration.
    config: KrakenClientConfig,

    /// HTTP client (owns the connection pool).
    http: Client,

    /// Request signer.
    auth: KrakenAuth,

    /// Nonce sequence for private calls.
    nonce: NonceGenerator,
}

impl std::fmt::Debug for KrakenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenClient")
            .field("base_url", &self.config.base_url)
            .field("timeout_secs", &self.config.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl KrakenClient {
    /// Creates a new client, loading credentials from the environment.
    ///
    /// # Errors
    /// Returns error if credentials are missing/invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: KrakenClientConfig) -> Result<Self> {
        let auth = KrakenAuth::from_env(&config.auth_config)?;
        Self::with_auth(config, auth)
    }

    /// Creates a new client with explicit credentials.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_auth(config: KrakenClientConfig, auth: KrakenAuth) -> Result<Self> {
        let timeout = std::time::Duration::from_secs(config.timeout_secs);
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| KrakenError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http,
            auth,
            nonce: NonceGenerator::new(),
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Issues an unauthenticated GET against a public endpoint.
    async fn public_get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/0/public/{}", self.config.base_url, endpoint);

        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).query(query).send().await?;
        self.handle_response(response).await
    }

    /// Issues a signed POST against a private endpoint.
    ///
    /// Draws a fresh nonce, serializes it with the caller parameters into the
    /// form body, and signs path + body. The nonce is consumed even if the
    /// request is later aborted; a retry must re-enter here.
    async fn private_post<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let nonce = self.nonce.next();

        let mut pairs: Vec<(&str, String)> = Vec::with_capacity(params.len() + 1);
        pairs.push(("nonce", nonce.to_string()));
        pairs.extend(params.iter().map(|(key, value)| (*key, value.clone())));
        let body = encode_form(&pairs);

        let path = format!("/0/private/{endpoint}");
        let signature = self.auth.sign(&path, nonce, &body);
        let url = format!("{}{}", self.config.base_url, path);

        tracing::debug!("POST {} body_len={}", url, body.len());

        let response = self
            .http
            .post(&url)
            .header("API-Key", self.auth.api_key())
            .header("API-Sign", signature)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Maps transport status, venue error list, and payload presence onto
    /// the error taxonomy.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(KrakenError::transport(status.as_u16(), text));
        }

        let envelope: KrakenResponse<T> =
            serde_json::from_str(&text).map_err(|_| KrakenError::parse("envelope", &text))?;

        if !envelope.error.is_empty() {
            return Err(KrakenError::venue(envelope.error));
        }

        envelope
            .result
            .ok_or_else(|| KrakenError::parse("result", &text))
    }

    // =========================================================================
    // Account Endpoints
    // =========================================================================

    /// Fetches account balances as a map from asset code to quantity.
    ///
    /// Entries that fail to parse count as zero; zero and negative entries
    /// are dropped from the result rather than failing the call.
    ///
    /// # Errors
    /// Returns error on transport or venue failure.
    pub async fn get_balance(&self) -> Result<HashMap<String, f64>> {
        let raw: HashMap<String, String> = self.private_post("Balance", &[]).await?;

        let mut balances = HashMap::new();
        for (asset, quantity) in raw {
            let parsed = quantity.parse::<f64>().unwrap_or_else(|_| {
                tracing::debug!("unparseable balance for {asset}: {quantity:?}, treating as zero");
                0.0
            });
            if parsed > 0.0 {
                balances.insert(asset, parsed);
            }
        }

        Ok(balances)
    }

    // =========================================================================
    // Market Data Endpoints
    // =========================================================================

    /// Fetches the last trade price for a pair.
    ///
    /// Kraken keys the ticker result by its own canonical pair name, which
    /// need not match the requested string, so the single entry present is
    /// read rather than looked up by key.
    ///
    /// # Errors
    /// Returns error on transport or venue failure, or an unexpected shape.
    pub async fn get_current_price(&self, pair: &str) -> Result<f64> {
        let result: HashMap<String, RawTickerInfo> =
            self.public_get("Ticker", &[("pair", pair)]).await?;

        let (_, info) = result
            .into_iter()
            .next()
            .ok_or_else(|| KrakenError::parse("result", "empty ticker map"))?;

        let last = info
            .c
            .first()
            .ok_or_else(|| KrakenError::parse("c", "empty last-trade array"))?;

        last.parse::<f64>()
            .map_err(|_| KrakenError::parse("c", last))
    }

    /// Fetches the last trade price, absorbing all failures.
    ///
    /// Polling loops depend on this never raising; any transport, venue, or
    /// parse failure yields `None`. Use [`Self::get_current_price`] when the
    /// failure must surface.
    pub async fn get_ticker(&self, pair: &str) -> Option<f64> {
        match self.get_current_price(pair).await {
            Ok(price) => Some(price),
            Err(err) => {
                tracing::warn!("ticker fetch for {pair} failed: {err}");
                None
            }
        }
    }

    /// Fetches hourly candles for a pair, absorbing all failures.
    ///
    /// Returns closes ascending by open time; any failure yields an empty
    /// history so evaluation cycles keep running on thin data.
    pub async fn get_ohlc(&self, pair: &str) -> Vec<PricePoint> {
        match self.fetch_ohlc(pair).await {
            Ok(points) => points,
            Err(err) => {
                tracing::warn!("OHLC fetch for {pair} failed, returning empty history: {err}");
                Vec::new()
            }
        }
    }

    /// Raising variant of the OHLC fetch.
    async fn fetch_ohlc(&self, pair: &str) -> Result<Vec<PricePoint>> {
        let interval = OHLC_INTERVAL_MINUTES.to_string();
        let result: serde_json::Map<String, Value> = self
            .public_get("OHLC", &[("pair", pair), ("interval", &interval)])
            .await?;

        // The result holds the candle array under the venue pair key plus a
        // "last" pagination cursor; take the array, whatever its key.
        let candles = result
            .iter()
            .find_map(|(key, value)| {
                if key.as_str() == "last" {
                    None
                } else {
                    value.as_array()
                }
            })
            .ok_or_else(|| KrakenError::parse("result", "no candle array present"))?;

        let mut points: Vec<PricePoint> = candles.iter().filter_map(parse_candle).collect();
        points.sort_by_key(|p| p.timestamp);
        points.dedup_by_key(|p| p.timestamp);
        debug_assert!(pairalloc_core::market::is_well_formed(&points));
        Ok(points)
    }

    // =========================================================================
    // Order Endpoints
    // =========================================================================

    /// Submits an order and returns the venue-assigned transaction id.
    ///
    /// # Errors
    /// Returns error on any transport or venue failure; order placement never
    /// fails silently.
    pub async fn place_order(&self, order: &OrderRequest) -> Result<String> {
        let params = [
            ("pair", order.pair.clone()),
            ("type", order.side.as_str().to_string()),
            ("ordertype", order.order_type.clone()),
            ("volume", order.volume.to_string()),
        ];

        let result: RawOrderResult = self.private_post("AddOrder", &params).await?;

        result
            .txid
            .unwrap_or_default()
            .into_iter()
            .next()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| KrakenError::parse("txid", "no transaction id in response"))
    }

    /// Submits a market buy order for `volume` of the pair's base asset.
    ///
    /// # Errors
    /// Returns error on any transport or venue failure.
    pub async fn place_buy_order(&self, pair: &str, volume: f64) -> Result<String> {
        self.place_order(&OrderRequest::market_buy(pair, volume))
            .await
    }

    /// Submits a market sell order for `volume` of the pair's base asset.
    ///
    /// # Errors
    /// Returns error on any transport or venue failure.
    pub async fn place_sell_order(&self, pair: &str, volume: f64) -> Result<String> {
        self.place_order(&OrderRequest::market_sell(pair, volume))
            .await
    }
}

/// Parses one candle array; index 0 is the open time, index 4 the close.
/// Either may arrive as a JSON number or string. Non-positive closes and
/// malformed candles are skipped.
fn parse_candle(candle: &Value) -> Option<PricePoint> {
    let fields = candle.as_array()?;
    let timestamp = value_as_i64(fields.first()?)?;
    let close = value_as_f64(fields.get(4)?)?;
    (close > 0.0).then(|| PricePoint::new(timestamp, close))
}

fn value_as_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_str()?.parse().ok())
}

fn value_as_f64(value: &Value) -> Option<f64> {
    value.as_f64().or_else(|| value.as_str()?.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderSide;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> KrakenClient {
        let config = KrakenClientConfig::default().with_base_url(base_url);
        let auth = KrakenAuth::new("test-key", "c2VjcmV0").unwrap();
        KrakenClient::with_auth(config, auth).unwrap()
    }

    // ==================== Config Tests ====================

    #[test]
    fn test_client_config_default() {
        let config = KrakenClientConfig::default();
        assert_eq!(config.base_url, KRAKEN_API_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_client_config_builder() {
        let config = KrakenClientConfig::default()
            .with_base_url("https://custom.url")
            .with_timeout_secs(5);

        assert_eq!(config.base_url, "https://custom.url");
        assert_eq!(config.timeout_secs, 5);
    }

    // ==================== Form Encoding Tests ====================

    #[test]
    fn test_encode_form_plain_values() {
        let body = encode_form(&[
            ("nonce", "1700000000000000".to_string()),
            ("pair", "XBTUSD".to_string()),
        ]);
        assert_eq!(body, "nonce=1700000000000000&pair=XBTUSD");
    }

    #[test]
    fn test_encode_form_percent_encodes_values() {
        let body = encode_form(&[("pair", "XBT/USD".to_string())]);
        assert_eq!(body, "pair=XBT%2FUSD");
    }

    #[test]
    fn test_encode_form_empty() {
        assert_eq!(encode_form(&[]), "");
    }

    // ==================== Candle Parsing Tests ====================

    #[test]
    fn test_parse_candle_mixed_number_and_string() {
        let candle = json!([1_700_000_000, "100.1", "110.0", "90.0", "105.5", "102.0", "12.0", 42]);
        let point = parse_candle(&candle).unwrap();
        assert_eq!(point.timestamp, 1_700_000_000);
        assert_eq!(point.close, 105.5);
    }

    #[test]
    fn test_parse_candle_numeric_close() {
        let candle = json!(["1700000000", 1.0, 2.0, 0.5, 1.5]);
        let point = parse_candle(&candle).unwrap();
        assert_eq!(point.timestamp, 1_700_000_000);
        assert_eq!(point.close, 1.5);
    }

    #[test]
    fn test_parse_candle_rejects_short_array() {
        assert!(parse_candle(&json!([1_700_000_000, "1.0"])).is_none());
    }

    #[test]
    fn test_parse_candle_rejects_non_positive_close() {
        assert!(parse_candle(&json!([1_700_000_000, "1", "1", "1", "0.0"])).is_none());
    }

    // ==================== Ticker / Price Tests ====================

    #[tokio::test]
    async fn test_get_current_price_reads_venue_keyed_result() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/Ticker"))
            .and(query_param("pair", "XBTUSD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": [],
                "result": {
                    // The venue answers under its canonical pair name.
                    "XXBTZUSD": { "a": ["50130.0", "1", "1.0"], "c": ["50123.40", "0.01"] }
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let price = client.get_current_price("XBTUSD").await.unwrap();
        assert_eq!(price, 50123.4);
    }

    #[tokio::test]
    async fn test_get_current_price_transport_error_raises() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/Ticker"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_current_price("XBTUSD").await.unwrap_err();
        assert!(matches!(
            err,
            KrakenError::Transport {
                status_code: 500,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_get_current_price_venue_error_raises() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/Ticker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": ["EQuery:Unknown asset pair"],
                "result": null
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_current_price("NOPE").await.unwrap_err();
        match err {
            KrakenError::Venue { messages } => {
                assert_eq!(messages, vec!["EQuery:Unknown asset pair".to_string()]);
            }
            other => panic!("expected Venue, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_current_price_unparseable_price_raises_parse() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/Ticker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": [],
                "result": { "XXBTZUSD": { "c": ["not-a-price", "0.01"] } }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_current_price("XBTUSD").await.unwrap_err();
        assert!(matches!(err, KrakenError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_get_ticker_absorbs_transport_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/Ticker"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.get_ticker("XBTUSD").await, None);
    }

    #[tokio::test]
    async fn test_get_ticker_absorbs_venue_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/Ticker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": ["EService:Unavailable"],
                "result": null
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.get_ticker("XBTUSD").await, None);
    }

    #[tokio::test]
    async fn test_get_ticker_returns_price_on_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/Ticker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": [],
                "result": { "XETHZUSD": { "c": ["3010.55", "0.2"] } }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.get_ticker("ETHUSD").await, Some(3010.55));
    }

    // ==================== OHLC Tests ====================

    #[tokio::test]
    async fn test_get_ohlc_parses_and_orders_candles() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/OHLC"))
            .and(query_param("pair", "XBTUSD"))
            .and(query_param("interval", "60"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": [],
                "result": {
                    "XXBTZUSD": [
                        [1_700_003_600, "101.0", "111.0", "91.0", "106.5", "103.0", "8.0", 17],
                        [1_700_000_000, "100.0", "110.0", "90.0", "105.5", "102.0", "12.0", 42]
                    ],
                    "last": 1_700_003_600
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let history = client.get_ohlc("XBTUSD").await;

        assert_eq!(history.len(), 2);
        assert_eq!(history[0], PricePoint::new(1_700_000_000, 105.5));
        assert_eq!(history[1], PricePoint::new(1_700_003_600, 106.5));
    }

    #[tokio::test]
    async fn test_get_ohlc_malformed_body_returns_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/OHLC"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"error\":[],\"resu"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.get_ohlc("XBTUSD").await.is_empty());
    }

    #[tokio::test]
    async fn test_get_ohlc_transport_failure_returns_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/OHLC"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.get_ohlc("XBTUSD").await.is_empty());
    }

    #[tokio::test]
    async fn test_get_ohlc_skips_malformed_candles() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/0/public/OHLC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": [],
                "result": {
                    "XXBTZUSD": [
                        [1_700_000_000, "100.0", "110.0", "90.0", "105.5"],
                        ["garbage"],
                        [1_700_003_600, "101.0", "111.0", "91.0", "bogus"]
                    ],
                    "last": 1_700_003_600
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let history = client.get_ohlc("XBTUSD").await;
        assert_eq!(history, vec![PricePoint::new(1_700_000_000, 105.5)]);
    }

    // ==================== Balance Tests ====================

    #[tokio::test]
    async fn test_get_balance_parses_and_filters() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/0/private/Balance"))
            .and(header("API-Key", "test-key"))
            .and(header_exists("API-Sign"))
            .and(body_string_contains("nonce="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": [],
                "result": {
                    "XXBT": "1.5",
                    "XETH": "0.00000000",
                    "ZUSD": "not-a-number"
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let balances = client.get_balance().await.unwrap();

        assert_eq!(balances.len(), 1);
        assert_eq!(balances.get("XXBT"), Some(&1.5));
    }

    #[tokio::test]
    async fn test_get_balance_venue_error_raises() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/0/private/Balance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": ["EAPI:Invalid key"],
                "result": null
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_balance().await.unwrap_err();
        assert!(matches!(err, KrakenError::Venue { .. }));
    }

    #[tokio::test]
    async fn test_get_balance_transport_error_raises() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/0/private/Balance"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.get_balance().await.unwrap_err();
        assert!(matches!(
            err,
            KrakenError::Transport {
                status_code: 503,
                ..
            }
        ));
    }

    // ==================== Order Tests ====================

    #[tokio::test]
    async fn test_place_buy_order_returns_txid() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/0/private/AddOrder"))
            .and(header("API-Key", "test-key"))
            .and(header_exists("API-Sign"))
            .and(body_string_contains("pair=XBTUSD"))
            .and(body_string_contains("type=buy"))
            .and(body_string_contains("ordertype=market"))
            .and(body_string_contains("volume=0.5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": [],
                "result": {
                    "txid": ["OABC12-DEF34-GHI56"],
                    "descr": { "order": "buy 0.50000000 XBTUSD @ market" }
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let txid = client.place_buy_order("XBTUSD", 0.5).await.unwrap();
        assert_eq!(txid, "OABC12-DEF34-GHI56");
    }

    #[tokio::test]
    async fn test_place_sell_order_sends_sell_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/0/private/AddOrder"))
            .and(body_string_contains("type=sell"))
            .and(body_string_contains("pair=ETHUSD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": [],
                "result": { "txid": ["OXYZ99-AAA11-BBB22"] }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let txid = client.place_sell_order("ETHUSD", 2.0).await.unwrap();
        assert_eq!(txid, "OXYZ99-AAA11-BBB22");
    }

    #[tokio::test]
    async fn test_place_order_venue_error_raises() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/0/private/AddOrder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": ["EOrder:Insufficient funds"],
                "result": null
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let order = OrderRequest::market_buy("XBTUSD", 100.0);
        let err = client.place_order(&order).await.unwrap_err();
        match err {
            KrakenError::Venue { messages } => {
                assert_eq!(messages, vec!["EOrder:Insufficient funds".to_string()]);
            }
            other => panic!("expected Venue, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_place_order_missing_txid_raises_parse() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/0/private/AddOrder"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": [],
                "result": { "descr": { "order": "buy 1 XBTUSD @ market" } }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.place_buy_order("XBTUSD", 1.0).await.unwrap_err();
        assert!(matches!(err, KrakenError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_order_request_respects_custom_order_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/0/private/AddOrder"))
            .and(body_string_contains("ordertype=limit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": [],
                "result": { "txid": ["OLIM11-CCC22-DDD33"] }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let order = OrderRequest {
            pair: "XBTUSD".to_string(),
            side: OrderSide::Buy,
            order_type: "limit".to_string(),
            volume: 1.0,
        };
        assert!(client.place_order(&order).await.is_ok());
    }
}
