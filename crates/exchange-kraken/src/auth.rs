//! Nonce-based HMAC-SHA512 authentication for the Kraken API.
//!
//! Private calls carry two headers:
//!
//! - `API-Key`: the raw API key
//! - `API-Sign`: `base64(HMAC-SHA512(secret, path || SHA-256(nonce || body)))`
//!   where `secret` is the base64-decoded API secret, `nonce` is the decimal
//!   string of the request nonce, and `body` is the form-encoded POST body
//!   (which itself includes the nonce).
//!
//! The signature must be bit-exact or the venue rejects the request.
//!
//! # Security
//!
//! - Credentials are loaded from environment variables
//! - The decoded secret is never logged and is zeroized on drop

use crate::error::{KrakenError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256, Sha512};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use zeroize::Zeroize;

type HmacSha512 = Hmac<Sha512>;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for Kraken authentication.
#[derive(Debug, Clone)]
pub struct KrakenAuthConfig {
    /// Environment variable name for the API key.
    pub api_key_env: String,

    /// Environment variable name for the base64-encoded API secret.
    pub api_secret_env: String,
}

impl Default for KrakenAuthConfig {
    fn default() -> Self {
        Self {
            api_key_env: "KRAKEN_API_KEY".to_string(),
            api_secret_env: "KRAKEN_API_SECRET".to_string(),
        }
    }
}

impl KrakenAuthConfig {
    /// Sets custom environment variable names.
    #[must_use]
    pub fn with_env_vars(
        mut self,
        api_key_env: impl Into<String>,
        api_secret_env: impl Into<String>,
    ) -> Self {
        self.api_key_env = api_key_env.into();
        self.api_secret_env = api_secret_env.into();
        self
    }
}

// =============================================================================
// Nonce Generation
// =============================================================================

/// Strictly increasing nonce source shared by all private calls of a client.
///
/// Seeded from the wall clock at microsecond resolution, then advanced by
/// `max(now, previous + 1)` on every call. The sequence never repeats or
/// decreases, even under concurrent callers or a backwards clock step, which
/// is what the venue requires per API key. An aborted request simply leaves
/// its nonce consumed; a retry draws a fresh one.
#[derive(Debug)]
pub struct NonceGenerator {
    last: AtomicU64,
}

impl NonceGenerator {
    /// Creates a generator seeded from the current wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(unix_micros()),
        }
    }

    /// Returns the next nonce in the sequence.
    pub fn next(&self) -> u64 {
        let now = unix_micros();
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                Some(now.max(prev.saturating_add(1)))
            })
            .unwrap_or(now);
        now.max(prev.saturating_add(1))
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

// =============================================================================
// KrakenAuth
// =============================================================================

/// HMAC-SHA512 signer for private Kraken API requests.
///
/// Holds the API key and the base64-decoded secret; both are zeroized on
/// drop. Signing is a pure computation over the supplied nonce, path, and
/// body, so a single signer is safe to share across concurrent calls.
pub struct KrakenAuth {
    /// API key, transmitted verbatim in the `API-Key` header.
    api_key: String,

    /// Decoded API secret used as the HMAC key.
    secret: Vec<u8>,
}

impl std::fmt::Debug for KrakenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenAuth")
            .field("api_key", &self.api_key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Drop for KrakenAuth {
    fn drop(&mut self) {
        self.api_key.zeroize();
        self.secret.zeroize();
    }
}

impl KrakenAuth {
    /// Creates a new signer from an API key and a base64-encoded secret.
    ///
    /// # Errors
    /// Returns error if the secret is not valid base64.
    pub fn new(api_key: impl Into<String>, api_secret_b64: &str) -> Result<Self> {
        let secret = BASE64
            .decode(api_secret_b64)
            .map_err(|e| KrakenError::Signing(format!("API secret is not valid base64: {e}")))?;

        Ok(Self {
            api_key: api_key.into(),
            secret,
        })
    }

    /// Creates a new signer from environment variables.
    ///
    /// # Errors
    /// Returns error if a variable is missing or the secret is invalid.
    pub fn from_env(config: &KrakenAuthConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            KrakenError::Configuration(format!(
                "missing environment variable: {}",
                config.api_key_env
            ))
        })?;

        let api_secret = std::env::var(&config.api_secret_env).map_err(|_| {
            KrakenError::Configuration(format!(
                "missing environment variable: {}",
                config.api_secret_env
            ))
        })?;

        Self::new(api_key, &api_secret)
    }

    /// Creates a new signer with a `SecretString` secret.
    ///
    /// # Errors
    /// Returns error if the secret is not valid base64.
    pub fn with_secret(api_key: impl Into<String>, api_secret_b64: SecretString) -> Result<Self> {
        Self::new(api_key, api_secret_b64.expose_secret())
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Computes the `API-Sign` value for a private request.
    ///
    /// The message is the endpoint path concatenated with
    /// `SHA-256(decimal nonce || body)`; the HMAC key is the decoded secret.
    #[must_use]
    pub fn sign(&self, path: &str, nonce: u64, body: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(nonce.to_string().as_bytes());
        hasher.update(body.as_bytes());
        let digest = hasher.finalize();

        let mut mac =
            HmacSha512::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(path.as_bytes());
        mac.update(&digest);

        BASE64.encode(mac.finalize().into_bytes())
    }
}

// =============================================================================
// Tests
// =============================================================================
