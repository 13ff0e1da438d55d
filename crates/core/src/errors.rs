use thiserror::Error;

/// Unified error type for the entire pocket-exchange-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Rate not available for {base} → {quote}")]
    RateNotAvailable {
        base: String,
        quote: String,
    },

    // ── Currencies ──────────────────────────────────────────────────
    #[error("Unsupported currency: {0}")]
    InvalidCurrency(String),

    #[error("Invalid currency pair code: {0}")]
    InvalidPair(String),

    // ── Configuration / Screen ──────────────────────────────────────
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("At least two pockets are required, got {0}")]
    NotEnoughPockets(usize),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full request URL; keep only the path part.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
