use thiserror::Error;

/// Unified error type for the entire crypto-tracker-core library.
/// Every public function returns `Result<T, CoreError>`.
///
/// Two failure classes are deliberately absent: "not found" is an `Option::None`,
/// and an unavailable live price degrades to the position's buy price.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation ──────────────────────────────────────────────────
    #[error("Invalid alert type '{0}': expected 'above' or 'below'")]
    InvalidAlertType(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    // ── Holdings store ──────────────────────────────────────────────
    #[error("Store error: {0}")]
    Store(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    // ── Encoding ────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Configuration error: {0}")]
    Config(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        CoreError::Network(redact_query(&e.to_string()))
    }
}

/// Strip query parameters from any URL embedded in an error message.
/// reqwest errors quote the full request URL, which may carry filters or keys.
pub(crate) fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}
