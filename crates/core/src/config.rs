use crate::errors::CoreError;

pub const DEFAULT_PRICE_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_QUOTE_CURRENCY: &str = "usd";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration for the tracker: where the holdings store lives,
/// where prices come from, and which currency to value in.
#[derive(Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Base URL of the Supabase project, e.g. `https://abc.supabase.co`
    pub store_url: String,
    /// Supabase API key, sent as `apikey` and bearer token
    pub store_key: String,
    pub price_api_base_url: String,
    /// Lowercase currency code used for all valuations
    pub quote_currency: String,
    pub http_timeout_secs: u64,
}

impl std::fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("store_url", &self.store_url)
            .field("store_key", &"<redacted>")
            .field("price_api_base_url", &self.price_api_base_url)
            .field("quote_currency", &self.quote_currency)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}

impl TrackerConfig {
    /// Build a config with defaults for everything but the store credentials.
    pub fn new(store_url: impl Into<String>, store_key: impl Into<String>) -> Self {
        Self {
            store_url: store_url.into(),
            store_key: store_key.into(),
            price_api_base_url: DEFAULT_PRICE_API_BASE_URL.to_string(),
            quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }

    /// Load configuration from the process environment.
    /// A `.env` file in the working directory (or a parent) is applied first, if present.
    pub fn from_env() -> Result<Self, CoreError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    ///
    /// Required: `SUPABASE_URL`, `SUPABASE_KEY`.
    /// Optional: `COINGECKO_BASE_URL`, `TRACKER_QUOTE_CURRENCY`, `TRACKER_HTTP_TIMEOUT_SECS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let store_url = get("SUPABASE_URL")
            .ok_or_else(|| CoreError::Config("SUPABASE_URL is missing".into()))?;
        let store_key = get("SUPABASE_KEY")
            .ok_or_else(|| CoreError::Config("SUPABASE_KEY is missing".into()))?;

        let mut config = Self::new(store_url.trim_end_matches('/'), store_key);

        if let Some(url) = get("COINGECKO_BASE_URL") {
            config.price_api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(currency) = get("TRACKER_QUOTE_CURRENCY") {
            config.quote_currency = currency.to_lowercase();
        }
        if let Some(raw) = get("TRACKER_HTTP_TIMEOUT_SECS") {
            config.http_timeout_secs = raw.parse().map_err(|_| {
                CoreError::Config(format!(
                    "TRACKER_HTTP_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?;
        }

        Ok(config)
    }
}
