use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PRICE_API_BASE_URL};
use crate::errors::CoreError;
use super::traits::PriceProvider;

const PROVIDER_NAME: &str = "CoinGecko";

/// CoinGecko simple-price provider.
///
/// - **Free**: public endpoint, no API key required.
/// - **Endpoint**: `/simple/price?ids={coin_id}&vs_currencies={currency}`
///
/// Coin ids are CoinGecko's own lowercase keys ("bitcoin", "ethereum") and are
/// passed through as given; an unknown id simply yields no price.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_PRICE_API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS)
    }

    /// Point the provider at a different host (a proxy, the pro API, a local stub).
    pub fn with_base_url(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the simple-price endpoint (query is attached per request).
    pub fn price_url(&self) -> String {
        format!("{}/simple/price", self.base_url)
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── CoinGecko API response types ────────────────────────────────────

/// `{"bitcoin": {"usd": 43000.5}}`. Quotes may be `null` for thinly traded pairs.
pub type SimplePriceResponse = HashMap<String, HashMap<String, Option<f64>>>;

/// Pull the quote for `(coin_id, currency)` out of a simple-price response.
/// A missing coin, a missing currency key or a `null` quote means the service has no quote.
pub fn extract_price(body: &SimplePriceResponse, coin_id: &str, currency: &str) -> Option<f64> {
    body.get(coin_id)?.get(currency).copied().flatten()
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn get_current_price(&self, coin_id: &str, currency: &str) -> Result<f64, CoreError> {
        let resp: SimplePriceResponse = self
            .client
            .get(self.price_url())
            .query(&[("ids", coin_id), ("vs_currencies", currency)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("Failed to parse response for {coin_id}: {e}"),
            })?;

        extract_price(&resp, coin_id, currency).ok_or_else(|| CoreError::Api {
            provider: PROVIDER_NAME.into(),
            message: format!("No {currency} price for {coin_id}"),
        })
    }
}
