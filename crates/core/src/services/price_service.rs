use std::sync::Arc;

use crate::providers::traits::PriceProvider;

/// Best-effort live price lookup.
///
/// Every failure mode (transport error, provider error, missing key, a quote
/// that is not a finite positive number) is reported as `None` and logged.
/// Callers decide what an absent price means; nothing here retries or caches,
/// so each call is exactly one provider request.
#[derive(Clone)]
pub struct PriceService {
    provider: Arc<dyn PriceProvider>,
}

impl PriceService {
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Current price of `coin_id` in `currency`, or `None` if no usable quote exists.
    pub async fn current_price(&self, coin_id: &str, currency: &str) -> Option<f64> {
        match self.provider.get_current_price(coin_id, currency).await {
            Ok(price) if price.is_finite() && price > 0.0 => Some(price),
            Ok(price) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    coin_id,
                    currency,
                    price,
                    "Discarding unusable quote"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    coin_id,
                    currency,
                    error = %e,
                    "Price lookup failed"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for PriceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceService")
            .field("provider", &self.provider.name())
            .finish()
    }
}
