use async_trait::async_trait;

use crate::errors::CoreError;

/// Trait abstraction for live price sources.
///
/// Implementations report failures as errors; the decision to degrade an
/// unavailable quote to a fallback value belongs to `PriceService`.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Get the current spot price of `coin_id` expressed in `currency`.
    async fn get_current_price(&self, coin_id: &str, currency: &str) -> Result<f64, CoreError>;
}
