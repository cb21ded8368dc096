pub mod config;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use config::TrackerConfig;
use errors::CoreError;
use models::{
    alert::{AlertEntry, AlertSummary},
    analytics::PortfolioSummary,
    portfolio::PortfolioEntry,
    user::User,
};
use providers::{coingecko::CoinGeckoProvider, traits::PriceProvider};
use services::{
    alert_service::AlertService,
    portfolio_service::PortfolioService,
    price_service::PriceService,
    user_service::{Registration, UserService},
    valuation_service::ValuationService,
};
use storage::{rest::RestStore, traits::HoldingsStore};

/// Main entry point for the Crypto Tracker core library.
///
/// Holds no portfolio state of its own: every call reads from and writes to
/// the injected `HoldingsStore`, and valuations query the injected price provider.
/// Cloning is cheap and clones share the same collaborators.
#[derive(Clone)]
#[must_use]
pub struct CryptoTracker {
    store: Arc<dyn HoldingsStore>,
    price_service: PriceService,
    quote_currency: String,
}

impl std::fmt::Debug for CryptoTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CryptoTracker")
            .field("price_provider", &self.price_service.provider_name())
            .field("quote_currency", &self.quote_currency)
            .finish()
    }
}

impl CryptoTracker {
    /// Build a tracker over explicit collaborators (tests, alternative backends).
    pub fn new(
        store: Arc<dyn HoldingsStore>,
        provider: Arc<dyn PriceProvider>,
        quote_currency: impl Into<String>,
    ) -> Self {
        Self {
            store,
            price_service: PriceService::new(provider),
            quote_currency: quote_currency.into().to_lowercase(),
        }
    }

    /// Build a tracker backed by Supabase REST and CoinGecko.
    pub fn from_config(config: &TrackerConfig) -> Self {
        let store = RestStore::from_config(config);
        let provider = CoinGeckoProvider::with_base_url(
            config.price_api_base_url.clone(),
            config.http_timeout_secs,
        );
        Self::new(Arc::new(store), Arc::new(provider), config.quote_currency.clone())
    }

    /// Currency all valuations are expressed in (lowercase, e.g. "usd").
    #[must_use]
    pub fn quote_currency(&self) -> &str {
        &self.quote_currency
    }

    // ── Users ───────────────────────────────────────────────────────

    /// Register a user, or return the existing one with a conflict marker.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Registration, CoreError> {
        UserService::new()
            .register_user(self.store.as_ref(), email, password)
            .await
    }

    /// Look up a user by email. No password is checked.
    pub async fn login_user(&self, email: &str) -> Result<Option<User>, CoreError> {
        UserService::new().login_user(self.store.as_ref(), email).await
    }

    // ── Portfolio ───────────────────────────────────────────────────

    /// Record a new holding for the user. Rejects a blank coin id and negative or non-finite numbers.
    pub async fn add_asset(
        &self,
        user_id: &str,
        coin_id: &str,
        coin_name: &str,
        amount: f64,
        buy_price: f64,
    ) -> Result<PortfolioEntry, CoreError> {
        PortfolioService::new()
            .add_asset(self.store.as_ref(), user_id, coin_id, coin_name, amount, buy_price)
            .await
    }

    /// Replace amount and buy price of a holding. `None` when the user holds no such coin.
    pub async fn update_asset(
        &self,
        user_id: &str,
        coin_id: &str,
        amount: f64,
        buy_price: f64,
    ) -> Result<Option<PortfolioEntry>, CoreError> {
        PortfolioService::new()
            .update_asset(self.store.as_ref(), user_id, coin_id, amount, buy_price)
            .await
    }

    /// Remove a holding. `None` when there was nothing to remove.
    pub async fn delete_asset(
        &self,
        user_id: &str,
        coin_id: &str,
    ) -> Result<Option<PortfolioEntry>, CoreError> {
        PortfolioService::new()
            .delete_asset(self.store.as_ref(), user_id, coin_id)
            .await
    }

    /// Raw holdings of a user, in store order, without valuation.
    pub async fn get_portfolio(&self, user_id: &str) -> Result<Vec<PortfolioEntry>, CoreError> {
        PortfolioService::new()
            .get_portfolio(self.store.as_ref(), user_id)
            .await
    }

    /// Value the user's holdings against live prices in the quote currency.
    pub async fn get_portfolio_summary(
        &self,
        user_id: &str,
    ) -> Result<PortfolioSummary, CoreError> {
        ValuationService::new()
            .get_portfolio_summary(
                self.store.as_ref(),
                &self.price_service,
                user_id,
                &self.quote_currency,
            )
            .await
    }

    /// Best-effort live price for one coin in the quote currency.
    pub async fn get_current_price(&self, coin_id: &str) -> Option<f64> {
        self.price_service
            .current_price(coin_id, &self.quote_currency)
            .await
    }

    // ── Alerts ──────────────────────────────────────────────────────

    /// Store a price alert. `alert_type` must be exactly "above" or "below".
    pub async fn add_alert(
        &self,
        user_id: &str,
        coin_id: &str,
        target_price: f64,
        alert_type: &str,
    ) -> Result<AlertEntry, CoreError> {
        AlertService::new()
            .add_alert(self.store.as_ref(), user_id, coin_id, target_price, alert_type)
            .await
    }

    /// Remove an alert by id. `None` when no alert has that id.
    pub async fn delete_alert(&self, alert_id: &str) -> Result<Option<AlertEntry>, CoreError> {
        AlertService::new()
            .delete_alert(self.store.as_ref(), alert_id)
            .await
    }

    /// All alerts of a user.
    pub async fn get_alerts(&self, user_id: &str) -> Result<Vec<AlertEntry>, CoreError> {
        AlertService::new()
            .get_alerts(self.store.as_ref(), user_id)
            .await
    }

    /// Alerts of a user counted by direction.
    pub async fn get_alert_summary(&self, user_id: &str) -> Result<AlertSummary, CoreError> {
        AlertService::new()
            .get_alert_summary(self.store.as_ref(), user_id)
            .await
    }
}
