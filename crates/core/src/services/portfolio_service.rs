use crate::errors::CoreError;
use crate::models::portfolio::{EntryUpdate, PortfolioEntry};
use crate::storage::traits::HoldingsStore;

/// Adds, updates, removes, and lists portfolio entries.
///
/// Validates input at the boundary, then delegates to the store.
/// Uniqueness of `(user_id, coin_id)` is the store's job.
pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        Self
    }

    /// Record a new holding.
    pub async fn add_asset(
        &self,
        store: &dyn HoldingsStore,
        user_id: &str,
        coin_id: &str,
        coin_name: &str,
        amount: f64,
        buy_price: f64,
    ) -> Result<PortfolioEntry, CoreError> {
        validate_coin_id(coin_id)?;
        validate_quantities(amount, buy_price)?;

        let entry = PortfolioEntry::new(user_id, coin_id, coin_name, amount, buy_price);
        let created = store.insert_entry(entry).await?;
        tracing::debug!(user_id, coin_id, amount, buy_price, "Asset added");
        Ok(created)
    }

    /// Replace amount and buy price of an existing holding.
    /// Returns `None` if the user holds no entry for `coin_id`.
    pub async fn update_asset(
        &self,
        store: &dyn HoldingsStore,
        user_id: &str,
        coin_id: &str,
        amount: f64,
        buy_price: f64,
    ) -> Result<Option<PortfolioEntry>, CoreError> {
        validate_coin_id(coin_id)?;
        validate_quantities(amount, buy_price)?;

        store
            .update_entry(user_id, coin_id, EntryUpdate { amount, buy_price })
            .await
    }

    /// Remove a holding. Returns the removed entry, or `None` if there was none.
    pub async fn delete_asset(
        &self,
        store: &dyn HoldingsStore,
        user_id: &str,
        coin_id: &str,
    ) -> Result<Option<PortfolioEntry>, CoreError> {
        store.delete_entry(user_id, coin_id).await
    }

    /// All raw entries for a user, in store order.
    pub async fn get_portfolio(
        &self,
        store: &dyn HoldingsStore,
        user_id: &str,
    ) -> Result<Vec<PortfolioEntry>, CoreError> {
        store.list_entries(user_id).await
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_coin_id(coin_id: &str) -> Result<(), CoreError> {
    if coin_id.trim().is_empty() {
        return Err(CoreError::ValidationError("Coin id must not be empty".into()));
    }
    Ok(())
}

/// Amount and buy price must be finite and non-negative.
fn validate_quantities(amount: f64, buy_price: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CoreError::ValidationError(format!(
            "Amount must be a non-negative number, got {amount}"
        )));
    }
    if !buy_price.is_finite() || buy_price < 0.0 {
        return Err(CoreError::ValidationError(format!(
            "Buy price must be a non-negative number, got {buy_price}"
        )));
    }
    Ok(())
}
