use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::alert::{AlertEntry, NewAlert};
use crate::models::portfolio::{EntryUpdate, PortfolioEntry};
use crate::models::user::{NewUser, User};

/// Persistence for users, portfolio entries, and alerts.
///
/// Mirrors three logical tables looked up by equality filters only:
/// `users(id, email, password_hash)`,
/// `portfolio(user_id, coin_id, coin_name, amount, buy_price)`,
/// `alerts(id, user_id, coin_id, target_price, alert_type)`.
///
/// Lookups and deletes that match nothing return `Ok(None)`; any `Err` is a
/// store failure and is passed through to callers unchanged.
#[async_trait]
pub trait HoldingsStore: Send + Sync {
    // ── Users ───────────────────────────────────────────────────────

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError>;

    async fn insert_user(&self, user: NewUser) -> Result<User, CoreError>;

    // ── Portfolio ───────────────────────────────────────────────────

    async fn insert_entry(&self, entry: PortfolioEntry) -> Result<PortfolioEntry, CoreError>;

    /// All entries for a user, in store order.
    async fn list_entries(&self, user_id: &str) -> Result<Vec<PortfolioEntry>, CoreError>;

    /// Replace amount and buy price of the `(user_id, coin_id)` entry.
    async fn update_entry(
        &self,
        user_id: &str,
        coin_id: &str,
        update: EntryUpdate,
    ) -> Result<Option<PortfolioEntry>, CoreError>;

    async fn delete_entry(
        &self,
        user_id: &str,
        coin_id: &str,
    ) -> Result<Option<PortfolioEntry>, CoreError>;

    // ── Alerts ──────────────────────────────────────────────────────

    async fn insert_alert(&self, alert: NewAlert) -> Result<AlertEntry, CoreError>;

    /// All alerts for a user, in store order.
    async fn list_alerts(&self, user_id: &str) -> Result<Vec<AlertEntry>, CoreError>;

    async fn delete_alert(&self, alert_id: &str) -> Result<Option<AlertEntry>, CoreError>;
}
