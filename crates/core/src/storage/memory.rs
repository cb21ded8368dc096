use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::alert::{AlertEntry, NewAlert};
use crate::models::portfolio::{EntryUpdate, PortfolioEntry};
use crate::models::user::{NewUser, User};
use super::traits::HoldingsStore;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    portfolio: Vec<PortfolioEntry>,
    alerts: Vec<AlertEntry>,
}

/// Process-local `HoldingsStore` backed by vectors.
///
/// Preserves insertion order, assigns UUIDv4 ids, and enforces the same
/// uniqueness rules as the remote schema (email; user + coin).
/// Used for tests, demos, and offline runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn entry_count(&self) -> usize {
        self.lock().portfolio.len()
    }

    pub fn alert_count(&self) -> usize {
        self.lock().alerts.len()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl HoldingsStore for InMemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, CoreError> {
        let mut tables = self.lock();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(CoreError::Store(format!(
                "duplicate key value violates unique constraint on users.email ({})",
                user.email
            )));
        }
        let created = User {
            id: Uuid::new_v4().to_string(),
            email: user.email,
            password_hash: user.password_hash,
            created_at: Some(Utc::now()),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn insert_entry(&self, entry: PortfolioEntry) -> Result<PortfolioEntry, CoreError> {
        let mut tables = self.lock();
        if tables
            .portfolio
            .iter()
            .any(|e| e.user_id == entry.user_id && e.coin_id == entry.coin_id)
        {
            return Err(CoreError::Store(format!(
                "duplicate key value violates unique constraint on portfolio (user_id, coin_id) = ({}, {})",
                entry.user_id, entry.coin_id
            )));
        }
        let created = PortfolioEntry {
            created_at: Some(Utc::now()),
            ..entry
        };
        tables.portfolio.push(created.clone());
        Ok(created)
    }

    async fn list_entries(&self, user_id: &str) -> Result<Vec<PortfolioEntry>, CoreError> {
        Ok(self
            .lock()
            .portfolio
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_entry(
        &self,
        user_id: &str,
        coin_id: &str,
        update: EntryUpdate,
    ) -> Result<Option<PortfolioEntry>, CoreError> {
        let mut tables = self.lock();
        let updated = tables
            .portfolio
            .iter_mut()
            .find(|e| e.user_id == user_id && e.coin_id == coin_id)
            .map(|e| {
                e.amount = update.amount;
                e.buy_price = update.buy_price;
                e.clone()
            });
        Ok(updated)
    }

    async fn delete_entry(
        &self,
        user_id: &str,
        coin_id: &str,
    ) -> Result<Option<PortfolioEntry>, CoreError> {
        let mut tables = self.lock();
        let removed = tables
            .portfolio
            .iter()
            .position(|e| e.user_id == user_id && e.coin_id == coin_id)
            .map(|idx| tables.portfolio.remove(idx));
        Ok(removed)
    }

    async fn insert_alert(&self, alert: NewAlert) -> Result<AlertEntry, CoreError> {
        let created = AlertEntry {
            id: Uuid::new_v4().to_string(),
            user_id: alert.user_id,
            coin_id: alert.coin_id,
            target_price: alert.target_price,
            alert_type: alert.alert_type,
            created_at: Some(Utc::now()),
        };
        self.lock().alerts.push(created.clone());
        Ok(created)
    }

    async fn list_alerts(&self, user_id: &str) -> Result<Vec<AlertEntry>, CoreError> {
        Ok(self
            .lock()
            .alerts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_alert(&self, alert_id: &str) -> Result<Option<AlertEntry>, CoreError> {
        let mut tables = self.lock();
        let removed = tables
            .alerts
            .iter()
            .position(|a| a.id == alert_id)
            .map(|idx| tables.alerts.remove(idx));
        Ok(removed)
    }
}
