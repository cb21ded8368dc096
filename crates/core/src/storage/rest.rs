use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::config::{TrackerConfig, DEFAULT_HTTP_TIMEOUT_SECS};
use crate::errors::{redact_query, CoreError};
use crate::models::alert::{AlertEntry, NewAlert};
use crate::models::portfolio::{EntryUpdate, PortfolioEntry};
use crate::models::user::{NewUser, User};
use super::traits::HoldingsStore;

pub const USERS_TABLE: &str = "users";
pub const PORTFOLIO_TABLE: &str = "portfolio";
pub const ALERTS_TABLE: &str = "alerts";

/// `HoldingsStore` backed by a Supabase project's PostgREST endpoint.
///
/// - Tables live under `{store_url}/rest/v1/{table}`.
/// - Filters are equality only: `?column=eq.value`.
/// - Writes ask for `Prefer: return=representation` so the affected rows come back.
///
/// Every failure (transport, non-2xx, undecodable body) becomes `CoreError::Store`.
pub struct RestStore {
    client: Client,
    rest_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(store_url: &str, api_key: impl Into<String>) -> Self {
        Self::with_timeout(store_url, api_key, DEFAULT_HTTP_TIMEOUT_SECS)
    }

    pub fn with_timeout(store_url: &str, api_key: impl Into<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            rest_url: format!("{}/rest/v1", store_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::with_timeout(&config.store_url, config.store_key.clone(), config.http_timeout_secs)
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    // ── Request plumbing ────────────────────────────────────────────

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>, CoreError> {
        let mut query = vec![("select".to_string(), "*".to_string())];
        query.extend(eq_filters(filters));
        let builder = self.client.get(self.table_url(table)).query(&query);
        let resp = self.authorized(builder).send().await.map_err(store_error)?;
        read_rows(resp, "select", table).await
    }

    async fn insert<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, CoreError> {
        let builder = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(body);
        let resp = self.authorized(builder).send().await.map_err(store_error)?;
        read_rows(resp, "insert", table)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::Store(format!("insert into {table} returned no rows")))
    }

    async fn update<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
        body: &B,
    ) -> Result<Option<T>, CoreError> {
        let builder = self
            .client
            .patch(self.table_url(table))
            .query(&eq_filters(filters))
            .header("Prefer", "return=representation")
            .json(body);
        let resp = self.authorized(builder).send().await.map_err(store_error)?;
        Ok(read_rows(resp, "update", table).await?.into_iter().next())
    }

    async fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<Option<T>, CoreError> {
        let builder = self
            .client
            .delete(self.table_url(table))
            .query(&eq_filters(filters))
            .header("Prefer", "return=representation");
        let resp = self.authorized(builder).send().await.map_err(store_error)?;
        Ok(read_rows(resp, "delete", table).await?.into_iter().next())
    }
}

/// Turn `[("email", "a@x.com")]` into PostgREST's `[("email", "eq.a@x.com")]`.
pub fn eq_filters(filters: &[(&str, &str)]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|(column, value)| ((*column).to_string(), format!("eq.{value}")))
        .collect()
}

fn store_error(e: reqwest::Error) -> CoreError {
    CoreError::Store(redact_query(&e.to_string()))
}

async fn read_rows<T: DeserializeOwned>(
    resp: Response,
    op: &str,
    table: &str,
) -> Result<Vec<T>, CoreError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(CoreError::Store(format!(
            "{op} on {table} failed with HTTP {status}: {body}"
        )));
    }
    tracing::debug!(table, op, %status, "store round trip");
    resp.json::<Vec<T>>()
        .await
        .map_err(|e| CoreError::Store(format!("{op} on {table} returned an unreadable body: {e}")))
}

#[async_trait]
impl HoldingsStore for RestStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, CoreError> {
        let rows: Vec<User> = self.select(USERS_TABLE, &[("email", email)]).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, CoreError> {
        self.insert(USERS_TABLE, &user).await
    }

    async fn insert_entry(&self, entry: PortfolioEntry) -> Result<PortfolioEntry, CoreError> {
        self.insert(PORTFOLIO_TABLE, &entry).await
    }

    async fn list_entries(&self, user_id: &str) -> Result<Vec<PortfolioEntry>, CoreError> {
        self.select(PORTFOLIO_TABLE, &[("user_id", user_id)]).await
    }

    async fn update_entry(
        &self,
        user_id: &str,
        coin_id: &str,
        update: EntryUpdate,
    ) -> Result<Option<PortfolioEntry>, CoreError> {
        self.update(
            PORTFOLIO_TABLE,
            &[("user_id", user_id), ("coin_id", coin_id)],
            &update,
        )
        .await
    }

    async fn delete_entry(
        &self,
        user_id: &str,
        coin_id: &str,
    ) -> Result<Option<PortfolioEntry>, CoreError> {
        self.delete(PORTFOLIO_TABLE, &[("user_id", user_id), ("coin_id", coin_id)])
            .await
    }

    async fn insert_alert(&self, alert: NewAlert) -> Result<AlertEntry, CoreError> {
        self.insert(ALERTS_TABLE, &alert).await
    }

    async fn list_alerts(&self, user_id: &str) -> Result<Vec<AlertEntry>, CoreError> {
        self.select(ALERTS_TABLE, &[("user_id", user_id)]).await
    }

    async fn delete_alert(&self, alert_id: &str) -> Result<Option<AlertEntry>, CoreError> {
        self.delete(ALERTS_TABLE, &[("id", alert_id)]).await
    }
}
