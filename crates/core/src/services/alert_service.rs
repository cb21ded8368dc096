use crate::errors::CoreError;
use crate::models::alert::{AlertEntry, AlertSummary, AlertType, NewAlert};
use crate::storage::traits::HoldingsStore;

/// Validates and stores price alerts, and summarizes them by direction.
///
/// Alerts are never evaluated against live prices here.
pub struct AlertService;

impl AlertService {
    pub fn new() -> Self {
        Self
    }

    /// Store a new alert.
    ///
    /// `alert_type` must be exactly `"above"` or `"below"`; anything else fails
    /// with `CoreError::InvalidAlertType` and nothing is persisted.
    pub async fn add_alert(
        &self,
        store: &dyn HoldingsStore,
        user_id: &str,
        coin_id: &str,
        target_price: f64,
        alert_type: &str,
    ) -> Result<AlertEntry, CoreError> {
        let alert_type: AlertType = alert_type.parse()?;
        if !target_price.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Target price must be a finite number, got {target_price}"
            )));
        }

        let created = store
            .insert_alert(NewAlert {
                user_id: user_id.to_string(),
                coin_id: coin_id.to_string(),
                target_price,
                alert_type,
            })
            .await?;
        tracing::debug!(user_id, coin_id, target_price, %alert_type, "Alert added");
        Ok(created)
    }

    /// Remove an alert by id. A missing id is `Ok(None)`, not an error.
    pub async fn delete_alert(
        &self,
        store: &dyn HoldingsStore,
        alert_id: &str,
    ) -> Result<Option<AlertEntry>, CoreError> {
        store.delete_alert(alert_id).await
    }

    /// All raw alerts for a user, in store order.
    pub async fn get_alerts(
        &self,
        store: &dyn HoldingsStore,
        user_id: &str,
    ) -> Result<Vec<AlertEntry>, CoreError> {
        store.list_alerts(user_id).await
    }

    /// Count a user's alerts by direction and echo the list.
    pub async fn get_alert_summary(
        &self,
        store: &dyn HoldingsStore,
        user_id: &str,
    ) -> Result<AlertSummary, CoreError> {
        let alerts = self.get_alerts(store, user_id).await?;
        Ok(summarize_alerts(alerts))
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}

/// Partition alerts into above/below counts.
pub fn summarize_alerts(alerts: Vec<AlertEntry>) -> AlertSummary {
    let above_alerts = alerts
        .iter()
        .filter(|a| a.alert_type == AlertType::Above)
        .count();
    let below_alerts = alerts
        .iter()
        .filter(|a| a.alert_type == AlertType::Below)
        .count();

    AlertSummary {
        total_alerts: alerts.len(),
        above_alerts,
        below_alerts,
        alerts,
    }
}
