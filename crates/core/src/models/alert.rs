use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Direction of a price alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    /// Notify when the price rises above the target
    Above,
    /// Notify when the price falls below the target
    Below,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Above => "above",
            AlertType::Below => "below",
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsing is exact: only the lowercase wire values are accepted.
impl FromStr for AlertType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "above" => Ok(AlertType::Above),
            "below" => Ok(AlertType::Below),
            other => Err(CoreError::InvalidAlertType(other.to_string())),
        }
    }
}

/// A stored price alert (a row of the `alerts` table).
///
/// Alerts are inert records: nothing evaluates them against live prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    /// Store-assigned identifier
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "super::deserialize_id")]
    pub user_id: String,
    pub coin_id: String,
    pub target_price: f64,
    pub alert_type: AlertType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Insert payload for the `alerts` table. The store assigns `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAlert {
    pub user_id: String,
    pub coin_id: String,
    pub target_price: f64,
    pub alert_type: AlertType,
}

/// Alert counts by direction plus the raw list. Derived per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total_alerts: usize,
    pub above_alerts: usize,
    pub below_alerts: usize,
    pub alerts: Vec<AlertEntry>,
}
