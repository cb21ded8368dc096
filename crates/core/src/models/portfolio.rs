use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user's holding of one coin (a row of the `portfolio` table).
///
/// Logically unique on `(user_id, coin_id)`. Non-negativity and uniqueness
/// are enforced at the boundary and by the store, never by the valuation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// Owner reference; the entry does not own the user
    #[serde(deserialize_with = "super::deserialize_id")]
    pub user_id: String,

    /// Market-data key, e.g. "bitcoin"
    pub coin_id: String,

    /// Display name, e.g. "Bitcoin"
    pub coin_name: String,

    /// Units held
    pub amount: f64,

    /// Cost basis per unit, in the quote currency
    pub buy_price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl PortfolioEntry {
    pub fn new(
        user_id: impl Into<String>,
        coin_id: impl Into<String>,
        coin_name: impl Into<String>,
        amount: f64,
        buy_price: f64,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            coin_id: coin_id.into(),
            coin_name: coin_name.into(),
            amount,
            buy_price,
            created_at: None,
        }
    }
}

/// Fields replaced by an asset update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryUpdate {
    pub amount: f64,
    pub buy_price: f64,
}
