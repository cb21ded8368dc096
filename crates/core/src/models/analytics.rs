use serde::{Deserialize, Serialize};

/// Valuation of a whole portfolio against live prices.
///
/// Recomputed on every request; it has no identity beyond the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Number of entries valued (one per stored row)
    pub total_assets: usize,

    /// Sum of `amount × buy_price` over all entries
    pub total_investment: f64,

    /// Sum of `amount × current_price` over all entries
    pub total_current_value: f64,

    /// `total_current_value − total_investment`
    pub total_gain_loss: f64,

    /// Percentage return on total investment, rounded to 2 decimals (0 when nothing invested)
    pub total_gain_loss_pct: f64,

    /// Per-entry details, in store order
    pub portfolio: Vec<PositionSummary>,
}

impl PortfolioSummary {
    /// The summary of a portfolio with no entries.
    pub fn empty() -> Self {
        Self {
            total_assets: 0,
            total_investment: 0.0,
            total_current_value: 0.0,
            total_gain_loss: 0.0,
            total_gain_loss_pct: 0.0,
            portfolio: Vec::new(),
        }
    }
}

/// Valuation of a single portfolio entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSummary {
    pub coin_id: String,
    pub coin_name: String,
    pub amount: f64,
    pub buy_price: f64,

    /// Live quote, or `buy_price` when no quote could be obtained
    pub current_price: f64,

    /// `amount × buy_price`, full precision
    pub investment: f64,

    /// `amount × current_price`, full precision
    pub current_value: f64,

    /// `current_value − investment`, full precision
    pub gain_loss: f64,

    /// Percentage return, rounded to 2 decimals (0 when `investment` is not positive)
    pub gain_loss_pct: f64,
}
