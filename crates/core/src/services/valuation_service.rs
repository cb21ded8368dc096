use crate::errors::CoreError;
use crate::models::analytics::{PortfolioSummary, PositionSummary};
use crate::models::portfolio::PortfolioEntry;
use crate::services::price_service::PriceService;
use crate::storage::traits::HoldingsStore;

/// Values a user's holdings against live prices.
///
/// Stateless: the store and price service are passed in per call. The only
/// error it can return is a failed store read. Prices are best-effort; an entry
/// without a live quote is valued at its own buy price (reported as flat).
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the full portfolio summary for `user_id` in `currency`.
    ///
    /// 1. Read all entries for the user (store order is kept).
    /// 2. Look up one live price per entry; absent ⇒ use the buy price.
    /// 3. Value each entry, then aggregate.
    ///
    /// Entries sharing a coin id each trigger their own lookup.
    pub async fn get_portfolio_summary(
        &self,
        store: &dyn HoldingsStore,
        prices: &PriceService,
        user_id: &str,
        currency: &str,
    ) -> Result<PortfolioSummary, CoreError> {
        let entries = store.list_entries(user_id).await?;

        let mut positions = Vec::with_capacity(entries.len());
        for entry in &entries {
            let live = prices.current_price(&entry.coin_id, currency).await;
            if live.is_none() {
                tracing::info!(
                    user_id,
                    coin_id = %entry.coin_id,
                    "No live price; valuing at buy price"
                );
            }
            positions.push(value_position(entry, live));
        }

        let summary = summarize(positions);
        tracing::debug!(
            user_id,
            total_assets = summary.total_assets,
            total_investment = summary.total_investment,
            total_current_value = summary.total_current_value,
            "Portfolio valued"
        );
        Ok(summary)
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Value one entry. `live_price = None` falls back to the entry's buy price.
pub fn value_position(entry: &PortfolioEntry, live_price: Option<f64>) -> PositionSummary {
    let current_price = live_price.unwrap_or(entry.buy_price);
    let investment = entry.amount * entry.buy_price;
    let current_value = entry.amount * current_price;
    let gain_loss = current_value - investment;

    PositionSummary {
        coin_id: entry.coin_id.clone(),
        coin_name: entry.coin_name.clone(),
        amount: entry.amount,
        buy_price: entry.buy_price,
        current_price,
        investment,
        current_value,
        gain_loss,
        gain_loss_pct: round2(return_pct(gain_loss, investment)),
    }
}

/// Aggregate valued positions into a portfolio summary.
/// Totals are summed at full precision; only the percentage is rounded.
pub fn summarize(positions: Vec<PositionSummary>) -> PortfolioSummary {
    let total_investment: f64 = positions.iter().map(|p| p.investment).sum();
    let total_current_value: f64 = positions.iter().map(|p| p.current_value).sum();
    let total_gain_loss = total_current_value - total_investment;

    PortfolioSummary {
        total_assets: positions.len(),
        total_investment,
        total_current_value,
        total_gain_loss,
        total_gain_loss_pct: round2(return_pct(total_gain_loss, total_investment)),
        portfolio: positions,
    }
}

/// `gain / investment × 100`, or 0 when nothing positive was invested.
pub fn return_pct(gain_loss: f64, investment: f64) -> f64 {
    if investment > 0.0 {
        gain_loss / investment * 100.0
    } else {
        0.0
    }
}

/// Round to 2 decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
