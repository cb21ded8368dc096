use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "crypto-tracker")]
#[command(about = "Track crypto holdings, live valuation and price alerts", long_about = None)]
#[command(after_help = "\
Environment:
  SUPABASE_URL, SUPABASE_KEY (required)
  COINGECKO_BASE_URL, TRACKER_QUOTE_CURRENCY, TRACKER_HTTP_TIMEOUT_SECS, RUST_LOG")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Register a new user (returns the existing one if the email is taken)
    Register { email: String, password: String },

    /// Look up a user by email
    Login { email: String },

    /// Add a coin to a user's portfolio
    AddAsset {
        user_id: String,
        /// CoinGecko id, e.g. "bitcoin"
        coin_id: String,
        /// Display name, e.g. "Bitcoin"
        coin_name: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Cost per unit in the quote currency
        #[arg(allow_negative_numbers = true)]
        buy_price: f64,
    },

    /// Replace amount and buy price of a holding
    UpdateAsset {
        user_id: String,
        coin_id: String,
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        #[arg(allow_negative_numbers = true)]
        buy_price: f64,
    },

    /// Remove a holding
    DeleteAsset { user_id: String, coin_id: String },

    /// Value a user's portfolio against live prices
    Summary { user_id: String },

    /// Store a price alert
    AddAlert {
        user_id: String,
        coin_id: String,
        #[arg(allow_negative_numbers = true)]
        target_price: f64,
        /// "above" or "below"
        alert_type: String,
    },

    /// Remove an alert by id
    DeleteAlert { alert_id: String },

    /// List a user's alerts with counts by direction
    Alerts { user_id: String },
}
