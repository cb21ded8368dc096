use std::process::ExitCode;

use clap::Parser;
use crypto_tracker_core::config::TrackerConfig;
use crypto_tracker_core::errors::CoreError;
use crypto_tracker_core::CryptoTracker;
use serde::Serialize;
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod command;

use command::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crypto_tracker=info,crypto_tracker_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match TrackerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let tracker = CryptoTracker::from_config(&config);
    match run(&tracker, cli.command).await {
        Ok(Outcome::Success(body)) => print_json(&body),
        Ok(Outcome::Rejected(detail)) => {
            print_json(&json!({ "status": "error", "detail": detail }));
            ExitCode::FAILURE
        }
        Err(e @ (CoreError::InvalidAlertType(_) | CoreError::ValidationError(_))) => {
            print_json(&json!({ "status": "error", "detail": e.to_string() }));
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

enum Outcome {
    Success(Value),
    Rejected(String),
}

fn success(key: &str, value: Value) -> Outcome {
    let mut body = json!({ "status": "success" });
    body[key] = value;
    Outcome::Success(body)
}

async fn run(tracker: &CryptoTracker, command: Command) -> Result<Outcome, CoreError> {
    let outcome = match command {
        Command::Register { email, password } => {
            let registration = tracker.register_user(&email, &password).await?;
            if registration.is_created() {
                success("user", to_json(registration.user())?)
            } else {
                Outcome::Rejected(
                    crypto_tracker_core::services::user_service::USER_EXISTS_MESSAGE.to_string(),
                )
            }
        }
        Command::Login { email } => match tracker.login_user(&email).await? {
            Some(user) => success("user", to_json(user)?),
            None => Outcome::Rejected("User not found".to_string()),
        },
        Command::AddAsset {
            user_id,
            coin_id,
            coin_name,
            amount,
            buy_price,
        } => {
            let entry = tracker
                .add_asset(&user_id, &coin_id, &coin_name, amount, buy_price)
                .await?;
            success("asset", to_json(entry)?)
        }
        Command::UpdateAsset {
            user_id,
            coin_id,
            amount,
            buy_price,
        } => {
            let entry = tracker
                .update_asset(&user_id, &coin_id, amount, buy_price)
                .await?;
            success("asset", to_json(entry)?)
        }
        Command::DeleteAsset { user_id, coin_id } => {
            let removed = tracker.delete_asset(&user_id, &coin_id).await?;
            success("result", to_json(removed)?)
        }
        Command::Summary { user_id } => {
            let summary = tracker.get_portfolio_summary(&user_id).await?;
            success("summary", to_json(summary)?)
        }
        Command::AddAlert {
            user_id,
            coin_id,
            target_price,
            alert_type,
        } => {
            let alert = tracker
                .add_alert(&user_id, &coin_id, target_price, &alert_type)
                .await?;
            success("alert", to_json(alert)?)
        }
        Command::DeleteAlert { alert_id } => {
            let removed = tracker.delete_alert(&alert_id).await?;
            success("result", to_json(removed)?)
        }
        Command::Alerts { user_id } => {
            let summary = tracker.get_alert_summary(&user_id).await?;
            success("summary", to_json(summary)?)
        }
    };
    Ok(outcome)
}

fn to_json<T: Serialize>(value: T) -> Result<Value, CoreError> {
    serde_json::to_value(value).map_err(|e| CoreError::Serialization(e.to_string()))
}

fn print_json(value: &Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", CoreError::Serialization(e.to_string()));
            ExitCode::FAILURE
        }
    }
}
