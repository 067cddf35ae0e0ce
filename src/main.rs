//! Sportsbook - a terminal client for a sports-betting backend.

use sportsbook::api::ApiClientBuilder;
use sportsbook::payments::StripeProcessor;
use sportsbook::session::{AuthGate, FileSessionStore};
use sportsbook::{App, Config, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load_or_default()?;

    // Log to a file; stdout belongs to the TUI
    let log_dir = sportsbook::config::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;
    let (writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&log_dir, "sportsbook.log"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sportsbook=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    tracing::info!("Starting against {}", config.api.base_url);

    // One HTTP client for the backend and the payment processor
    let http = reqwest::Client::builder()
        .timeout(config.api.timeout())
        .build()?;
    let api = ApiClientBuilder::new()
        .config(config.api.clone())
        .http_client(http.clone())
        .build()?;
    let payments = StripeProcessor::new(config.payments.clone(), http);
    let gate = AuthGate::restore(Box::new(FileSessionStore::in_data_dir()?));

    // Run the application
    let mut app = App::new(config, Arc::new(api), Arc::new(payments), gate)?;
    app.run().await?;

    Ok(())
}
