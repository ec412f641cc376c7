//! Homework Bot
//!
//! A background poller that watches the homework review API and reports
//! status changes of the newest submission to a Telegram chat.
//!
//! Architecture:
//! - Configuration: secrets and tunables from the environment (and `.env`)
//! - Services: review API source and Telegram notifier behind traits
//! - Scheduler: the fetch / validate / notify / sleep loop
//!
//! Only missing configuration stops the process; every other failure is
//! reported to the chat and polling continues.

mod config;
mod scheduler;
mod service;

use anyhow::{Context, Result};
use hwbot_client::{ReviewClient, TelegramClient};
use hwbot_core::domain::PollCursor;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{Subscriber, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ConfigError};
use crate::scheduler::{PollState, StatusPoller};
use crate::service::TelegramNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    // Variables already in the environment take precedence over `.env`.
    dotenvy::dotenv().ok();

    init_logging(&Config::log_file_from_env())?;

    info!("Starting homework bot v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    info!(
        "Loaded configuration: endpoint={}, chat_id={}, retry_period={:?}",
        config.endpoint, config.telegram_chat_id, config.retry_period
    );

    let review = ReviewClient::new(
        config.endpoint.clone(),
        &config.practicum_token,
        config.request_timeout,
    )
    .context("Failed to build review API client")?;

    let telegram = TelegramClient::new(
        config.telegram_api_url.clone(),
        config.telegram_token.clone(),
        config.request_timeout,
    )
    .context("Failed to build Telegram client")?;
    let notifier = TelegramNotifier::new(telegram, config.telegram_chat_id.clone());

    let poller = StatusPoller::new(Arc::new(review), Arc::new(notifier), config.retry_period);

    poller.run(PollState::new(PollCursor::now())).await;

    Ok(())
}

/// Loads configuration, logging a fatal error when secrets are missing
fn load_config() -> Result<Config> {
    require_config(Config::from_env())
}

fn require_config(loaded: std::result::Result<Config, ConfigError>) -> Result<Config> {
    loaded.map_err(|e| {
        error!("Cannot start: {}", e);
        anyhow::Error::new(e).context("Invalid bot configuration")
    })
}

/// Logs to stdout and appends plain-text lines to `log_file`
fn init_logging(log_file: &Path) -> Result<()> {
    subscriber(open_log_file(log_file)?).init();
    Ok(())
}

fn open_log_file(log_file: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))
}

fn subscriber(file: File) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hwbot_poller=debug,hwbot_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
}
