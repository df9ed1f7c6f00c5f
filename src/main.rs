mod analyzer;
mod cli;
mod commentary;
mod config;
mod fetcher;
mod model;
mod notifier;
mod report;
mod runner;
mod utils;

use chrono::Local;
use clap::Parser;
use cli::{Cli, Command};
use commentary::{CommentaryProvider, GeminiClient};
use config::{load_config, AppConfig};
use fetcher::{NiftyIndexClient, RetryPolicy, YahooChartClient};
use notifier::{NotificationSink, TelegramNotifier};
use runner::{MarketFallRunner, StockRunner};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let cli = Cli::parse();

    let config: Arc<AppConfig> = match load_config(cli.config.as_deref()) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let retry = RetryPolicy::from(&config.retry);
    let sink = build_sink(&config, retry);
    let today = Local::now().date_naive();

    match cli.command {
        Command::Stock => {
            info!("Running stock market analysis...");
            let prices = match YahooChartClient::new(retry, config.history_days) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    error!("Failed to create price client: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let commentary = build_commentary(&config, retry);
            StockRunner::new(config, prices, commentary, sink).run(today).await;
        }
        Command::Marketfall => {
            info!("Running market fall check...");
            let indices = match NiftyIndexClient::new(retry) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    error!("Failed to create index client: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            MarketFallRunner::new(config, indices, sink).run(today).await;
        }
    }

    ExitCode::SUCCESS
}

/// Telegram sink, or `None` when credentials are missing.
fn build_sink(config: &AppConfig, retry: RetryPolicy) -> Option<Arc<dyn NotificationSink>> {
    if !config.has_telegram() {
        warn!("Warning: Telegram credentials not set");
        return None;
    }
    let token = config.telegram_bot_token.clone().unwrap_or_default();
    match TelegramNotifier::new(token, retry) {
        Ok(notifier) => Some(Arc::new(notifier)),
        Err(e) => {
            warn!("Telegram notifier unavailable: {}", e);
            None
        }
    }
}

/// Commentary provider, or `None` when no API key is configured.
fn build_commentary(config: &AppConfig, retry: RetryPolicy) -> Option<Arc<dyn CommentaryProvider>> {
    let key = config.gemini_api_key.clone()?;
    match GeminiClient::new(key, config.gemini_model.clone(), retry) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("Commentary provider unavailable: {}", e);
            None
        }
    }
}
