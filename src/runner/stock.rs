use crate::analyzer::market_indicators::MarketAnalyzer;
use crate::analyzer::{Analyzer, AnalyzerImpl};
use crate::commentary::{signal_summary, CommentaryProvider};
use crate::config::AppConfig;
use crate::fetcher::PriceHistoryProvider;
use crate::notifier::{broadcast, MessageFormat, NotificationSink};
use crate::report::{compose_tier_message, format_block, partition, InstrumentReport, Tier, BATCH_SIZE};
use crate::utils::format_date;
use chrono::NaiveDate;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// What a stock-analysis run produced.
#[derive(Debug, Default)]
pub struct StockRunSummary {
    /// Escaped messages in dispatch order.
    pub messages: Vec<String>,
    pub reported: usize,
    pub skipped: Vec<String>,
}

pub struct StockRunner {
    config: Arc<AppConfig>,
    prices: Arc<dyn PriceHistoryProvider>,
    commentary: Option<Arc<dyn CommentaryProvider>>,
    sink: Option<Arc<dyn NotificationSink>>,
    analyzer: AnalyzerImpl,
}

impl StockRunner {
    pub fn new(
        config: Arc<AppConfig>,
        prices: Arc<dyn PriceHistoryProvider>,
        commentary: Option<Arc<dyn CommentaryProvider>>,
        sink: Option<Arc<dyn NotificationSink>>,
    ) -> Self {
        Self {
            config,
            prices,
            commentary,
            sink,
            analyzer: AnalyzerImpl::new(),
        }
    }

    /// One pass over the configured universe: tier by tier, batch by batch.
    pub async fn run(&self, today: NaiveDate) -> StockRunSummary {
        let universe = self.config.universe();
        info!("Running stock analysis for {} symbols", universe.len());
        if self.commentary.is_none() {
            warn!("Commentary API key not set; reports will carry metrics only");
        }

        let date_label = format_date(today);
        let mut summary = StockRunSummary::default();

        for (tier, symbols) in partition(&universe, &self.config.tiers) {
            if symbols.is_empty() {
                info!("No symbols in {}", tier);
                continue;
            }
            info!("Processing {} ({} symbols)", tier, symbols.len());

            for batch in symbols.chunks(BATCH_SIZE) {
                self.process_batch(tier, batch, &date_label, &mut summary).await;
            }
        }

        info!(
            "Stock analysis finished: {} reported, {} skipped, {} messages",
            summary.reported,
            summary.skipped.len(),
            summary.messages.len()
        );
        summary
    }

    async fn process_batch(
        &self,
        tier: Tier,
        batch: &[String],
        date_label: &str,
        summary: &mut StockRunSummary,
    ) {
        // join_all keeps input order regardless of completion order
        let results = join_all(batch.iter().map(|symbol| self.analyze_symbol(symbol))).await;

        let mut blocks = Vec::with_capacity(batch.len());
        for (symbol, result) in batch.iter().zip(results) {
            match result {
                Some(report) => blocks.push(format_block(&report)),
                None => summary.skipped.push(symbol.clone()),
            }
        }

        if blocks.is_empty() {
            warn!("No reportable symbols in {} batch {:?}", tier, batch);
            return;
        }

        summary.reported += blocks.len();
        let message = compose_tier_message(tier, date_label, &blocks);
        info!("{}", message);
        self.dispatch(&message).await;
        summary.messages.push(message);
    }

    async fn analyze_symbol(&self, symbol: &str) -> Option<InstrumentReport> {
        let data = match self.prices.fetch(symbol).await {
            Ok(data) => data,
            Err(e) => {
                warn!("Error fetching {}: {}", symbol, e);
                return None;
            }
        };

        let avg_volume = data.history.average_volume();
        let metrics = self.analyzer.calculate_metrics(&data.current, avg_volume, &data.history);
        let signals = self.analyzer.classify(&metrics);
        info!(
            "{}: price {:.2} ({:.2}%), RSI {:.2}, {}",
            symbol, metrics.price, metrics.price_change, metrics.rsi, signals.trend
        );

        let commentary = match &self.commentary {
            Some(provider) => {
                let trend = MarketAnalyzer::five_day_trend(&data.history.prices());
                let text = signal_summary(&metrics, &signals, trend);
                match provider.commentary(&metrics, &text).await {
                    Ok(answer) => Some(answer),
                    Err(e) => {
                        warn!("Error getting insights for {}: {}; reporting metrics only", symbol, e);
                        None
                    }
                }
            }
            None => None,
        };

        Some(InstrumentReport {
            metrics,
            signals,
            commentary,
        })
    }

    async fn dispatch(&self, message: &str) {
        match &self.sink {
            Some(sink) => {
                let delivered = broadcast(
                    &**sink,
                    &self.config.telegram_chat_ids,
                    message,
                    MessageFormat::MarkdownV2,
                )
                .await;
                info!(
                    "Delivered to {}/{} chats",
                    delivered,
                    self.config.telegram_chat_ids.len()
                );
            }
            None => warn!("Telegram credentials not set; message not sent"),
        }
    }
}
