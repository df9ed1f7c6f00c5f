use crate::analyzer::market_fall::{evaluate, MarketVerdict};
use crate::config::AppConfig;
use crate::fetcher::IndexReturnProvider;
use crate::model::IndexReturn;
use crate::notifier::{broadcast, MessageFormat, NotificationSink};
use crate::report::market_fall_message;
use crate::utils::DateWindow;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{info, warn};

pub struct MarketFallRunner {
    config: Arc<AppConfig>,
    provider: Arc<dyn IndexReturnProvider>,
    sink: Option<Arc<dyn NotificationSink>>,
}

impl MarketFallRunner {
    pub fn new(
        config: Arc<AppConfig>,
        provider: Arc<dyn IndexReturnProvider>,
        sink: Option<Arc<dyn NotificationSink>>,
    ) -> Self {
        Self {
            config,
            provider,
            sink,
        }
    }

    /// Fetches every tracked index over the trailing window and notifies the verdict.
    pub async fn run(&self, today: NaiveDate) -> (MarketVerdict, String) {
        let window = DateWindow::trailing(today, self.config.market_fall_window_days);
        let returns = self.collect_returns(&window).await;

        let verdict = evaluate(&returns);
        match &verdict {
            MarketVerdict::Falling(_) => info!("All {} index returns are negative", returns.len()),
            MarketVerdict::Routine => info!("Not all returns are negative."),
            MarketVerdict::NoData => warn!("No index returns obtained; falling-market alert suppressed"),
        }

        let message = market_fall_message(&verdict, &window);
        info!("{}", message);
        match &self.sink {
            Some(sink) => {
                broadcast(&**sink, &self.config.telegram_chat_ids, &message, MessageFormat::Plain).await;
            }
            None => warn!("Telegram credentials not set; message not sent"),
        }

        (verdict, message)
    }

    async fn collect_returns(&self, window: &DateWindow) -> Vec<IndexReturn> {
        let mut returns = Vec::with_capacity(self.config.indices.len());
        for index in &self.config.indices {
            match self.provider.fetch_return(index, window).await {
                Ok(return_pct) => {
                    info!("{}: {:.4}%", index, return_pct);
                    returns.push(IndexReturn {
                        index: index.clone(),
                        return_pct,
                    });
                }
                Err(e) => warn!("Error fetching return for {}: {}", index, e),
            }
        }
        returns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FetchError, NotifyError};
    use crate::report::market::ROUTINE_MESSAGE;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeIndices {
        returns: HashMap<String, f64>,
        seen_window: Mutex<Option<DateWindow>>,
    }

    impl FakeIndices {
        fn new(pairs: &[(&str, f64)]) -> Arc<Self> {
            Arc::new(Self {
                returns: pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
                seen_window: Mutex::new(None),
            })
        }
    }

    #[async_trait::async_trait]
    impl IndexReturnProvider for FakeIndices {
        async fn fetch_return(&self, index: &str, window: &DateWindow) -> Result<f64, FetchError> {
            *self.seen_window.lock().unwrap() = Some(*window);
            self.returns
                .get(index)
                .copied()
                .ok_or_else(|| FetchError::Parse(format!("{index}: bad body")))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<(String, MessageFormat)>>,
    }

    #[async_trait::async_trait]
    impl NotificationSink for RecordingSink {
        async fn send(&self, _destination: &str, text: &str, format: MessageFormat) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push((text.to_string(), format));
            Ok(())
        }
    }

    fn config(indices: &[&str]) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            indices: indices.iter().map(|s| s.to_string()).collect(),
            telegram_bot_token: Some("token".into()),
            telegram_chat_ids: vec!["1".into()],
            ..AppConfig::default()
        })
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
    }

    #[tokio::test]
    async fn all_negative_sends_alert() {
        let provider = FakeIndices::new(&[("A", -1.2), ("B", -0.5), ("C", -3.0)]);
        let sink = Arc::new(RecordingSink::default());
        let runner = MarketFallRunner::new(config(&["A", "B", "C"]), provider.clone(), Some(sink.clone()));

        let (verdict, message) = runner.run(today()).await;

        assert!(matches!(verdict, MarketVerdict::Falling(ref r) if r.len() == 3));
        assert!(message.starts_with("Indices are negative, from: 01-Jan-2025 to: 08-Jan-2025"));
        assert!(message.contains("C: -3.000000"));
        assert_eq!(*sink.sent.lock().unwrap(), vec![(message, MessageFormat::Plain)]);

        let window = provider.seen_window.lock().unwrap().unwrap();
        assert_eq!(window, DateWindow::trailing(today(), 7));
    }

    #[tokio::test]
    async fn one_positive_sends_routine() {
        let provider = FakeIndices::new(&[("A", -1.2), ("B", 0.3), ("C", -3.0)]);
        let runner = MarketFallRunner::new(config(&["A", "B", "C"]), provider, None);

        let (verdict, message) = runner.run(today()).await;

        assert_eq!(verdict, MarketVerdict::Routine);
        assert_eq!(message, ROUTINE_MESSAGE);
    }

    #[tokio::test]
    async fn failed_index_is_excluded_from_decision() {
        // B fails to parse; the remaining returns are all negative
        let provider = FakeIndices::new(&[("A", -1.0), ("C", -2.0)]);
        let runner = MarketFallRunner::new(config(&["A", "B", "C"]), provider, None);

        let (verdict, message) = runner.run(today()).await;

        assert!(matches!(verdict, MarketVerdict::Falling(ref r) if r.len() == 2));
        assert!(!message.contains("B:"));
    }

    #[tokio::test]
    async fn no_returns_do_not_trigger_alert() {
        let provider = FakeIndices::new(&[]);
        let sink = Arc::new(RecordingSink::default());
        let runner = MarketFallRunner::new(config(&["A", "B"]), provider, Some(sink.clone()));

        let (verdict, message) = runner.run(today()).await;

        assert_eq!(verdict, MarketVerdict::NoData);
        assert!(!message.contains("Indices are negative"));
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }
}
