pub mod sender;

use crate::fetcher::retry::RetryPolicy;
use crate::model::NotifyError;
use crate::notifier::{MessageFormat, NotificationSink};
use reqwest::Client;

pub struct TelegramNotifier {
    pub bot_token: String,
    pub client: Client,
    pub retry: RetryPolicy,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, retry: RetryPolicy) -> Result<Self, NotifyError> {
        if bot_token.trim().is_empty() {
            return Err(NotifyError::MissingCredentials);
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        Ok(Self {
            bot_token,
            client,
            retry,
        })
    }
}

#[async_trait::async_trait]
impl NotificationSink for TelegramNotifier {
    async fn send(&self, destination: &str, text: &str, format: MessageFormat) -> Result<(), NotifyError> {
        sender::send_text(self, destination, text, format).await
    }
}
