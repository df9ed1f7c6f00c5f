// notifier/telegram/sender.rs

use crate::fetcher::retry::retry;
use crate::model::NotifyError;
use crate::notifier::MessageFormat;
use crate::notifier::telegram::TelegramNotifier;
use tracing::{info, warn};

/// Form fields for a `sendMessage` call.
pub fn message_params(chat_id: &str, text: &str, format: MessageFormat) -> Vec<(&'static str, String)> {
    let mut params = vec![("chat_id", chat_id.to_string()), ("text", text.to_string())];
    if format == MessageFormat::MarkdownV2 {
        params.push(("parse_mode", "MarkdownV2".to_string()));
    }
    params
}

/// Sends a text message to one chat via the Bot API.
pub async fn send_text(
    notifier: &TelegramNotifier,
    chat_id: &str,
    text: &str,
    format: MessageFormat,
) -> Result<(), NotifyError> {
    let url = format!("https://api.telegram.org/bot{}/sendMessage", notifier.bot_token);
    let params = message_params(chat_id, text, format);
    let (client, url, params) = (&notifier.client, url.as_str(), &params);
    let label = format!("telegram chat {}", chat_id);

    retry(&notifier.retry, &label, || async move {
        let response = client.post(url).form(params).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "unknown".into());
        if !status.is_success() {
            warn!("❌ Telegram API responded [{}]: {}", status, body);
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }
        info!("✅ Telegram response [{}]", status);
        Ok(())
    })
    .await
}
