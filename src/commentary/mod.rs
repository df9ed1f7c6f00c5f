pub mod gemini;

use crate::model::{CommentaryError, Metrics, Signals};
use std::fmt::Write;

pub use gemini::GeminiClient;

/// Free-text commentary on one instrument's metrics.
#[async_trait::async_trait]
pub trait CommentaryProvider: Send + Sync {
    async fn commentary(&self, metrics: &Metrics, summary: &str) -> Result<String, CommentaryError>;
}

/// Plain-text digest of the metrics and signal labels, used as commentary input.
pub fn signal_summary(metrics: &Metrics, signals: &Signals, five_day_trend: Option<f64>) -> String {
    let mut out = format!(
        "Current Price: ₹{:.2} ({:.2}% today)\n",
        metrics.price, metrics.price_change
    );
    match five_day_trend {
        Some(t) if t > 0.0 => {
            let _ = writeln!(out, "5-day trend: 📈 +{:.2}%", t);
        }
        Some(t) => {
            let _ = writeln!(out, "5-day trend: 📉 {:.2}%", t);
        }
        None => {}
    }
    let _ = write!(
        out,
        "Technical Indicators:\n\
         - Price vs 5-day MA: {:.2}%\n\
         - Price vs 20-day MA: {:.2}%\n\
         - RSI (14): {:.2} ({})\n\
         - Moving Average Trend: {}\n\
         - Volume Analysis: {}\n\
         - Volatility: {:.2}%",
        metrics.price_vs_ma5,
        metrics.price_vs_ma20,
        metrics.rsi,
        signals.rsi_zone,
        signals.trend,
        signals.volume,
        metrics.volatility,
    );
    out
}
