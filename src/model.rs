// Core structs: Sample, HistorySeries, Metrics, IndexReturn and the error types
use std::fmt;
use thiserror::Error;

/// One instrument observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub symbol: String,
    pub price: f64,
    pub previous_close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

impl Sample {
    /// A sample can only enter the indicator engine with positive prices.
    pub fn is_usable(&self) -> bool {
        self.price > 0.0 && self.previous_close > 0.0
    }
}

/// Daily samples for one symbol, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySeries {
    samples: Vec<Sample>,
}

impl HistorySeries {
    pub fn new_newest_first(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Builds a series from chronologically ordered samples (oldest first).
    pub fn from_oldest_first(mut samples: Vec<Sample>) -> Self {
        samples.reverse();
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.price).collect()
    }

    /// Mean daily volume over the series, 0 when empty.
    pub fn average_volume(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: u64 = self.samples.iter().map(|s| s.volume).sum();
        total as f64 / self.samples.len() as f64
    }
}

/// Current quote plus trailing history, as returned by a price history provider.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    pub current: Sample,
    pub history: HistorySeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub symbol: String,
    pub price: f64,
    pub price_change: f64,
    pub daily_range: f64,
    pub volatility: f64,
    pub volume: u64,
    pub volume_change: f64,
    pub ma5: f64,
    pub ma20: f64,
    pub price_vs_ma5: f64,
    pub price_vs_ma20: f64,
    pub rsi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    StrongUptrend,
    Uptrend,
    Sideways,
    Downtrend,
    StrongDowntrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeRegime {
    VeryLow,
    Low,
    Normal,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    pub rsi_zone: RsiZone,
    pub trend: Trend,
    pub volume: VolumeRegime,
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RsiZone::Oversold => "Oversold",
            RsiZone::Neutral => "Neutral",
            RsiZone::Overbought => "Overbought",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::StrongUptrend => "Strong Uptrend",
            Trend::Uptrend => "Uptrend",
            Trend::Sideways => "Sideways",
            Trend::Downtrend => "Downtrend",
            Trend::StrongDowntrend => "Strong Downtrend",
        };
        f.write_str(label)
    }
}

impl fmt::Display for VolumeRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VolumeRegime::VeryLow => "Very Low Volume",
            VolumeRegime::Low => "Low Volume",
            VolumeRegime::Normal => "Normal Volume",
            VolumeRegime::High => "High Volume",
            VolumeRegime::VeryHigh => "Very High Volume",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexReturn {
    pub index: String,
    pub return_pct: f64,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("no data for {0}")]
    NoData(String),
    #[error("invalid price data for {symbol}: price={price:.2}, previousClose={previous_close:.2}")]
    InvalidSample {
        symbol: String,
        price: f64,
        previous_close: f64,
    },
}

#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("commentary API key not set")]
    MissingApiKey,
    #[error("commentary request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("commentary API responded {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse commentary response: {0}")]
    Parse(String),
    #[error("no commentary returned")]
    Empty,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Telegram credentials not set")]
    MissingCredentials,
    #[error("send failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram API responded [{status}]: {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(price: f64, volume: u64) -> Sample {
        Sample {
            symbol: "TEST".into(),
            price,
            previous_close: price,
            high: price,
            low: price,
            volume,
        }
    }

    #[test]
    fn from_oldest_first_reverses_order() {
        let series = HistorySeries::from_oldest_first(vec![sample(1.0, 0), sample(2.0, 0), sample(3.0, 0)]);
        assert_eq!(series.prices(), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn average_volume_of_empty_series_is_zero() {
        assert_eq!(HistorySeries::default().average_volume(), 0.0);
    }

    #[test]
    fn average_volume_is_mean_of_samples() {
        let series = HistorySeries::new_newest_first(vec![sample(1.0, 100), sample(1.0, 300)]);
        assert_eq!(series.average_volume(), 200.0);
    }

    #[test]
    fn usable_sample_requires_positive_prices() {
        let mut s = sample(10.0, 1);
        assert!(s.is_usable());
        s.previous_close = 0.0;
        assert!(!s.is_usable());
    }

    #[test]
    fn labels_render_human_readable() {
        assert_eq!(Trend::StrongDowntrend.to_string(), "Strong Downtrend");
        assert_eq!(VolumeRegime::VeryHigh.to_string(), "Very High Volume");
        assert_eq!(RsiZone::Overbought.to_string(), "Overbought");
    }
}
