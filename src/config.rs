use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

// Large Cap (market cap > ₹50,000 Cr)
pub const DEFAULT_LARGE_CAP: [&str; 5] = ["RELIANCE.NS", "TCS.NS", "HDFCBANK.NS", "INFY.NS", "ICICIBANK.NS"];
// Mid Cap (₹10,000-50,000 Cr)
pub const DEFAULT_MID_CAP: [&str; 5] = ["TATAMOTORS.NS", "ADANIENT.NS", "BAJFINANCE.NS", "TITAN.NS", "MARICO.NS"];
// Small Cap (< ₹10,000 Cr)
pub const DEFAULT_SMALL_CAP: [&str; 5] = ["JUBLFOOD.NS", "FORTIS.NS", "KALYANKJIL.NS", "SUPREMEIND.NS", "VBL.NS"];

pub const DEFAULT_INDICES: [&str; 5] = [
    "Nifty 50",
    "NIFTY100 LOWVOL30",
    "Nifty200Momentm30",
    "Nifty500 Momentum 50",
    "Nifty Midcap150 Momentum 50",
];

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_GEMINI_KEY: &str = "GEMINI_API_KEY";
pub const ENV_STOCK_LIST: &str = "STOCK_LIST";

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Reference lists used to place symbols into market-cap tiers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    pub large_cap: Vec<String>,
    pub mid_cap: Vec<String>,
    pub small_cap: Vec<String>,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            large_cap: owned(&DEFAULT_LARGE_CAP),
            mid_cap: owned(&DEFAULT_MID_CAP),
            small_cap: owned(&DEFAULT_SMALL_CAP),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 2_000,
            max_delay_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_ids: Vec<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Symbols to analyse; the three tier lists combined when unset.
    pub stock_list: Option<Vec<String>>,
    pub tiers: TierConfig,
    pub indices: Vec<String>,
    pub history_days: i64,
    pub market_fall_window_days: i64,
    pub retry: RetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram_bot_token: None,
            telegram_chat_ids: Vec::new(),
            gemini_api_key: None,
            gemini_model: "gemini-1.5-flash".into(),
            stock_list: None,
            tiers: TierConfig::default(),
            indices: owned(&DEFAULT_INDICES),
            history_days: 30,
            market_fall_window_days: 7,
            retry: RetryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Instrument universe in configured order.
    pub fn universe(&self) -> Vec<String> {
        match &self.stock_list {
            Some(list) => list.clone(),
            None => self
                .tiers
                .large_cap
                .iter()
                .chain(&self.tiers.mid_cap)
                .chain(&self.tiers.small_cap)
                .cloned()
                .collect(),
        }
    }

    pub fn has_telegram(&self) -> bool {
        self.telegram_bot_token.is_some() && !self.telegram_chat_ids.is_empty()
    }

    /// Overlays environment values read through `lookup`. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(token) = read(ENV_BOT_TOKEN) {
            self.telegram_bot_token = Some(token);
        }
        if let Some(ids) = read(ENV_CHAT_ID) {
            self.telegram_chat_ids = split_list(&ids);
        }
        if let Some(key) = read(ENV_GEMINI_KEY) {
            self.gemini_api_key = Some(key);
        }
        if let Some(list) = read(ENV_STOCK_LIST) {
            self.stock_list = Some(split_list(&list));
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid("retry.max_attempts must be at least 1".into()));
        }
        if self.history_days <= 0 {
            return Err(ConfigError::Invalid("history_days must be positive".into()));
        }
        if self.market_fall_window_days <= 0 {
            return Err(ConfigError::Invalid("market_fall_window_days must be positive".into()));
        }
        Ok(())
    }
}

/// Splits a comma separated list, trimming entries and dropping empty ones.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Loads defaults, then the optional JSON file, then the process environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        }
        None => AppConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());
    config.validate()?;
    Ok(config)
}
