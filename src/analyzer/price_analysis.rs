use crate::analyzer::market_indicators::{LONG_MA_WINDOW, MarketAnalyzer, SHORT_MA_WINDOW};
use crate::model::{HistorySeries, Metrics, RsiZone, Sample, Signals, Trend, VolumeRegime};

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;
const STRONG_TREND_PCT: f64 = 1.0;
const VOLUME_VERY_HIGH_PCT: f64 = 50.0;
const VOLUME_HIGH_PCT: f64 = 20.0;

/// Trait defining the interface for an instrument analyzer.
pub trait Analyzer {
    fn calculate_metrics(&self, sample: &Sample, avg_volume: f64, history: &HistorySeries) -> Metrics;
    fn classify(&self, metrics: &Metrics) -> Signals;
}

/// Implementation of the instrument analyzer.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    /// Derives price, volume, moving-average and RSI metrics for one instrument.
    /// An empty history yields zero moving averages and zero price-vs-MA values.
    fn calculate_metrics(&self, sample: &Sample, avg_volume: f64, history: &HistorySeries) -> Metrics {
        let prices = history.prices();
        let daily_range = MarketAnalyzer::daily_range(sample.high, sample.low);
        let ma5 = MarketAnalyzer::moving_average(&prices, SHORT_MA_WINDOW);
        let ma20 = MarketAnalyzer::moving_average(&prices, LONG_MA_WINDOW);

        Metrics {
            symbol: sample.symbol.clone(),
            price: sample.price,
            price_change: MarketAnalyzer::price_change(sample.price, sample.previous_close),
            daily_range,
            volatility: MarketAnalyzer::volatility(daily_range, sample.price),
            volume: sample.volume,
            volume_change: MarketAnalyzer::volume_change(sample.volume, avg_volume),
            ma5,
            ma20,
            price_vs_ma5: MarketAnalyzer::price_vs_ma(sample.price, ma5),
            price_vs_ma20: MarketAnalyzer::price_vs_ma(sample.price, ma20),
            rsi: MarketAnalyzer::compute_rsi(&prices),
        }
    }

    fn classify(&self, metrics: &Metrics) -> Signals {
        Signals {
            rsi_zone: rsi_zone(metrics.rsi),
            trend: trend(metrics.price_vs_ma5, metrics.price_vs_ma20),
            volume: volume_regime(metrics.volume_change),
        }
    }
}

pub fn rsi_zone(rsi: f64) -> RsiZone {
    if rsi > RSI_OVERBOUGHT {
        RsiZone::Overbought
    } else if rsi < RSI_OVERSOLD {
        RsiZone::Oversold
    } else {
        RsiZone::Neutral
    }
}

// Conditions overlap, the strong checks must run first.
pub fn trend(vs_ma5: f64, vs_ma20: f64) -> Trend {
    if vs_ma5 > STRONG_TREND_PCT && vs_ma20 > STRONG_TREND_PCT {
        Trend::StrongUptrend
    } else if vs_ma5 > 0.0 && vs_ma20 > 0.0 {
        Trend::Uptrend
    } else if vs_ma5 < -STRONG_TREND_PCT && vs_ma20 < -STRONG_TREND_PCT {
        Trend::StrongDowntrend
    } else if vs_ma5 < 0.0 && vs_ma20 < 0.0 {
        Trend::Downtrend
    } else {
        Trend::Sideways
    }
}

pub fn volume_regime(volume_change: f64) -> VolumeRegime {
    if volume_change > VOLUME_VERY_HIGH_PCT {
        VolumeRegime::VeryHigh
    } else if volume_change > VOLUME_HIGH_PCT {
        VolumeRegime::High
    } else if volume_change < -VOLUME_VERY_HIGH_PCT {
        VolumeRegime::VeryLow
    } else if volume_change < -VOLUME_HIGH_PCT {
        VolumeRegime::Low
    } else {
        VolumeRegime::Normal
    }
}
