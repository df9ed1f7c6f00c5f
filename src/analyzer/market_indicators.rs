pub const SHORT_MA_WINDOW: usize = 5;
pub const LONG_MA_WINDOW: usize = 20;
pub const RSI_PERIOD: usize = 14;
/// Returned by `compute_rsi` when the history is too short.
pub const NEUTRAL_RSI: f64 = 50.0;

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Percent change of `price` against `previous_close`.
    pub fn price_change(price: f64, previous_close: f64) -> f64 {
        Self::percent_delta(price, previous_close)
    }

    /// Day high minus day low.
    pub fn daily_range(high: f64, low: f64) -> f64 {
        high - low
    }

    /// Daily range as a percentage of price.
    pub fn volatility(range: f64, price: f64) -> f64 {
        if price == 0.0 {
            return 0.0;
        }
        range / price * 100.0
    }

    /// Percent change of today's volume against the trailing average, 0 without an average.
    pub fn volume_change(volume: u64, avg_volume: f64) -> f64 {
        Self::percent_delta(volume as f64, avg_volume)
    }

    /// Mean of the `window` most recent prices (newest first).
    /// Shorter series average over what is available; empty input gives 0.
    pub fn moving_average(prices: &[f64], window: usize) -> f64 {
        let n = window.min(prices.len());
        if n == 0 {
            return 0.0;
        }
        prices[..n].iter().sum::<f64>() / n as f64
    }

    /// Percent distance of `price` from a moving average, 0 when the average is 0.
    pub fn price_vs_ma(price: f64, ma: f64) -> f64 {
        Self::percent_delta(price, ma)
    }

    /// RSI over the 14 most recent day-over-day deltas of a newest-first series.
    pub fn compute_rsi(prices: &[f64]) -> f64 {
        if prices.len() < RSI_PERIOD + 1 {
            return NEUTRAL_RSI;
        }

        let mut gains = 0.0;
        let mut losses = 0.0;

        for w in prices[..=RSI_PERIOD].windows(2) {
            // w[0] is the newer price
            let delta = w[0] - w[1];
            if delta > 0.0 {
                gains += delta;
            } else {
                losses -= delta;
            }
        }

        let avg_gain = gains / RSI_PERIOD as f64;
        let avg_loss = losses / RSI_PERIOD as f64;

        if avg_loss == 0.0 {
            return 100.0;
        }
        if avg_gain == 0.0 {
            return 0.0;
        }

        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }

    /// Percent change over the last five sessions (history[4] to history[0]).
    pub fn five_day_trend(prices: &[f64]) -> Option<f64> {
        if prices.len() < SHORT_MA_WINDOW {
            return None;
        }
        let first = prices[SHORT_MA_WINDOW - 1];
        if first <= 0.0 {
            return None;
        }
        Some((prices[0] - first) / first * 100.0)
    }

    fn percent_delta(value: f64, base: f64) -> f64 {
        if base == 0.0 {
            return 0.0;
        }
        (value - base) / base * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rsi_is_100_for_rising_series() {
        // newest first: 115, 114, ..., 101
        let prices: Vec<f64> = (101..=115).rev().map(f64::from).collect();
        assert_eq!(MarketAnalyzer::compute_rsi(&prices), 100.0);
    }

    #[test]
    fn rsi_is_0_for_falling_series() {
        let prices: Vec<f64> = (101..=115).map(f64::from).collect();
        assert_eq!(MarketAnalyzer::compute_rsi(&prices), 0.0);
    }

    #[test]
    fn rsi_is_neutral_with_short_history() {
        let prices: Vec<f64> = (1..=14).map(f64::from).collect();
        assert_eq!(MarketAnalyzer::compute_rsi(&prices), NEUTRAL_RSI);
        assert_eq!(MarketAnalyzer::compute_rsi(&[]), NEUTRAL_RSI);
    }

    #[test]
    fn rsi_ignores_samples_beyond_fifteen() {
        let mut prices: Vec<f64> = (101..=115).rev().map(f64::from).collect();
        // a crash further back than 14 deltas must not matter
        prices.push(500.0);
        assert_eq!(MarketAnalyzer::compute_rsi(&prices), 100.0);
    }

    #[test]
    fn rsi_mixed_series() {
        // newest first; deltas alternate +2 / -1 starting from the newest
        let mut prices = vec![100.0];
        for i in 0..14 {
            let last = *prices.last().unwrap();
            let next = if i % 2 == 0 { last - 2.0 } else { last + 1.0 };
            prices.push(next);
        }
        // gains = 7 * 2, losses = 7 * 1 -> RS = 2 -> RSI = 66.67
        assert!(approx(MarketAnalyzer::compute_rsi(&prices), 100.0 - 100.0 / 3.0));
    }

    #[test]
    fn moving_average_uses_available_points_when_short() {
        let prices = [10.0, 20.0, 30.0];
        assert!(approx(MarketAnalyzer::moving_average(&prices, 5), 20.0));
        assert!(approx(MarketAnalyzer::moving_average(&prices, 20), 20.0));
    }

    #[test]
    fn moving_average_takes_most_recent_window() {
        let prices = [6.0, 5.0, 4.0, 3.0, 2.0, 1.0, 100.0];
        assert!(approx(MarketAnalyzer::moving_average(&prices, 5), 4.0));
    }

    #[test]
    fn moving_average_of_empty_series_is_zero() {
        assert_eq!(MarketAnalyzer::moving_average(&[], 5), 0.0);
    }

    #[test]
    fn price_vs_zero_ma_is_zero() {
        let v = MarketAnalyzer::price_vs_ma(123.0, 0.0);
        assert_eq!(v, 0.0);
        assert!(v.is_finite());
    }

    #[test]
    fn volume_change_guards_zero_average() {
        assert_eq!(MarketAnalyzer::volume_change(1_000, 0.0), 0.0);
        assert!(approx(MarketAnalyzer::volume_change(150, 100.0), 50.0));
    }

    #[test]
    fn price_change_and_volatility() {
        assert!(approx(MarketAnalyzer::price_change(110.0, 100.0), 10.0));
        let range = MarketAnalyzer::daily_range(105.0, 95.0);
        assert!(approx(range, 10.0));
        assert!(approx(MarketAnalyzer::volatility(range, 200.0), 5.0));
    }

    #[test]
    fn five_day_trend_needs_five_points() {
        assert_eq!(MarketAnalyzer::five_day_trend(&[1.0, 2.0]), None);
        let trend = MarketAnalyzer::five_day_trend(&[110.0, 1.0, 1.0, 1.0, 100.0]).unwrap();
        assert!(approx(trend, 10.0));
    }
}
