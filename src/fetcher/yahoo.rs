// Yahoo Finance chart endpoint: current quote and daily history
use crate::fetcher::retry::{retry, RetryPolicy};
use crate::fetcher::traits::PriceHistoryProvider;
use crate::model::{FetchError, HistorySeries, PriceHistory, Sample};
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    regular_market_day_high: Option<f64>,
    regular_market_day_low: Option<f64>,
    regular_market_volume: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

fn first_result(symbol: &str, body: &str) -> Result<ChartResult, FetchError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(format!("{symbol}: {e}")))?;
    if let Some(err) = response.chart.error {
        return Err(FetchError::Parse(format!("{symbol}: {} ({})", err.description, err.code)));
    }
    response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| FetchError::NoData(symbol.to_string()))
}

/// Parses the current quote from a chart response body.
pub fn parse_quote(symbol: &str, body: &str) -> Result<Sample, FetchError> {
    let meta = first_result(symbol, body)?.meta;
    let price = meta.regular_market_price.unwrap_or(0.0);
    let previous_close = meta.previous_close.or(meta.chart_previous_close).unwrap_or(0.0);

    let sample = Sample {
        symbol: symbol.to_string(),
        price,
        previous_close,
        high: meta.regular_market_day_high.unwrap_or(price),
        low: meta.regular_market_day_low.unwrap_or(price),
        volume: meta.regular_market_volume.unwrap_or(0),
    };

    if !sample.is_usable() {
        return Err(FetchError::InvalidSample {
            symbol: symbol.to_string(),
            price,
            previous_close,
        });
    }
    Ok(sample)
}

/// Parses daily history from a chart response body into a newest-first series.
/// Rows without a positive close are skipped.
pub fn parse_history(symbol: &str, body: &str) -> Result<HistorySeries, FetchError> {
    let columns = first_result(symbol, body)?
        .indicators
        .and_then(|i| i.quote.into_iter().next())
        .ok_or_else(|| FetchError::NoData(format!("{symbol} history")))?;

    let mut samples = Vec::with_capacity(columns.close.len());
    let mut previous: Option<f64> = None;

    for (i, close) in columns.close.iter().enumerate() {
        let Some(close) = close.filter(|c| *c > 0.0) else {
            continue;
        };
        let at = |col: &Vec<Option<f64>>| col.get(i).copied().flatten().unwrap_or(close);
        samples.push(Sample {
            symbol: symbol.to_string(),
            price: close,
            previous_close: previous.unwrap_or(close),
            high: at(&columns.high),
            low: at(&columns.low),
            volume: columns.volume.get(i).copied().flatten().unwrap_or(0),
        });
        previous = Some(close);
    }

    Ok(HistorySeries::from_oldest_first(samples))
}

pub struct YahooChartClient {
    client: Client,
    retry: RetryPolicy,
    history_days: i64,
}

impl YahooChartClient {
    pub fn new(retry: RetryPolicy, history_days: i64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0")
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            retry,
            history_days,
        })
    }

    async fn get_chart(&self, symbol: &str, query: &[(&str, String)]) -> Result<String, FetchError> {
        let url = format!("{}/{}", CHART_URL, symbol);
        let client = &self.client;
        let url = url.as_str();
        retry(&self.retry, symbol, || async move {
            let response = client.get(url).query(query).send().await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(body)
        })
        .await
    }

    pub async fn fetch_quote(&self, symbol: &str) -> Result<Sample, FetchError> {
        let body = self.get_chart(symbol, &[]).await?;
        parse_quote(symbol, &body)
    }

    pub async fn fetch_history(&self, symbol: &str) -> Result<HistorySeries, FetchError> {
        let end = Utc::now();
        let start = end - Duration::days(self.history_days);
        let query = [
            ("period1", start.timestamp().to_string()),
            ("period2", end.timestamp().to_string()),
            ("interval", "1d".to_string()),
        ];
        let body = self.get_chart(symbol, &query).await?;
        let history = parse_history(symbol, &body)?;
        debug!("{}: {} daily samples", symbol, history.len());
        Ok(history)
    }
}

#[async_trait::async_trait]
impl PriceHistoryProvider for YahooChartClient {
    async fn fetch(&self, symbol: &str) -> Result<PriceHistory, FetchError> {
        info!("Fetching quote and history for {}", symbol);
        let current = self.fetch_quote(symbol).await?;
        let history = self.fetch_history(symbol).await?;
        Ok(PriceHistory { current, history })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUOTE_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "symbol": "TCS.NS",
                    "regularMarketPrice": 3950.5,
                    "chartPreviousClose": 3900.0,
                    "regularMarketDayHigh": 3975.0,
                    "regularMarketDayLow": 3890.25,
                    "regularMarketVolume": 1234567
                }
            }],
            "error": null
        }
    }"#;

    const HISTORY_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "regularMarketPrice": 103.0 },
                "timestamp": [1, 2, 3, 4],
                "indicators": {
                    "quote": [{
                        "close":  [100.0, null, 102.0, 103.0],
                        "high":   [101.0, null, null, 104.0],
                        "low":    [99.0, null, 101.0, 102.0],
                        "volume": [1000, null, 3000, null]
                    }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn quote_falls_back_to_chart_previous_close() {
        let sample = parse_quote("TCS.NS", QUOTE_BODY).unwrap();
        assert_eq!(sample.price, 3950.5);
        assert_eq!(sample.previous_close, 3900.0);
        assert_eq!(sample.high, 3975.0);
        assert_eq!(sample.low, 3890.25);
        assert_eq!(sample.volume, 1_234_567);
    }

    #[test]
    fn quote_without_price_is_invalid() {
        let body = r#"{"chart":{"result":[{"meta":{"previousClose":10.0}}],"error":null}}"#;
        assert!(matches!(
            parse_quote("BAD.NS", body),
            Err(FetchError::InvalidSample { .. })
        ));
    }

    #[test]
    fn api_error_is_reported() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_quote("GONE.NS", body).unwrap_err();
        assert!(err.to_string().contains("delisted"));
    }

    #[test]
    fn empty_result_is_no_data() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(matches!(parse_quote("X", body), Err(FetchError::NoData(_))));
    }

    #[test]
    fn history_is_newest_first_and_skips_null_closes() {
        let history = parse_history("T", HISTORY_BODY).unwrap();
        assert_eq!(history.prices(), vec![103.0, 102.0, 100.0]);

        let newest = &history.samples()[0];
        assert_eq!(newest.previous_close, 102.0);
        assert_eq!(newest.volume, 0);

        let middle = &history.samples()[1];
        // missing high falls back to close
        assert_eq!(middle.high, 102.0);
        assert_eq!(middle.previous_close, 100.0);

        let oldest = &history.samples()[2];
        assert_eq!(oldest.previous_close, 100.0);
        assert_eq!(oldest.volume, 1000);
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert!(matches!(parse_history("T", "<html>"), Err(FetchError::Parse(_))));
    }
}
