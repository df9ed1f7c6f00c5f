// Nifty Indices historical-return endpoint
use crate::fetcher::retry::{retry, RetryPolicy};
use crate::fetcher::traits::IndexReturnProvider;
use crate::model::FetchError;
use crate::utils::DateWindow;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN};
use serde::{Deserialize, Serialize};
use tracing::info;

const RETURNS_URL: &str = "https://www.niftyindices.com/Backpage.aspx/getHistoricaldataDBtoString";
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:131.0) Gecko/20100101 Firefox/131.0";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexRequest<'a> {
    name: &'a str,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
struct IndexResponse {
    d: String,
}

/// Extracts the return from a response body shaped like `{"d": "-1.23[...]"}`.
pub fn parse_index_return(index: &str, body: &str) -> Result<f64, FetchError> {
    let response: IndexResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(format!("{index}: {e}")))?;
    let value = response.d.split('[').next().unwrap_or_default().trim();
    if value.is_empty() {
        return Err(FetchError::NoData(index.to_string()));
    }
    value
        .parse::<f64>()
        .map_err(|e| FetchError::Parse(format!("{index}: {value:?}: {e}")))
}

pub struct NiftyIndexClient {
    client: Client,
    retry: RetryPolicy,
}

impl NiftyIndexClient {
    pub fn new(retry: RetryPolicy) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.niftyindices.com"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self { client, retry })
    }
}

#[async_trait::async_trait]
impl IndexReturnProvider for NiftyIndexClient {
    async fn fetch_return(&self, index: &str, window: &DateWindow) -> Result<f64, FetchError> {
        let request = IndexRequest {
            name: index,
            start_date: window.start_label(),
            end_date: window.end_label(),
        };
        info!("Fetching return for {} ({} to {})", index, request.start_date, request.end_date);

        let client = &self.client;
        let request = &request;
        let body = retry(&self.retry, index, || async move {
            let response = client.post(RETURNS_URL).json(request).send().await?;
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
        .await?;

        parse_index_return(index, &body)
    }
}
