use crate::commentary::CommentaryProvider;
use crate::fetcher::retry::{retry, RetryPolicy};
use crate::model::{CommentaryError, Metrics};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

pub fn build_prompt(symbol: &str, summary: &str) -> String {
    format!(
        "Analyze {symbol} stock and provide a clear trading recommendation:\n\
         {summary}\n\
         Provide a clear, actionable recommendation in 2-3 lines. Include:\n\
         1. Entry price and stop-loss levels\n\
         2. Key resistance/support levels\n\
         3. Risk level (Low/Medium/High)\n\
         Be direct and decisive."
    )
}

/// Returns the first candidate's first text part.
pub fn parse_answer(body: &str) -> Result<String, CommentaryError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| CommentaryError::Parse(e.to_string()))?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(CommentaryError::Empty)
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    retry: RetryPolicy,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, retry: RetryPolicy) -> Result<Self, CommentaryError> {
        if api_key.trim().is_empty() {
            return Err(CommentaryError::MissingApiKey);
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model,
            retry,
        })
    }
}

#[async_trait::async_trait]
impl CommentaryProvider for GeminiClient {
    async fn commentary(&self, metrics: &Metrics, summary: &str) -> Result<String, CommentaryError> {
        let prompt = build_prompt(&metrics.symbol, summary);
        let payload = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };
        let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model);
        info!("Requesting commentary for {}", metrics.symbol);

        let client = &self.client;
        let (url, key, payload) = (url.as_str(), self.api_key.as_str(), &payload);
        let body = retry(&self.retry, &metrics.symbol, || async move {
            let response = client
                .post(url)
                .query(&[("key", key)])
                .json(payload)
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(CommentaryError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(body)
        })
        .await?;

        parse_answer(&body)
    }
}
