//! HyperFuel HTTP client
//!
//! Endpoints:
//! - `GET  {url}/height` → `{"height": n}`
//! - `POST {url}/query`  → `{"data": [{"receipts": [...]}], "next_block": n, "archive_height": n}`
//!
//! Transport errors, 429 and 5xx responses are retried with exponential
//! backoff; anything else fails the call immediately.

use {
    super::{EventSource, Query, QueryResponse, RawQueryResponse, SourceError},
    async_trait::async_trait,
    serde::Deserialize,
    std::{future::Future, time::Duration},
    tokio::time::sleep,
};

#[derive(Debug, Deserialize)]
struct HeightResponse {
    height: u64,
}

#[derive(Debug, Clone)]
pub struct HyperfuelClient {
    http: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl HyperfuelClient {
    pub fn new(
        base_url: &str,
        api_token: Option<String>,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            max_retries,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        })
    }

    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_body(response: reqwest::Response) -> Result<String, SourceError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn fetch_height(&self) -> Result<u64, SourceError> {
        let url = format!("{}/height", self.base_url);
        let response = self.authorize(self.http.get(&url)).send().await?;
        let body = Self::read_body(response).await?;
        let parsed: HeightResponse = serde_json::from_str(&body)?;
        Ok(parsed.height)
    }

    async fn fetch_page(&self, query: &Query) -> Result<QueryResponse, SourceError> {
        let url = format!("{}/query", self.base_url);
        let response = self
            .authorize(self.http.post(&url))
            .json(query)
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        let raw: RawQueryResponse = serde_json::from_str(&body)?;
        Ok(raw.into())
    }

    /// Delay before retry number `attempt` (zero-based), doubling up to `max_backoff`
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2_u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(factor)
            .map_or(self.max_backoff, |d| d.min(self.max_backoff))
    }

    async fn with_retry<T, F, Fut>(&self, what: &str, mut call: F) -> Result<T, SourceError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, SourceError>> + Send,
        T: Send,
    {
        let mut retries = 0;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && retries < self.max_retries => {
                    let delay = self.backoff_delay(retries);
                    retries += 1;
                    log::warn!(
                        "⚠️  HyperFuel {} failed: {} (retry {} of {} in {:?})",
                        what,
                        e,
                        retries,
                        self.max_retries,
                        delay
                    );
                    sleep(delay).await;
                }
                Err(e) if e.is_retryable() => {
                    return Err(SourceError::MaxRetries {
                        attempts: retries + 1,
                        last: Box::new(e),
                    })
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl EventSource for HyperfuelClient {
    async fn get_height(&self) -> Result<u64, SourceError> {
        self.with_retry("height request", || self.fetch_height()).await
    }

    async fn get_selected_data(&self, query: &Query) -> Result<QueryResponse, SourceError> {
        self.with_retry("query", || self.fetch_page(query)).await
    }
}
