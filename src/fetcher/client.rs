use crate::config::Config;
use crate::fetcher::{
    backoff::calculate_backoff_delay,
    errors::FetchError,
    pipeline::process_response,
    types::{PageResponse, RetryPolicy},
};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// News sites routinely block obvious bots, so requests look like a browser
/// navigating to the page.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-user"),
        HeaderValue::from_static("?1"),
    );
    headers
}

/// HTTP GET with browser-like headers, a hard timeout and bounded retries.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(timeout: Duration, retry: RetryPolicy) -> Result<Self, FetchError> {
        let client = ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers(browser_headers())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, retry })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            config.fetch_timeout(),
            RetryPolicy {
                max_attempts: config.fetch_max_attempts(),
                base_delay: config.fetch_backoff(),
            },
        )
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetch `url`, retrying transient failures.
    ///
    /// Returns [`FetchError::RetriesExhausted`] once every attempt failed with
    /// a retriable error; fatal errors are returned as soon as they occur.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(&self, url: &Url) -> Result<PageResponse, FetchError> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let err = match self.fetch_once(url).await {
                Ok(page) => {
                    debug!(attempt, status = %page.status, bytes = page.body_raw.len(), "fetched page");
                    return Ok(page);
                }
                Err(err) => err,
            };

            if !err.should_retry() {
                warn!(attempt, error = %err, "fetch failed permanently");
                return Err(err);
            }
            if attempt >= max_attempts {
                warn!(attempt, error = %err, "fetch retries exhausted");
                return Err(FetchError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(err),
                });
            }

            let delay = calculate_backoff_delay(attempt - 1, self.retry.base_delay);
            warn!(attempt, error = %err, delay_ms = delay.as_millis() as u64, "fetch failed, retrying");
            tokio::time::sleep(delay).await;
        }
    }

    async fn fetch_once(&self, url: &Url) -> Result<PageResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::from_status(status));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("text/html")
            .to_string();

        if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
            return Err(FetchError::UnsupportedContentType(content_type));
        }

        let body_bytes = response
            .bytes()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Check body size after download (in case Content-Length was missing)
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
        }

        Ok(process_response(final_url, status, body_bytes, &content_type))
    }
}
