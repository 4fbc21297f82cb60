use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use url::Url;

/// A successfully downloaded HTML page, decoded to UTF-8.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub body_raw: Bytes,
    pub body_utf8: String,
    /// WHATWG name of the encoding the body was decoded from.
    pub charset: &'static str,
    pub fetched_at: DateTime<Utc>,
}

impl PageResponse {
    /// Wrap an in-memory UTF-8 document. Used by tests and offline tooling.
    pub fn from_html(url: Url, html: impl Into<String>) -> Self {
        let body_utf8 = html.into();
        Self {
            url_final: url,
            status: StatusCode::OK,
            body_raw: Bytes::from(body_utf8.clone()),
            body_utf8,
            charset: encoding_rs::UTF_8.name(),
            fetched_at: Utc::now(),
        }
    }
}

/// How many times to try a URL and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: std::time::Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: std::time::Duration::from_millis(500),
        }
    }
}
