pub mod cleaner;
pub mod dom;
pub mod language;
pub mod model;
pub mod reject;
pub mod sites;
pub mod strategies;
pub mod structured;

#[cfg(test)]
mod tests;

pub use model::{ExtractError, ExtractionResult, Strategy};
pub use sites::SiteSelectors;

use scraper::Html;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use url::{ParseError, Url};

use crate::extractor::cleaner::char_len;
use crate::fetcher::Fetcher;
use crate::fetcher::types::PageResponse;

/// Parse user input as a page URL, assuming `https` when no scheme is given.
pub fn normalize_url(raw: &str) -> Result<Url, ExtractError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::InvalidUrl("empty url".to_string()));
    }

    let url = match Url::parse(trimmed) {
        Ok(url) if !is_host_and_port(trimmed) => url,
        Ok(_) | Err(ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{trimmed}"))
            .map_err(|e| ExtractError::InvalidUrl(e.to_string()))?,
        Err(e) => return Err(ExtractError::InvalidUrl(e.to_string())),
    };
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ExtractError::InvalidUrl(format!(
            "unsupported scheme {:?}",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ExtractError::InvalidUrl("missing host".to_string()));
    }
    Ok(url)
}

/// `example.com:8080/path` parses with `example.com` as its scheme.
fn is_host_and_port(raw: &str) -> bool {
    raw.split_once(':')
        .is_some_and(|(_, rest)| rest.starts_with(|c: char| c.is_ascii_digit()))
}

/// Host without a leading `www.`, lowercased.
pub fn bare_domain(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

/// Run the strategy chain over a fetched page. Site selectors are chosen by
/// the domain the fetch ended on, after redirects.
pub fn extract_page(
    page: &PageResponse,
    sites: &SiteSelectors,
) -> Result<ExtractionResult, ExtractError> {
    let domain = bare_domain(&page.url_final);
    let document = Html::parse_document(&page.body_utf8);

    let extracted = strategies::run_chain(&document, sites.selectors_for(&domain)).map_err(
        |best_chars| {
            warn!(url = %page.url_final, best_chars, "no strategy produced usable text");
            ExtractError::NoUsableText { best_chars }
        },
    )?;

    let length = char_len(&extracted.text);
    let language = language::detect_language(&extracted.text);
    info!(
        url = %page.url_final,
        strategy = %extracted.strategy,
        chars = length,
        language = language.unwrap_or("unknown"),
        fetched_at = %page.fetched_at,
        "extracted article text"
    );

    Ok(ExtractionResult {
        text: extracted.text,
        strategy: extracted.strategy,
        length,
        language,
        final_url: page.url_final.clone(),
        fetched_at: page.fetched_at,
    })
}

/// Fetches pages and pulls article text out of them.
#[derive(Debug, Clone)]
pub struct Extractor {
    fetcher: Fetcher,
    sites: Arc<SiteSelectors>,
}

impl Extractor {
    pub fn new(fetcher: Fetcher, sites: SiteSelectors) -> Self {
        Self {
            fetcher,
            sites: Arc::new(sites),
        }
    }

    pub fn sites(&self) -> &SiteSelectors {
        &self.sites
    }

    /// Normalize, fetch and extract. Parsing runs on the blocking pool.
    #[instrument(skip(self), fields(url = %raw_url))]
    pub async fn extract_url(&self, raw_url: &str) -> Result<ExtractionResult, ExtractError> {
        let url = normalize_url(raw_url)?;
        let page = self.fetcher.fetch(&url).await?;

        let sites = Arc::clone(&self.sites);
        tokio::task::spawn_blocking(move || extract_page(&page, &sites))
            .await
            .map_err(|e| ExtractError::Parse(e.to_string()))?
    }
}
