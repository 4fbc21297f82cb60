use std::fs;
use std::time::Duration;
use url::Url;

use crate::extractor::{
    ExtractError, Extractor, SiteSelectors, Strategy, bare_domain, extract_page, normalize_url,
    strategies,
};
use crate::fetcher::Fetcher;
use crate::fetcher::types::{PageResponse, RetryPolicy};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn page(name: &str, url: &str) -> PageResponse {
    PageResponse::from_html(Url::parse(url).unwrap(), fixture(name))
}

fn sites() -> SiteSelectors {
    SiteSelectors::load(None).expect("embedded site selectors parse")
}

#[test]
fn test_site_selectors_take_priority_over_article_tag() {
    let response = page("site_article.html", "https://www.thehindu.com/news/budget");
    let result = extract_page(&response, &sites()).unwrap();

    assert_eq!(result.strategy, Strategy::SiteSpecific);
    assert!(result.text.contains("passed the annual budget"));
    assert!(!result.text.contains("Teaser"));
    assert!(!result.text.contains("Copyright"));
    assert_eq!(result.length, result.text.chars().count());
    assert_eq!(result.final_url.as_str(), "https://www.thehindu.com/news/budget");
    assert_eq!(result.fetched_at, response.fetched_at);
}

#[test]
fn test_same_page_on_unknown_domain_uses_article_tag() {
    let response = page("site_article.html", "https://example.com/news/budget");
    let result = extract_page(&response, &sites()).unwrap();

    assert_eq!(result.strategy, Strategy::StructuralTags);
    assert!(result.text.contains("Teaser"));
}

#[test]
fn test_main_paragraphs() {
    let response = page("structural.html", "https://example.com/harbour");
    let result = extract_page(&response, &sites()).unwrap();

    assert_eq!(result.strategy, Strategy::StructuralTags);
    assert_eq!(result.text.lines().count(), 3);
    assert!(!result.text.contains("Most read"));
    assert!(!result.text.contains("World news"));
    assert_eq!(result.language, Some("eng"));
}

#[test]
fn test_class_named_container() {
    let response = page("class_heuristic.html", "https://example.com/library");
    let result = extract_page(&response, &sites()).unwrap();

    assert_eq!(result.strategy, Strategy::ClassHeuristic);
    assert!(result.text.starts_with("The public library"));
    assert!(!result.text.contains("Related:"));
}

#[test]
fn test_liveblog_updates() {
    let response = page("liveblog.html", "https://example.com/live/election");
    let result = extract_page(&response, &sites()).unwrap();

    assert_eq!(result.strategy, Strategy::Liveblog);
    assert_eq!(result.text.lines().count(), 4);
    assert!(result.text.contains("Counting has begun"));
}

#[test]
fn test_small_liveblog_falls_through() {
    let html = "<html><body><div class='liveblog'>\
        <div class='update'><span>Counting has begun in all twelve districts, with the first results expected before midnight.</span></div>\
        <div class='update'><span>Turnout in the northern districts was higher than at the last election, officials said.</span></div>\
        </div></body></html>";
    let response = PageResponse::from_html(Url::parse("https://example.com/live").unwrap(), html);

    let liveblog_text = strategies::run_strategy(
        Strategy::Liveblog,
        &scraper::Html::parse_document(html),
        &[],
    );
    assert_eq!(liveblog_text.len(), 2);

    let result = extract_page(&response, &sites()).unwrap();
    assert_eq!(result.strategy, Strategy::ScoredFallback);
    assert!(result.length < strategies::MIN_LIVEBLOG_CHARS);
}

#[test]
fn test_json_ld_article_body() {
    let response = page("jsonld.html", "https://example.com/rail");
    let result = extract_page(&response, &sites()).unwrap();

    assert_eq!(result.strategy, Strategy::StructuredData);
    assert!(result.text.starts_with("A planned national rail strike"));
    assert!(!result.text.contains("enable JavaScript"));
}

#[test]
fn test_too_short_page() {
    let response = page("short.html", "https://example.com/moved");
    let err = extract_page(&response, &sites()).unwrap_err();

    match err {
        ExtractError::NoUsableText { best_chars } => {
            assert!(best_chars > 0);
            assert!(best_chars < strategies::MIN_ARTICLE_CHARS);
        }
        other => panic!("expected NoUsableText, got {other:?}"),
    }
}

#[test]
fn test_cookie_wall_is_rejected() {
    let response = page("cookie_wall.html", "https://example.com/story");
    let err = extract_page(&response, &sites()).unwrap_err();

    assert!(matches!(
        err,
        ExtractError::NoUsableText { best_chars } if best_chars >= strategies::MIN_ARTICLE_CHARS
    ));
}

#[test]
fn test_normalize_url() {
    assert_eq!(
        normalize_url("  example.com/a?b=1 ").unwrap().as_str(),
        "https://example.com/a?b=1"
    );
    assert_eq!(
        normalize_url("http://example.com").unwrap().scheme(),
        "http"
    );
    assert!(matches!(normalize_url(""), Err(ExtractError::InvalidUrl(_))));
    assert!(matches!(
        normalize_url("ftp://example.com/file"),
        Err(ExtractError::InvalidUrl(_))
    ));
    assert!(matches!(
        normalize_url("https://"),
        Err(ExtractError::InvalidUrl(_))
    ));
    assert_eq!(
        normalize_url("example.com:8080/live").unwrap().as_str(),
        "https://example.com:8080/live"
    );
}

#[test]
fn test_normalize_url_rejects_other_schemes_without_a_slash() {
    for raw in ["mailto:desk@example.com", "javascript:alert(1)", "data:text/html,hi"] {
        assert!(
            matches!(normalize_url(raw), Err(ExtractError::InvalidUrl(_))),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn test_bare_domain() {
    let url = Url::parse("https://WWW.BBC.co.uk/news").unwrap();
    assert_eq!(bare_domain(&url), "bbc.co.uk");
    let url = Url::parse("https://apnews.com/article/x").unwrap();
    assert_eq!(bare_domain(&url), "apnews.com");
}

#[tokio::test]
async fn test_extract_url_rejects_invalid_scheme_without_fetching() {
    let fetcher = Fetcher::new(Duration::from_secs(1), RetryPolicy::default()).unwrap();
    let extractor = Extractor::new(fetcher, sites());

    let err = extractor.extract_url("ftp://example.com/file").await.unwrap_err();
    assert!(matches!(err, ExtractError::InvalidUrl(_)));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extraction_never_panics(body in ".{0,2000}") {
            let response = PageResponse::from_html(Url::parse("https://example.com").unwrap(), body);
            let _ = extract_page(&response, &SiteSelectors::default());
        }

        #[test]
        fn extraction_never_panics_on_tag_soup(
            parts in proptest::collection::vec(
                prop_oneof![
                    Just("<p>".to_string()),
                    Just("</p>".to_string()),
                    Just("<div class='story-body'>".to_string()),
                    Just("<div class='liveblog'><div class='post'>".to_string()),
                    Just("</div>".to_string()),
                    Just("<script type='application/ld+json'>{\"@type\":\"Article\",\"articleBody\":\"".to_string()),
                    Just("\"}</script>".to_string()),
                    "[a-zA-Z .]{0,80}",
                ],
                0..60,
            )
        ) {
            let html = parts.concat();
            let response = PageResponse::from_html(Url::parse("https://example.com").unwrap(), html);
            let _ = extract_page(&response, &SiteSelectors::default());
        }
    }
}
