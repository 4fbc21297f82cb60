#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::{path::Path, sync::Arc, time::Duration};
use tower::ServiceExt;

use newscheck::{
    analysis::{Analyzer, HttpClassifier, ScoringEngine, SequenceClassifier},
    app_state::AppState,
    extractor::{Extractor, SiteSelectors},
    fetcher::{Fetcher, RetryPolicy},
    routes,
    verify::Verifier,
};

pub fn test_fetcher() -> Fetcher {
    Fetcher::new(
        Duration::from_secs(5),
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::ZERO,
        },
    )
    .unwrap()
}

pub fn test_app() -> Router {
    test_app_with(SiteSelectors::default(), None)
}

pub fn test_app_with(sites: SiteSelectors, classifier_url: Option<&str>) -> Router {
    let classifier = classifier_url.map(|url| {
        let classifier: Arc<dyn SequenceClassifier> = Arc::new(HttpClassifier::new(url).unwrap());
        classifier
    });
    let verifier = Verifier::new(
        Extractor::new(test_fetcher(), sites),
        Analyzer::new(ScoringEngine::default(), classifier),
    );
    routes::router(AppState::new(verifier), Path::new("frontend"))
}

pub async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

/// Space-separated words cycled from `base` until `count` is reached.
pub fn words(base: &str, count: usize) -> String {
    base.split_whitespace()
        .cycle()
        .take(count)
        .collect::<Vec<_>>()
        .join(" ")
}
