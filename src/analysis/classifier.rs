//! Client for an optional external natural-language-inference model.
//!
//! The model is served out of process; this crate only speaks its small
//! JSON protocol: `POST {"text": ...}` answered by
//! `{"label": "contradiction" | "neutral" | "entailment", "score": 0.0..1.0}`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;
use url::Url;

/// Models of this family accept at most 512 tokens; words are a cheap proxy.
pub const MAX_INPUT_WORDS: usize = 512;

const CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NliLabel {
    Contradiction,
    Neutral,
    Entailment,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Prediction {
    pub label: NliLabel,
    /// Probability of `label`.
    pub score: f64,
}

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("invalid classifier url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("classifier request failed: {0}")]
    Transport(String),
    #[error("classifier returned status {0}")]
    Status(StatusCode),
    #[error("classifier returned an invalid response: {0}")]
    InvalidResponse(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SequenceClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Prediction, ClassifierError>;
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

/// HTTP-backed classifier. Built once at startup and shared by handle.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: Client,
    endpoint: Url,
}

impl HttpClassifier {
    pub fn new(endpoint: &str) -> Result<Self, ClassifierError> {
        let endpoint = Url::parse(endpoint)?;
        let client = Client::builder()
            .timeout(CLASSIFIER_TIMEOUT)
            .build()
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SequenceClassifier for HttpClassifier {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn classify(&self, text: &str) -> Result<Prediction, ClassifierError> {
        let text = truncate_words(text, MAX_INPUT_WORDS);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&ClassifyRequest { text: &text })
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClassifierError::Status(response.status()));
        }

        let prediction: Prediction = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        if !(0.0..=1.0).contains(&prediction.score) {
            return Err(ClassifierError::InvalidResponse(format!(
                "score {} outside [0, 1]",
                prediction.score
            )));
        }
        Ok(prediction)
    }
}

pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
