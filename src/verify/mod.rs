//! The verification flow: obtain article text (from a URL, the request body,
//! or both) and score it.

pub mod dtos;
pub mod handlers;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::analysis::{Analyzer, ScoreResult};
use crate::extractor::{ExtractError, ExtractionResult, Extractor};
use dtos::{ErrorResponse, VerifyRequest};

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Please provide valid article text or URL")]
    MissingInput,

    #[error("Invalid URL format")]
    InvalidUrl(#[source] ExtractError),

    /// Extraction failed and there is no request text to fall back on.
    #[error("Could not extract text from the provided URL: {0}")]
    Extraction(#[source] ExtractError),
}

impl VerifyError {
    pub fn status(&self) -> StatusCode {
        match self {
            VerifyError::MissingInput | VerifyError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            VerifyError::Extraction(ExtractError::Parse(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            VerifyError::Extraction(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(error = %self, "verification failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Where the analysed text came from.
#[derive(Debug, Clone)]
pub enum TextSource {
    Request,
    Extracted(ExtractionResult),
}

#[derive(Debug, Clone)]
pub struct Verification {
    pub score: ScoreResult,
    pub source: TextSource,
}

#[derive(Clone)]
pub struct Verifier {
    extractor: Extractor,
    analyzer: Analyzer,
}

impl Verifier {
    pub fn new(extractor: Extractor, analyzer: Analyzer) -> Self {
        Self {
            extractor,
            analyzer,
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Extracted page text wins over request text; request text is used
    /// when the URL is unusable or the page yields nothing. Scoring never
    /// runs without text.
    #[instrument(skip_all, fields(has_text = request.text().is_some(), url = request.url()))]
    pub async fn verify(&self, request: &VerifyRequest) -> Result<Verification, VerifyError> {
        let text = request.text();
        let url = request.url();

        let Some(raw_url) = url else {
            let text = text.ok_or(VerifyError::MissingInput)?;
            return Ok(Verification {
                score: self.analyzer.analyze(text).await,
                source: TextSource::Request,
            });
        };

        match self.extractor.extract_url(raw_url).await {
            Ok(extraction) => {
                info!(
                    strategy = %extraction.strategy,
                    chars = extraction.length,
                    "scoring extracted text"
                );
                let score = self.analyzer.analyze(&extraction.text).await;
                Ok(Verification {
                    score,
                    source: TextSource::Extracted(extraction),
                })
            }
            Err(err) => match text {
                Some(text) => {
                    warn!(error = %err, "extraction failed, scoring request text");
                    Ok(Verification {
                        score: self.analyzer.analyze(text).await,
                        source: TextSource::Request,
                    })
                }
                None if matches!(err, ExtractError::InvalidUrl(_)) => {
                    Err(VerifyError::InvalidUrl(err))
                }
                None => {
                    warn!(error = %err, "extraction failed with no text to fall back on");
                    Err(VerifyError::Extraction(err))
                }
            },
        }
    }
}
