use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::analysis::ScoreResult;

/// Body of `POST /verify`. At least one field must be non-blank.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct VerifyRequest {
    /// Article text to analyse.
    #[serde(default)]
    pub text: Option<String>,
    /// Page to fetch the article from. Takes precedence over `text` when
    /// extraction succeeds.
    #[serde(default)]
    pub url: Option<String>,
}

impl VerifyRequest {
    pub fn text(&self) -> Option<&str> {
        non_blank(self.text.as_deref())
    }

    pub fn url(&self) -> Option<&str> {
        non_blank(self.url.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    /// One of `fake`, `possibly_fake`, `uncertain`, `possibly_real`, `real`.
    #[schema(example = "possibly_fake")]
    pub result: String,
    #[schema(example = 0.72)]
    pub confidence: f64,
    #[schema(example = "Possibly fake: sensational language")]
    pub message: String,
}

impl From<&ScoreResult> for VerifyResponse {
    fn from(score: &ScoreResult) -> Self {
        Self {
            result: score.label.as_str().to_string(),
            confidence: score.confidence,
            message: score.message(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Label, Method, Reason};

    #[test]
    fn test_blank_fields_count_as_missing() {
        let req: VerifyRequest = serde_json::from_str(r#"{"text": "   ", "url": ""}"#).unwrap();
        assert!(req.text().is_none());
        assert!(req.url().is_none());
    }

    #[test]
    fn test_missing_fields_deserialize() {
        let req: VerifyRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_none() && req.url.is_none());
    }

    #[test]
    fn test_response_from_score() {
        let score = ScoreResult {
            label: Label::PossiblyFake,
            confidence: 0.72,
            reasons: vec![Reason::Sensational],
            method: Method::Heuristic,
        };
        let response = VerifyResponse::from(&score);
        assert_eq!(response.result, "possibly_fake");
        assert_eq!(response.confidence, 0.72);
        assert!(response.message.contains("sensational language"));
    }
}
