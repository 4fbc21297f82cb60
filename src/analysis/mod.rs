//! Credibility analysis: lexical detectors, the scoring engine, and the
//! optional model-backed path.

pub mod classifier;
pub mod engine;
pub mod jitter;
pub mod lexicon;
pub mod reliability;
pub mod sensational;
pub mod signals;

pub use classifier::{HttpClassifier, NliLabel, Prediction, SequenceClassifier};
pub use engine::{Label, Method, Reason, ScoreResult, ScoringEngine};
pub use lexicon::Lexicon;
pub use signals::SignalSet;

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::analysis::engine::{MAX_CONFIDENCE, MIN_CONFIDENCE, is_too_short};

/// Entry point for scoring: the model when one is configured, the lexical
/// engine otherwise or whenever the model fails.
#[derive(Clone)]
pub struct Analyzer {
    engine: Arc<ScoringEngine>,
    classifier: Option<Arc<dyn SequenceClassifier>>,
}

impl Analyzer {
    pub fn new(engine: ScoringEngine, classifier: Option<Arc<dyn SequenceClassifier>>) -> Self {
        Self {
            engine: Arc::new(engine),
            classifier,
        }
    }

    pub fn heuristic(engine: ScoringEngine) -> Self {
        Self::new(engine, None)
    }

    pub fn has_classifier(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    #[instrument(skip_all, fields(chars = text.len()))]
    pub async fn analyze(&self, text: &str) -> ScoreResult {
        if is_too_short(text) {
            return ScoreResult::too_short();
        }

        if let Some(classifier) = &self.classifier {
            match classifier.classify(text).await {
                Ok(prediction) => {
                    info!(label = ?prediction.label, score = prediction.score, "classifier verdict");
                    return self.verdict_from_prediction(text, prediction);
                }
                Err(err) => warn!(error = %err, "classifier unavailable, using heuristics"),
            }
        }

        self.engine.score(text)
    }

    fn verdict_from_prediction(&self, text: &str, prediction: Prediction) -> ScoreResult {
        let (label, reason) = match prediction.label {
            NliLabel::Contradiction => (Label::Fake, Reason::ContradictsKnownFacts),
            NliLabel::Entailment => (Label::Real, Reason::ConsistentWithKnownFacts),
            NliLabel::Neutral => return self.engine.score_reduced(text),
        };
        let confidence = (prediction.score.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) * 100.0).round() / 100.0;
        ScoreResult {
            label,
            confidence,
            reasons: vec![reason],
            method: Method::Model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classifier::{ClassifierError, MockSequenceClassifier};

    fn article() -> String {
        format!(
            "According to Reuters, {}",
            "the ministry published the annual report on road safety and rail projects "
                .repeat(12)
        )
    }

    fn with_mock(mock: MockSequenceClassifier) -> Analyzer {
        Analyzer::new(ScoringEngine::default(), Some(Arc::new(mock)))
    }

    #[tokio::test]
    async fn test_contradiction_maps_to_fake() {
        let mut mock = MockSequenceClassifier::new();
        mock.expect_classify().times(1).returning(|_| {
            Ok(Prediction {
                label: NliLabel::Contradiction,
                score: 0.97,
            })
        });

        let result = with_mock(mock).analyze(&article()).await;
        assert_eq!(result.label, Label::Fake);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.method, Method::Model);
    }

    #[tokio::test]
    async fn test_entailment_maps_to_real() {
        let mut mock = MockSequenceClassifier::new();
        mock.expect_classify().returning(|_| {
            Ok(Prediction {
                label: NliLabel::Entailment,
                score: 0.81,
            })
        });

        let result = with_mock(mock).analyze(&article()).await;
        assert_eq!(result.label, Label::Real);
        assert_eq!(result.confidence, 0.81);
    }

    #[tokio::test]
    async fn test_neutral_uses_reduced_heuristics() {
        let mut mock = MockSequenceClassifier::new();
        mock.expect_classify().returning(|_| {
            Ok(Prediction {
                label: NliLabel::Neutral,
                score: 0.6,
            })
        });

        let result = with_mock(mock).analyze(&article()).await;
        assert_eq!(result.label, Label::PossiblyReal);
        assert_eq!(result.confidence, 0.65);
    }

    #[tokio::test]
    async fn test_classifier_error_falls_back_to_heuristics() {
        let mut mock = MockSequenceClassifier::new();
        mock.expect_classify()
            .returning(|_| Err(ClassifierError::Transport("connection refused".into())));

        let text = article();
        let result = with_mock(mock).analyze(&text).await;
        assert_eq!(result, ScoringEngine::default().score(&text));
        assert_eq!(result.method, Method::Heuristic);
    }

    #[tokio::test]
    async fn test_short_text_skips_classifier() {
        let mut mock = MockSequenceClassifier::new();
        mock.expect_classify().never();

        let result = with_mock(mock).analyze("too short").await;
        assert_eq!(result, ScoreResult::too_short());
    }
}
