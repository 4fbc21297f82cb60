//! Heuristic scoring engine: signals in, label + confidence + reasons out.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::jitter::{JitterSource, NoJitter};
use crate::analysis::lexicon::Lexicon;
use crate::analysis::signals::SignalSet;

/// Trimmed texts shorter than this are labelled fake without analysis.
pub const MIN_ANALYSIS_CHARS: usize = 50;

pub const MIN_CONFIDENCE: f64 = 0.55;
pub const MAX_CONFIDENCE: f64 = 0.95;

const SHORT_TEXT_CONFIDENCE: f64 = 0.9;
const ERROR_CONFIDENCE: f64 = 0.5;
const FAKE_THRESHOLD: f64 = 0.2;
const REAL_THRESHOLD: f64 = -0.2;
const MAX_REASONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Fake,
    PossiblyFake,
    Uncertain,
    PossiblyReal,
    Real,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Fake => "fake",
            Label::PossiblyFake => "possibly_fake",
            Label::Uncertain => "uncertain",
            Label::PossiblyReal => "possibly_real",
            Label::Real => "real",
        }
    }

    fn headline(&self) -> &'static str {
        match self {
            Label::Fake => "Likely fake",
            Label::PossiblyFake => "Possibly fake",
            Label::Uncertain => "Unable to determine authenticity with high confidence",
            Label::PossiblyReal => "Possibly real",
            Label::Real => "Likely real",
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    Sensational,
    Clickbait,
    LackOfSources,
    VeryShort,
    ExcessiveCaps,
    ExcessivePunct,
    Sources,
    FactualLanguage,
    NotSensational,
    BalancedView,
    GoodLength,
    TooShort,
    AnalysisFailed,
    ContradictsKnownFacts,
    ConsistentWithKnownFacts,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Sensational => "sensational language",
            Reason::Clickbait => "clickbait-style phrasing",
            Reason::LackOfSources => "lack of reliable sources",
            Reason::VeryShort => "very short content",
            Reason::ExcessiveCaps => "excessive capitalization",
            Reason::ExcessivePunct => "excessive punctuation",
            Reason::Sources => "cites reliable sources",
            Reason::FactualLanguage => "uses factual language",
            Reason::NotSensational => "measured, non-sensational tone",
            Reason::BalancedView => "presents a balanced view",
            Reason::GoodLength => "substantial article length",
            Reason::TooShort => "too short for reliable analysis",
            Reason::AnalysisFailed => "error during analysis",
            Reason::ContradictsKnownFacts => "content appears to contradict known facts",
            Reason::ConsistentWithKnownFacts => "content appears consistent with known facts",
        }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Reason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which path produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Heuristic,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub label: Label,
    pub confidence: f64,
    pub reasons: Vec<Reason>,
    pub method: Method,
}

impl ScoreResult {
    pub fn too_short() -> Self {
        Self {
            label: Label::Fake,
            confidence: SHORT_TEXT_CONFIDENCE,
            reasons: vec![Reason::TooShort],
            method: Method::Heuristic,
        }
    }

    pub fn analysis_failed() -> Self {
        Self {
            label: Label::Uncertain,
            confidence: ERROR_CONFIDENCE,
            reasons: vec![Reason::AnalysisFailed],
            method: Method::Heuristic,
        }
    }

    /// One sentence for end users, e.g. "Likely fake: sensational language".
    pub fn message(&self) -> String {
        if self.reasons.is_empty() {
            return self.label.headline().to_string();
        }
        let reasons = self
            .reasons
            .iter()
            .map(Reason::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}: {}", self.label.headline(), reasons)
    }
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("signal computation panicked")]
    Panicked,
}

pub fn is_too_short(text: &str) -> bool {
    text.trim().chars().count() < MIN_ANALYSIS_CHARS
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn pick_reasons(candidates: &[(bool, Reason)]) -> Vec<Reason> {
    candidates
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, reason)| *reason)
        .take(MAX_REASONS)
        .collect()
}

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    lexicon: Lexicon,
    jitter: Arc<dyn JitterSource>,
}

impl ScoringEngine {
    pub fn new(lexicon: Lexicon, jitter: Arc<dyn JitterSource>) -> Self {
        Self { lexicon, jitter }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score `text`. Never fails: faults degrade to an uncertain verdict.
    pub fn score(&self, text: &str) -> ScoreResult {
        if is_too_short(text) {
            return ScoreResult::too_short();
        }

        match self.signals(text) {
            Ok(signals) => self.classify(&signals),
            Err(err) => {
                warn!(error = %err, "heuristic analysis failed");
                ScoreResult::analysis_failed()
            }
        }
    }

    pub fn signals(&self, text: &str) -> Result<SignalSet, AnalysisError> {
        catch_unwind(AssertUnwindSafe(|| SignalSet::compute(text, &self.lexicon)))
            .map_err(|_| AnalysisError::Panicked)
    }

    pub fn classify(&self, signals: &SignalSet) -> ScoreResult {
        let score = signals.score();
        debug!(score, ?signals, "computed signals");

        let sensational = signals.sensational;
        let sources = signals.reliable_sources;
        let factual = signals.has_factual_language;
        let balanced = signals.has_balanced_view;
        let clickbait = signals.has_clickbait;
        let caps = signals.has_excessive_caps();

        let (label, confidence, reasons) = if score > FAKE_THRESHOLD {
            let reasons = pick_reasons(&[
                (sensational, Reason::Sensational),
                (clickbait, Reason::Clickbait),
                (!sources, Reason::LackOfSources),
                (signals.very_short(), Reason::VeryShort),
                (caps, Reason::ExcessiveCaps),
                (signals.excessive_punct, Reason::ExcessivePunct),
            ]);
            (Label::Fake, 0.60 + score * 0.35, reasons)
        } else if score < REAL_THRESHOLD {
            let reasons = pick_reasons(&[
                (sources, Reason::Sources),
                (factual, Reason::FactualLanguage),
                (!sensational, Reason::NotSensational),
                (balanced, Reason::BalancedView),
                (signals.good_length(), Reason::GoodLength),
            ]);
            (Label::Real, 0.60 + score.abs() * 0.35, reasons)
        } else if sources && factual {
            let confidence = 0.55 + 0.08 + 0.07 + if balanced { 0.05 } else { 0.0 };
            let reasons = pick_reasons(&[
                (sources, Reason::Sources),
                (factual, Reason::FactualLanguage),
                (balanced, Reason::BalancedView),
            ]);
            (Label::PossiblyReal, confidence, reasons)
        } else if sensational || clickbait {
            let confidence = 0.55
                + if sensational { 0.08 } else { 0.0 }
                + if clickbait { 0.07 } else { 0.0 }
                + if caps { 0.05 } else { 0.0 };
            let reasons = pick_reasons(&[
                (sensational, Reason::Sensational),
                (clickbait, Reason::Clickbait),
                (caps, Reason::ExcessiveCaps),
            ]);
            (Label::PossiblyFake, confidence, reasons)
        } else {
            (Label::Uncertain, MIN_CONFIDENCE, Vec::new())
        };

        ScoreResult {
            label,
            confidence: self.finalize_confidence(confidence),
            reasons,
            method: Method::Heuristic,
        }
    }

    /// Verdict from the detectors alone at reduced confidence. Used when a
    /// classifier was consulted but had no opinion.
    pub fn score_reduced(&self, text: &str) -> ScoreResult {
        if is_too_short(text) {
            return ScoreResult::too_short();
        }
        let signals = match self.signals(text) {
            Ok(signals) => signals,
            Err(err) => {
                warn!(error = %err, "heuristic analysis failed");
                return ScoreResult::analysis_failed();
            }
        };

        let (label, confidence, reasons) = match (signals.sensational, signals.reliable_sources) {
            (true, false) => (
                Label::PossiblyFake,
                0.65,
                vec![Reason::Sensational, Reason::LackOfSources],
            ),
            (false, true) => (
                Label::PossiblyReal,
                0.65,
                vec![Reason::Sources, Reason::NotSensational],
            ),
            _ => (Label::Uncertain, MIN_CONFIDENCE, Vec::new()),
        };

        ScoreResult {
            label,
            confidence: self.finalize_confidence(confidence),
            reasons,
            method: Method::Model,
        }
    }

    /// Clamp, jitter, re-clamp, round to two decimals.
    pub fn finalize_confidence(&self, raw: f64) -> f64 {
        let clamped = raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
        let jittered = (clamped + self.jitter.offset()).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
        round2(jittered)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(Lexicon::embedded(), Arc::new(NoJitter))
    }
}
