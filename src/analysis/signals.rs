//! Feature extraction: everything the scoring engine looks at.

use regex::Regex;
use std::sync::LazyLock;

use crate::analysis::lexicon::Lexicon;
use crate::analysis::reliability::has_reliable_sources;
use crate::analysis::sensational::{PUNCT_BURST, is_sensational};

const VERY_SHORT_WORDS: usize = 100;
const GOOD_LENGTH_WORDS: usize = 300;
const EXCESSIVE_CAPS_RATIO: f64 = 0.05;
const EXCESSIVE_PUNCT_BURSTS: usize = 2;
const FACTUAL_MARKERS_REQUIRED: usize = 2;

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS})\.?(?:,?\s+\d{{4}})?|(?:{MONTHS})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?|\d{{4}}-\d{{2}}-\d{{2}}|\d{{1,2}}/\d{{1,2}}/\d{{2,4}})\b"
    ))
    .unwrap()
});

static PERCENTAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d+(?:\.\d+)?\s?(?:%|percent\b|per cent\b)").unwrap());

static ACCORDING_TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\baccording to\b").unwrap());

static CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:[$€£₹]\s?\d[\d,]*(?:\.\d+)?|\b(?:rs\.?|inr|usd|pkr|eur)\s?\d[\d,]*(?:\.\d+)?|\b\d[\d,]*(?:\.\d+)?\s?(?:dollars|rupees|euros|pounds)\b)",
    )
    .unwrap()
});

static PERSON_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d[\d,]*\s+(?:people|persons|residents|civilians|soldiers|victims|workers|students|children|patients|passengers|voters)\b").unwrap()
});

/// Derived features of one article text.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSet {
    pub sensational: bool,
    pub reliable_sources: bool,
    pub word_count: usize,
    pub has_balanced_view: bool,
    pub has_clickbait: bool,
    pub caps_ratio: f64,
    pub excessive_punct: bool,
    pub has_factual_language: bool,
}

impl SignalSet {
    pub fn compute(text: &str, lexicon: &Lexicon) -> Self {
        let word_count = text.split_whitespace().count();

        Self {
            sensational: is_sensational(text, lexicon),
            reliable_sources: has_reliable_sources(text, lexicon),
            word_count,
            has_balanced_view: lexicon.contrast.is_match(text),
            has_clickbait: lexicon.has_clickbait(text),
            caps_ratio: caps_ratio(text, word_count),
            excessive_punct: PUNCT_BURST.find_iter(text).count() > EXCESSIVE_PUNCT_BURSTS,
            has_factual_language: factual_marker_count(text) >= FACTUAL_MARKERS_REQUIRED,
        }
    }

    pub fn very_short(&self) -> bool {
        self.word_count < VERY_SHORT_WORDS
    }

    pub fn good_length(&self) -> bool {
        self.word_count > GOOD_LENGTH_WORDS
    }

    pub fn has_excessive_caps(&self) -> bool {
        self.caps_ratio > EXCESSIVE_CAPS_RATIO
    }

    /// Signed fake-likelihood: positive leans fake, negative leans real.
    pub fn score(&self) -> f64 {
        [
            (self.sensational, 0.25),
            (self.reliable_sources, -0.35),
            (self.very_short(), 0.15),
            (self.good_length(), -0.10),
            (self.has_balanced_view, -0.20),
            (self.has_excessive_caps(), 0.15),
            (self.excessive_punct, 0.15),
            (self.has_clickbait, 0.20),
            (self.has_factual_language, -0.25),
        ]
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, weight)| weight)
        .sum()
    }
}

/// Share of words that are shouted: longer than three characters with every
/// letter uppercase.
fn caps_ratio(text: &str, word_count: usize) -> f64 {
    let shouted = text
        .split_whitespace()
        .filter(|token| {
            token.chars().count() > 3
                && token.chars().any(char::is_alphabetic)
                && token
                    .chars()
                    .filter(|c| c.is_alphabetic())
                    .all(char::is_uppercase)
        })
        .count();
    shouted as f64 / word_count.max(1) as f64
}

fn factual_marker_count(text: &str) -> usize {
    [&*DATE, &*PERCENTAGE, &*ACCORDING_TO, &*CURRENCY, &*PERSON_COUNT]
        .iter()
        .filter(|re| re.is_match(text))
        .count()
}
