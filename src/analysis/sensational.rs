//! Lexical sensationalism detector.

use regex::Regex;
use std::sync::LazyLock;

use crate::analysis::lexicon::Lexicon;

/// Texts shorter than this are never flagged.
pub const MIN_DETECTOR_CHARS: usize = 100;

const GENERAL_TERM_WEIGHT: f64 = 1.0;
const CONFLICT_TERM_WEIGHT: f64 = 1.5;
const PUNCT_BURST_WEIGHT: f64 = 1.0;
const CAPS_TOKEN_WEIGHT: f64 = 0.5;

pub(crate) static PUNCT_BURST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[!?]{2,}").unwrap());

static CAPS_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z]{4,}\b").unwrap());

/// Weighted count of sensational cues in `text`.
pub fn sensational_score(text: &str, lexicon: &Lexicon) -> f64 {
    lexicon.sensational.count(text) as f64 * GENERAL_TERM_WEIGHT
        + lexicon.conflict.count(text) as f64 * CONFLICT_TERM_WEIGHT
        + PUNCT_BURST.find_iter(text).count() as f64 * PUNCT_BURST_WEIGHT
        + CAPS_TOKEN.find_iter(text).count() as f64 * CAPS_TOKEN_WEIGHT
}

/// Longer texts pick up incidental matches, so the bar rises with length.
pub fn sensational_threshold(word_count: usize) -> f64 {
    match word_count {
        0..200 => 2.0,
        200..500 => 3.0,
        _ => (word_count as f64 / 150.0).max(3.0),
    }
}

pub fn is_sensational(text: &str, lexicon: &Lexicon) -> bool {
    if text.chars().count() < MIN_DETECTOR_CHARS {
        return false;
    }
    let word_count = text.split_whitespace().count();
    sensational_score(text, lexicon) >= sensational_threshold(word_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler(words: usize) -> String {
        "the council met on tuesday to discuss the road budget "
            .split_whitespace()
            .cycle()
            .take(words)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_short_text_is_never_sensational() {
        let lexicon = Lexicon::embedded();
        assert!(!is_sensational("SHOCKING!!! BOMBSHELL!!!", &lexicon));
    }

    #[test]
    fn test_threshold_scales_with_length() {
        assert_eq!(sensational_threshold(50), 2.0);
        assert_eq!(sensational_threshold(199), 2.0);
        assert_eq!(sensational_threshold(200), 3.0);
        assert_eq!(sensational_threshold(499), 3.0);
        assert!((sensational_threshold(500) - 500.0 / 150.0).abs() < 1e-9);
        assert_eq!(sensational_threshold(900), 6.0);
    }

    #[test]
    fn test_weights() {
        let lexicon = Lexicon::embedded();
        // one general term, one conflict term, one burst, two caps tokens
        let text = "A shocking massacre?! WHAT NEXT";
        assert_eq!(sensational_score(text, &lexicon), 1.0 + 1.5 + 1.0 + 1.0);
    }

    #[test]
    fn test_sensational_terms_in_short_article() {
        let lexicon = Lexicon::embedded();
        let text = format!("Shocking news. {} An unbelievable scandal.", filler(60));
        assert!(is_sensational(&text, &lexicon));
    }

    #[test]
    fn test_same_cues_diluted_in_long_article() {
        let lexicon = Lexicon::embedded();
        let text = format!("Shocking news. {} An unbelievable scandal.", filler(900));
        assert!(!is_sensational(&text, &lexicon));
    }

    #[test]
    fn test_neutral_text_is_not_sensational() {
        let lexicon = Lexicon::embedded();
        assert!(!is_sensational(&filler(120), &lexicon));
    }
}
