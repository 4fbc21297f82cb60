//! Source-reliability detector: attribution and named-source cues.

use regex::Regex;
use std::sync::LazyLock;

use crate::analysis::lexicon::Lexicon;
use crate::analysis::sensational::MIN_DETECTOR_CHARS;

const ATTRIBUTION_WEIGHT: f64 = 1.5;
const NAMED_SOURCE_WEIGHT: f64 = 2.0;
const QUOTE_WEIGHT: f64 = 1.0;

/// Straight or curly double quotes around at least ten characters.
static QUOTED_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["“][^"“”]{10,}["”]"#).unwrap());

pub fn reliability_score(text: &str, lexicon: &Lexicon) -> f64 {
    lexicon.attribution.count(text) as f64 * ATTRIBUTION_WEIGHT
        + lexicon.reliable_sources.count(text) as f64 * NAMED_SOURCE_WEIGHT
        + QUOTED_SPAN.find_iter(text).count() as f64 * QUOTE_WEIGHT
}

pub fn reliability_threshold(word_count: usize) -> f64 {
    if word_count < 300 { 2.0 } else { 3.0 }
}

pub fn has_reliable_sources(text: &str, lexicon: &Lexicon) -> bool {
    if text.chars().count() < MIN_DETECTOR_CHARS {
        return false;
    }
    let word_count = text.split_whitespace().count();
    reliability_score(text, lexicon) >= reliability_threshold(word_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler(words: usize) -> String {
        "residents gathered near the river bank for the annual festival "
            .split_whitespace()
            .cycle()
            .take(words)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_short_text_is_never_reliable() {
        let lexicon = Lexicon::embedded();
        assert!(!has_reliable_sources("According to Reuters.", &lexicon));
    }

    #[test]
    fn test_named_source_outweighs_attribution() {
        let lexicon = Lexicon::embedded();
        assert_eq!(reliability_score("Reuters", &lexicon), 2.0);
        assert_eq!(reliability_score("sources say", &lexicon), 1.5);
    }

    #[test]
    fn test_outlet_names_that_are_common_words() {
        let lexicon = Lexicon::embedded();
        assert_eq!(reliability_score("Troops moved at dawn, sources say", &lexicon), 1.5);
        assert_eq!(reliability_score("Ani and her brother left early", &lexicon), 0.0);
        assert_eq!(reliability_score("as reported in the Dawn newspaper", &lexicon), 2.0);
        assert_eq!(reliability_score("ANI news agency", &lexicon), 2.0);

        let text = format!("Troops moved at dawn, sources say, {}", filler(80));
        assert!(!has_reliable_sources(&text, &lexicon));
    }

    #[test]
    fn test_quoted_spans_count() {
        let lexicon = Lexicon::embedded();
        let text = r#"He said "we are ready for talks" and later “nothing has changed” but "ok"."#;
        assert_eq!(reliability_score(text, &lexicon), 2.0);
    }

    #[test]
    fn test_attributed_report_is_reliable() {
        let lexicon = Lexicon::embedded();
        let text = format!("According to Reuters, {}", filler(80));
        assert!(has_reliable_sources(&text, &lexicon));
    }

    #[test]
    fn test_long_text_needs_more_evidence() {
        let lexicon = Lexicon::embedded();
        // 1.5 + 2 = 3.5 clears the long-text bar; a lone attribution does not
        let cited = format!("According to Reuters, {}", filler(400));
        let vague = format!("Sources say {}", filler(400));
        assert!(has_reliable_sources(&cited, &lexicon));
        assert!(!has_reliable_sources(&vague, &lexicon));
    }

    #[test]
    fn test_unsourced_text() {
        let lexicon = Lexicon::embedded();
        assert!(!has_reliable_sources(&filler(150), &lexicon));
    }
}
