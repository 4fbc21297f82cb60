//! Word lists and phrase patterns the detectors match against.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use crate::tables::{TableError, load_table, parse_table};

const EMBEDDED_LEXICONS: &str = include_str!("../../data/lexicons.json");

static EMBEDDED: Lazy<Lexicon> = Lazy::new(|| {
    parse_table::<LexiconTables>(EMBEDDED_LEXICONS, "lexicons.json")
        .and_then(Lexicon::compile)
        .expect("embedded lexicon tables are valid")
});

/// Raw lexicon file layout.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconTables {
    pub sensational_terms: Vec<String>,
    pub conflict_terms: Vec<String>,
    pub attribution_phrases: Vec<String>,
    pub reliable_sources: Vec<String>,
    pub contrast_connectives: Vec<String>,
    /// Regular expressions, matched case-insensitively.
    pub clickbait_patterns: Vec<String>,
}

/// Case-insensitive, word-bounded alternation over a term list.
#[derive(Debug, Clone)]
pub struct TermMatcher(Option<Regex>);

impl TermMatcher {
    fn new(category: &'static str, terms: &[String]) -> Result<Self, TableError> {
        let alternation = terms
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        if alternation.is_empty() {
            return Ok(Self(None));
        }

        let pattern = format!(r"(?i)\b(?:{alternation})\b");
        Regex::new(&pattern)
            .map(|re| Self(Some(re)))
            .map_err(|source| TableError::Pattern {
                category,
                pattern,
                source,
            })
    }

    /// Number of (non-overlapping) occurrences in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.0.as_ref().map_or(0, |re| re.find_iter(text).count())
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.as_ref().is_some_and(|re| re.is_match(text))
    }
}

/// Compiled lexicons. Cloning is cheap; the regexes are reference counted.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub sensational: TermMatcher,
    pub conflict: TermMatcher,
    pub attribution: TermMatcher,
    pub reliable_sources: TermMatcher,
    pub contrast: TermMatcher,
    pub clickbait: Vec<Regex>,
}

impl Lexicon {
    pub fn compile(tables: LexiconTables) -> Result<Self, TableError> {
        let clickbait = tables
            .clickbait_patterns
            .iter()
            .map(|p| {
                let pattern = format!("(?i){p}");
                Regex::new(&pattern).map_err(|source| TableError::Pattern {
                    category: "clickbait_patterns",
                    pattern,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            sensational: TermMatcher::new("sensational_terms", &tables.sensational_terms)?,
            conflict: TermMatcher::new("conflict_terms", &tables.conflict_terms)?,
            attribution: TermMatcher::new("attribution_phrases", &tables.attribution_phrases)?,
            reliable_sources: TermMatcher::new("reliable_sources", &tables.reliable_sources)?,
            contrast: TermMatcher::new("contrast_connectives", &tables.contrast_connectives)?,
            clickbait,
        })
    }

    /// The lexicons compiled into the binary.
    pub fn embedded() -> Self {
        EMBEDDED.clone()
    }

    /// Load an override file, or fall back to the embedded lexicons.
    pub fn load(path: Option<&Path>) -> Result<Self, TableError> {
        match path {
            Some(_) => Self::compile(load_table(path, EMBEDDED_LEXICONS, "lexicons.json")?),
            None => Ok(Self::embedded()),
        }
    }

    pub fn has_clickbait(&self, text: &str) -> bool {
        self.clickbait.iter().any(|re| re.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> LexiconTables {
        LexiconTables {
            sensational_terms: vec!["shocking".into(), "mind-blowing".into()],
            conflict_terms: vec![],
            attribution_phrases: vec!["according to".into()],
            reliable_sources: vec!["reuters".into()],
            contrast_connectives: vec!["however".into()],
            clickbait_patterns: vec!["you won'?t believe".into()],
        }
    }

    #[test]
    fn test_counts_every_occurrence_case_insensitively() {
        let lexicon = Lexicon::compile(tables()).unwrap();
        assert_eq!(
            lexicon
                .sensational
                .count("Shocking! A SHOCKING and mind-blowing day."),
            3
        );
    }

    #[test]
    fn test_terms_are_word_bounded() {
        let lexicon = Lexicon::compile(tables()).unwrap();
        assert_eq!(lexicon.reliable_sources.count("reutersville"), 0);
        assert_eq!(lexicon.reliable_sources.count("(Reuters) -"), 1);
    }

    #[test]
    fn test_empty_list_never_matches() {
        let lexicon = Lexicon::compile(tables()).unwrap();
        assert_eq!(lexicon.conflict.count("anything at all"), 0);
        assert!(!lexicon.conflict.is_match(""));
    }

    #[test]
    fn test_invalid_clickbait_pattern_is_reported() {
        let mut bad = tables();
        bad.clickbait_patterns.push("(unclosed".into());
        let err = Lexicon::compile(bad).unwrap_err();
        assert!(matches!(
            err,
            TableError::Pattern {
                category: "clickbait_patterns",
                ..
            }
        ));
    }

    #[test]
    fn test_embedded_lexicon_compiles() {
        let lexicon = Lexicon::embedded();
        assert!(lexicon.has_clickbait("You won't believe what happened next"));
        assert!(lexicon.conflict.is_match("a surgical strike was reported"));
    }
}
