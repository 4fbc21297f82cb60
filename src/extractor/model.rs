use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;
use url::Url;

use crate::fetcher::FetchError;

/// Extraction heuristics, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    SiteSpecific,
    StructuralTags,
    ClassHeuristic,
    Liveblog,
    ParagraphSweep,
    SubstantialBlock,
    StructuredData,
    ScoredFallback,
}

impl Strategy {
    pub const CHAIN: [Strategy; 8] = [
        Strategy::SiteSpecific,
        Strategy::StructuralTags,
        Strategy::ClassHeuristic,
        Strategy::Liveblog,
        Strategy::ParagraphSweep,
        Strategy::SubstantialBlock,
        Strategy::StructuredData,
        Strategy::ScoredFallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::SiteSpecific => "site_specific",
            Strategy::StructuralTags => "structural_tags",
            Strategy::ClassHeuristic => "class_heuristic",
            Strategy::Liveblog => "liveblog",
            Strategy::ParagraphSweep => "paragraph_sweep",
            Strategy::SubstantialBlock => "substantial_block",
            Strategy::StructuredData => "structured_data",
            Strategy::ScoredFallback => "scored_fallback",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clean article text pulled from one page.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub text: String,
    pub strategy: Strategy,
    /// Length of `text` in characters.
    pub length: usize,
    /// ISO 639-3 code, when the text is long and distinctive enough to tell.
    pub language: Option<&'static str>,
    pub final_url: Url,
    /// When the page was downloaded.
    pub fetched_at: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    #[error("no extraction strategy produced enough text (best attempt: {best_chars} characters)")]
    NoUsableText { best_chars: usize },

    #[error("extraction aborted: {0}")]
    Parse(String),
}
