//! The individual extraction heuristics and the chain that runs them.
//!
//! Every strategy returns raw text blocks; [`run_chain`] cleans them and
//! accepts the first result that is long enough and not boilerplate.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::extractor::cleaner::{char_len, clean_blocks, collapse_whitespace};
use crate::extractor::dom::{
    class_and_id, class_attr, container_blocks, in_skipped_subtree, outermost,
    own_text, paragraphs, visible_text,
};
use crate::extractor::model::Strategy;
use crate::extractor::reject::is_boilerplate;
use crate::extractor::structured;

/// Minimum cleaned length for a strategy's result to be accepted.
pub const MIN_ARTICLE_CHARS: usize = 150;
/// Live pages collect many short updates, so they need more text to count.
pub const MIN_LIVEBLOG_CHARS: usize = 300;

const MIN_SWEEP_PARAGRAPH_CHARS: usize = 40;
const MIN_BLOCK_CHARS: usize = 300;
const MIN_BLOCK_SENTENCES: usize = 3;
const MIN_CANDIDATE_CHARS: usize = 30;
const MAX_FALLBACK_CANDIDATES: usize = 20;

const STRUCTURAL_SELECTORS: [&str; 3] = ["article p", "main p", "[role='main'] p"];

const ARTICLE_VOCABULARY: [&str; 13] = [
    "article",
    "story",
    "content",
    "entry",
    "post-body",
    "post-content",
    "body-text",
    "news-text",
    "main-text",
    "text-body",
    "articlebody",
    "storybody",
    "detail",
];

const NON_ARTICLE_VOCABULARY: [&str; 13] = [
    "comment",
    "related",
    "sidebar",
    "footer",
    "nav",
    "promo",
    "advert",
    "share",
    "social",
    "newsletter",
    "recommend",
    "menu",
    "cookie",
];

const LIVEBLOG_INDICATORS: [&str; 9] = [
    "liveblog",
    "live-blog",
    "live_blog",
    "live-update",
    "liveupdate",
    "live-coverage",
    "live-event",
    "timeline",
    "live-feed",
];

const LIVEBLOG_ENTRY_TOKENS: [&str; 3] = ["post", "update", "entry"];

static CONTAINERS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div, section, article, main").unwrap());
static CLASSED: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[class]").unwrap());
static BLOCKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div, section, td, article").unwrap());
static FALLBACK_CANDIDATES: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("p, li, td, blockquote, div, section, article, span").unwrap()
});
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(?:\s|$)").unwrap());

/// Successful chain output: cleaned text and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub text: String,
    pub strategy: Strategy,
}

/// Run every strategy in order. `Err` carries the length of the best
/// rejected attempt.
pub fn run_chain(document: &Html, site_selectors: &[String]) -> Result<Extracted, usize> {
    let mut best_chars = 0;

    for strategy in Strategy::CHAIN {
        let blocks = run_strategy(strategy, document, site_selectors);
        let text = clean_blocks(&blocks);
        let chars = char_len(&text);

        if chars >= min_chars(strategy) && !is_boilerplate(&text) {
            debug!(%strategy, chars, "strategy accepted");
            return Ok(Extracted { text, strategy });
        }

        debug!(%strategy, chars, "strategy rejected");
        best_chars = best_chars.max(chars);
    }

    Err(best_chars)
}

pub fn min_chars(strategy: Strategy) -> usize {
    match strategy {
        Strategy::Liveblog => MIN_LIVEBLOG_CHARS,
        _ => MIN_ARTICLE_CHARS,
    }
}

pub fn run_strategy(strategy: Strategy, document: &Html, site_selectors: &[String]) -> Vec<String> {
    let root = document.root_element();
    match strategy {
        Strategy::SiteSpecific => site_specific(root, site_selectors),
        Strategy::StructuralTags => structural_tags(root),
        Strategy::ClassHeuristic => class_heuristic(root),
        Strategy::Liveblog => liveblog(root),
        Strategy::ParagraphSweep => paragraph_sweep(root),
        Strategy::SubstantialBlock => substantial_block(root),
        Strategy::StructuredData => structured::article_body(document),
        Strategy::ScoredFallback => scored_fallback(root),
    }
}

/// Configured selectors for the site, in order. The first selector whose
/// matches yield enough text wins.
fn site_specific(root: ElementRef<'_>, selectors: &[String]) -> Vec<String> {
    for raw in selectors {
        let selector = match Selector::parse(raw) {
            Ok(selector) => selector,
            Err(err) => {
                warn!(selector = %raw, error = ?err, "ignoring invalid site selector");
                continue;
            }
        };

        let blocks: Vec<String> = outermost(root.select(&selector).collect())
            .into_iter()
            .filter(|el| !in_skipped_subtree(*el))
            .flat_map(container_blocks)
            .collect();

        if char_len(&clean_blocks(&blocks)) >= MIN_ARTICLE_CHARS {
            return blocks;
        }
    }
    Vec::new()
}

fn structural_tags(root: ElementRef<'_>) -> Vec<String> {
    let mut longest: (usize, Vec<String>) = (0, Vec::new());

    for raw in STRUCTURAL_SELECTORS {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        let blocks: Vec<String> = root
            .select(&selector)
            .filter(|p| !in_skipped_subtree(*p))
            .map(|p| collapse_whitespace(&visible_text(p)))
            .collect();

        let chars = char_len(&clean_blocks(&blocks));
        if chars >= MIN_ARTICLE_CHARS {
            return blocks;
        }
        if chars > longest.0 {
            longest = (chars, blocks);
        }
    }
    longest.1
}

fn is_article_container(element: ElementRef<'_>) -> bool {
    let names = class_and_id(element);
    ARTICLE_VOCABULARY.iter().any(|t| names.contains(t))
        && !NON_ARTICLE_VOCABULARY.iter().any(|t| names.contains(t))
}

/// Containers whose class or id reads like an article body. Longest wins.
fn class_heuristic(root: ElementRef<'_>) -> Vec<String> {
    root.select(&CONTAINERS)
        .filter(|el| is_article_container(*el) && !in_skipped_subtree(*el))
        .map(container_blocks)
        .max_by_key(|blocks| char_len(&clean_blocks(blocks)))
        .unwrap_or_default()
}

/// Live coverage pages: the text of every post/update/entry inside a
/// liveblog container.
fn liveblog(root: ElementRef<'_>) -> Vec<String> {
    let feeds: Vec<ElementRef<'_>> = root
        .select(&CLASSED)
        .filter(|el| {
            let class = class_attr(*el);
            LIVEBLOG_INDICATORS.iter().any(|t| class.contains(t))
        })
        .collect();

    let mut blocks = Vec::new();
    for feed in outermost(feeds) {
        let entries: Vec<ElementRef<'_>> = feed
            .select(&CLASSED)
            .filter(|el| {
                let class = class_attr(*el);
                LIVEBLOG_ENTRY_TOKENS.iter().any(|t| class.contains(t))
            })
            .collect();

        for entry in outermost(entries) {
            if !in_skipped_subtree(entry) {
                blocks.push(visible_text(entry));
            }
        }
    }
    blocks
}

fn paragraph_sweep(root: ElementRef<'_>) -> Vec<String> {
    paragraphs(root)
        .into_iter()
        .filter(|p| char_len(p) >= MIN_SWEEP_PARAGRAPH_CHARS)
        .collect()
}

/// The largest block of running prose on the page.
fn substantial_block(root: ElementRef<'_>) -> Vec<String> {
    root.select(&BLOCKS)
        .filter(|el| !in_skipped_subtree(*el))
        .map(visible_text)
        .filter(|text| {
            char_len(text.trim()) > MIN_BLOCK_CHARS
                && SENTENCE_END.find_iter(text).count() > MIN_BLOCK_SENTENCES
        })
        .max_by_key(|text| char_len(text))
        .map(|text| vec![text])
        .unwrap_or_default()
}

/// Score every text-bearing element by length and by how close it sits to
/// the middle of the document, then keep the best in document order.
fn scored_fallback(root: ElementRef<'_>) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    for element in root.select(&FALLBACK_CANDIDATES) {
        if in_skipped_subtree(element) {
            continue;
        }
        // Wrappers only contribute their own text; their children are
        // candidates in their own right.
        let text = match element.value().name() {
            "p" | "li" | "td" | "blockquote" => collapse_whitespace(&visible_text(element)),
            _ => own_text(element),
        };
        if char_len(&text) > MIN_CANDIDATE_CHARS {
            candidates.push(text);
        }
    }

    rank_candidates(&candidates)
        .into_iter()
        .map(|idx| candidates[idx].clone())
        .collect()
}

/// Indices of the top candidates, returned in their original order.
pub(crate) fn rank_candidates(candidates: &[String]) -> Vec<usize> {
    let n = candidates.len();
    if n == 0 {
        return Vec::new();
    }
    let max_len = candidates.iter().map(|c| char_len(c)).max().unwrap_or(1).max(1) as f64;

    let mut scored: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let position = if n == 1 {
                0.5
            } else {
                idx as f64 / (n - 1) as f64
            };
            let length_score = char_len(text) as f64 / max_len;
            let middle_score = 1.0 - (position - 0.5).abs() * 2.0;
            (idx, 0.7 * length_score + 0.3 * middle_score)
        })
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(MAX_FALLBACK_CANDIDATES);

    let mut kept: Vec<usize> = scored.into_iter().map(|(idx, _)| idx).collect();
    kept.sort_unstable();
    kept
}
