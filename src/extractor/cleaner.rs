//! Post-processing shared by every extraction strategy.

/// Lines shorter than this are navigation, captions, bylines and the like.
pub const MIN_LINE_CHARS: usize = 30;

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turn raw text blocks into article text: one collapsed line per source
/// line, short lines dropped.
pub fn clean_blocks<S: AsRef<str>>(blocks: &[S]) -> String {
    blocks
        .iter()
        .flat_map(|block| block.as_ref().lines())
        .map(collapse_whitespace)
        .filter(|line| line.chars().count() >= MIN_LINE_CHARS)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
