//! Detects text that is page furniture rather than an article: consent
//! banners, paywall prompts, error pages.

const MAX_BOILERPLATE_RATIO: f64 = 0.3;

const BOILERPLATE_KEYWORDS: [&str; 24] = [
    "cookie",
    "cookies",
    "privacy",
    "consent",
    "gdpr",
    "accept",
    "decline",
    "preferences",
    "tracking",
    "advertisement",
    "subscribe",
    "subscription",
    "newsletter",
    "login",
    "sign in",
    "sign up",
    "register",
    "password",
    "javascript",
    "enable",
    "browser",
    "404",
    "not found",
    "access denied",
];

pub fn is_boilerplate(text: &str) -> bool {
    let total_words = text.split_whitespace().count();
    if total_words == 0 {
        return true;
    }

    let text_lower = text.to_lowercase();
    let words: Vec<&str> = text_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let single_hits = words
        .iter()
        .filter(|w| BOILERPLATE_KEYWORDS.contains(*w))
        .count();
    let phrase_hits = words
        .windows(2)
        .filter(|pair| {
            let phrase = format!("{} {}", pair[0], pair[1]);
            BOILERPLATE_KEYWORDS.contains(&phrase.as_str())
        })
        .count();
    let hits = single_hits + phrase_hits;

    hits as f64 / total_words as f64 > MAX_BOILERPLATE_RATIO
}
