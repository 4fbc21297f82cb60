use whatlang::detect;

/// Below this many characters language guesses are noise.
const MIN_TEXT_LENGTH: usize = 50;
const MIN_CONFIDENCE: f64 = 0.25;

/// ISO 639-3 code of the text's language, if whatlang is confident enough.
pub fn detect_language(text: &str) -> Option<&'static str> {
    if text.trim().chars().count() < MIN_TEXT_LENGTH {
        return None;
    }

    detect(text)
        .filter(|info| info.confidence() >= MIN_CONFIDENCE)
        .map(|info| info.lang().code())
}
