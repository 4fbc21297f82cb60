use crate::fetcher::types::PageResponse;
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

/// Only the head of the document is sniffed for `<meta>` charset hints.
const SNIFF_BYTES: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
) -> PageResponse {
    let encoding = detect_charset(content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, encoding);

    PageResponse {
        url_final,
        status,
        body_raw: body_bytes,
        body_utf8,
        charset: encoding.name(),
        fetched_at: Utc::now(),
    }
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

/// Header charset first, then `<meta>` hints, then statistical guess.
fn detect_charset(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return encoding;
    }

    let head = &body_bytes[..body_bytes.len().min(SNIFF_BYTES)];
    let head_str = String::from_utf8_lossy(head);
    for regex in [&*META_CHARSET_REGEX, &*META_HTTP_EQUIV_REGEX] {
        if let Some(encoding) = label_from(regex, &head_str) {
            return encoding;
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, body_bytes.len() <= SNIFF_BYTES);
    detector.guess(None, true)
}

/// Malformed sequences become U+FFFD; a partly garbled page still scores.
fn decode_to_utf8(body_bytes: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, actual, had_errors) = encoding.decode(body_bytes);
    if had_errors {
        debug!(
            encoding = actual.name(),
            "body contained malformed sequences, replaced"
        );
    }
    decoded.into_owned()
}
