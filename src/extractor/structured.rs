//! `articleBody` from embedded JSON-LD metadata.

use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

use crate::extractor::dom::visible_text;

static JSON_LD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).unwrap());

const ARTICLE_TYPES: [&str; 5] = ["article", "posting", "report", "reportage", "review"];

/// Longest `articleBody` of any article-typed JSON-LD node, split into
/// paragraphs.
pub fn article_body(document: &Html) -> Vec<String> {
    let mut best = String::new();

    for script in document.select(&JSON_LD) {
        let raw = script.text().collect::<String>();
        let value = match serde_json::from_str::<Value>(raw.trim()) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "skipping malformed JSON-LD block");
                continue;
            }
        };

        let mut bodies = Vec::new();
        collect_bodies(&value, &mut bodies);
        if let Some(longest) = bodies.into_iter().max_by_key(|b| b.len())
            && longest.len() > best.len()
        {
            best = longest;
        }
    }

    if best.is_empty() {
        return Vec::new();
    }
    strip_markup(&best).lines().map(str::to_string).collect()
}

fn collect_bodies(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if is_article_type(map.get("@type"))
                && let Some(body) = map.get("articleBody").and_then(Value::as_str)
                && !body.trim().is_empty()
            {
                out.push(body.to_string());
            }
            for child in map.values() {
                collect_bodies(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_bodies(item, out);
            }
        }
        _ => {}
    }
}

fn is_article_type(node_type: Option<&Value>) -> bool {
    let matches = |s: &str| {
        let lower = s.to_lowercase();
        ARTICLE_TYPES.iter().any(|t| lower.contains(t))
    };
    match node_type {
        Some(Value::String(s)) => matches(s),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

/// Some publishers put HTML inside `articleBody`.
fn strip_markup(body: &str) -> String {
    if !body.contains('<') {
        return body.to_string();
    }
    let fragment = Html::parse_fragment(body);
    visible_text(fragment.root_element())
}
