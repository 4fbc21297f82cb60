//! Text helpers over a parsed `scraper` document.

use scraper::{ElementRef, Node, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::extractor::cleaner::collapse_whitespace;

/// Subtrees that never contain article prose.
const SKIPPED_TAGS: [&str; 11] = [
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "iframe",
    "svg", "button",
];

/// Elements that start a new line when flattened to text.
const BLOCK_TAGS: [&str; 20] = [
    "p", "div", "section", "article", "main", "blockquote", "li", "ul", "ol", "h1", "h2", "h3",
    "h4", "h5", "h6", "tr", "table", "figure", "pre", "dd",
];

pub static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

pub fn is_skipped(tag: &str) -> bool {
    SKIPPED_TAGS.contains(&tag)
}

/// True when the element sits inside a skipped subtree (or is one).
pub fn in_skipped_subtree(element: ElementRef<'_>) -> bool {
    is_skipped(element.value().name())
        || element
            .ancestors()
            .filter_map(|node| node.value().as_element())
            .any(|el| is_skipped(el.name()))
}

/// Visible text of `element`, one line per block-level descendant.
/// Whitespace inside text nodes is flattened so source formatting does not
/// split sentences.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            }
            Node::Element(el) => {
                if is_skipped(el.name()) {
                    continue;
                }
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let block = BLOCK_TAGS.contains(&el.name());
                if block {
                    out.push('\n');
                }
                collect_text(child_ref, out);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Text of the element's own text nodes, ignoring child elements.
pub fn own_text(element: ElementRef<'_>) -> String {
    let raw: String = element
        .children()
        .filter_map(|child| child.value().as_text().map(|t| (**t).to_owned()))
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&raw)
}

/// Each visible `<p>` under `root`, flattened to a single line.
pub fn paragraphs(root: ElementRef<'_>) -> Vec<String> {
    root.select(&PARAGRAPH)
        .filter(|p| !in_skipped_subtree(*p))
        .map(|p| collapse_whitespace(&visible_text(p)))
        .filter(|text| !text.is_empty())
        .collect()
}

/// Paragraphs of a container, or its whole visible text if it has none.
pub fn container_blocks(container: ElementRef<'_>) -> Vec<String> {
    let paras = paragraphs(container);
    if paras.is_empty() {
        vec![visible_text(container)]
    } else {
        paras
    }
}

/// Lowercased `class` and `id` attributes, space separated.
pub fn class_and_id(element: ElementRef<'_>) -> String {
    let el = element.value();
    format!(
        "{} {}",
        el.attr("class").unwrap_or_default(),
        el.attr("id").unwrap_or_default()
    )
    .to_lowercase()
}

pub fn class_attr(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("class")
        .unwrap_or_default()
        .to_lowercase()
}

/// Drop elements nested inside another element of the same list, so that
/// a wrapper and its children are not both counted.
pub fn outermost<'a>(elements: Vec<ElementRef<'a>>) -> Vec<ElementRef<'a>> {
    let ids: HashSet<_> = elements.iter().map(|el| el.id()).collect();
    elements
        .into_iter()
        .filter(|el| !el.ancestors().any(|a| ids.contains(&a.id())))
        .collect()
}
