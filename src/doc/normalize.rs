// src/doc/normalize.rs

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{node::Node, ElementRef, Html};

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));

/// Flattens a raw document into plain text: markup stripped, script and
/// style content dropped, whitespace runs collapsed to single spaces.
/// Digit and glyph characters pass through verbatim, so a coordinate
/// table collapses into an adjacent run like "0█00█10█2".
///
/// Non-HTML input only gets the whitespace collapse.
pub fn extract_text(raw: &str) -> String {
    if !looks_like_html(raw) {
        tracing::debug!("Input does not look like HTML, passing through");
        return collapse_whitespace(raw);
    }

    let document = Html::parse_document(raw);
    let mut text = String::new();
    for node in document.root_element().descendants() {
        if let Node::Text(chunk) = node.value() {
            let skipped = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| matches!(el.value().name(), "script" | "style"));
            if !skipped {
                text.push_str(&chunk.text);
            }
        }
    }

    let flat = collapse_whitespace(&text);
    tracing::debug!("Flattened {} raw bytes into {} text bytes", raw.len(), flat.len());
    flat
}

fn looks_like_html(raw: &str) -> bool {
    let head: String = raw.trim_start().chars().take(200).collect();
    head.starts_with("<!DOCTYPE") || head.contains("<html")
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}
