// src/utils/text_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::utils::error::AppError;

/// Saves flattened document text as an HTML page with highlighted spans.
pub fn save_annotated_text(
    text: &str,
    filename: &str,
    highlights: &[(usize, usize, &str)],
) -> Result<(), AppError> {
    let path = Path::new(filename);
    let mut file = File::create(path)?;

    let mut page = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");

    page.push_str("body { font-family: monospace; white-space: pre-wrap; }\n");
    page.push_str(".highlight-marker { background-color: #FFFF00; }\n");
    page.push_str(".highlight-triple { background-color: #90EE90; }\n");
    page.push_str(".highlight-glyph { background-color: #ADD8E6; }\n");
    page.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    page.push_str("</style>\n</head>\n<body>\n");

    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    let mut last_pos = 0;
    for (start, end, kind) in sorted_highlights {
        // Overlapping matches from different patterns: keep the earlier span.
        if start < last_pos {
            continue;
        }
        if start > last_pos {
            page.push_str(&html_escape::encode_text(&text[last_pos..start]));
        }

        let css_class = match kind {
            "marker" => "highlight-marker",
            "triple" => "highlight-triple",
            "glyph" => "highlight-glyph",
            _ => "highlight-custom",
        };

        page.push_str(&format!(
            "<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, kind
        ));
        page.push_str(&html_escape::encode_text(&text[start..end]));
        page.push_str("</span>");

        last_pos = end;
    }

    if last_pos < text.len() {
        page.push_str(&html_escape::encode_text(&text[last_pos..]));
    }

    page.push_str("\n</body>\n</html>");
    file.write_all(page.as_bytes())?;

    tracing::info!("Saved annotated text to {}", path.display());
    Ok(())
}

/// Creates a debug view of flattened text with matches of the given regex
/// patterns highlighted, one CSS class per pattern kind.
pub fn create_debug_view(
    text: &str,
    filename: &str,
    patterns: &[(&str, &str)],
) -> Result<(), AppError> {
    use regex::Regex;

    let mut highlights = Vec::new();

    for (pattern, kind) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(text) {
            highlights.push((mat.start(), mat.end(), *kind));
        }
    }

    save_annotated_text(text, filename, &highlights)
}
