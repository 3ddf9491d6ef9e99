// src/extractors/coords.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

// --- Constants ---
// Section markers, longest first. The coordinate table header ends in
// "y-coordinate", so anchoring on it skips the document preamble.
const SECTION_MARKERS: [&str; 2] = ["y-coordinate", "coordinate"];

/// Pattern for a single-digit triple: digit, separator symbol, digit.
/// The middle class rejects digits, whitespace and letters; anything else
/// (punctuation, box-drawing characters, shapes) qualifies as a glyph.
pub const TRIPLE_PATTERN: &str = r"(\d)([^\d\s\p{L}])(\d)";

/// Glyphs the proximity scan recognizes when the triple pattern finds
/// nothing. These are the block/geometric characters the source documents
/// actually use to draw the message.
pub const GLYPH_ALLOW_LIST: [char; 12] = [
    '█', '▀', '▄', '■', '▌', '▐', '●', '○', '◆', '◇', '★', '☆',
];

// How far the proximity scan looks on each side of a glyph for a digit.
const PROXIMITY_WINDOW: usize = 4;

// --- Regex (Lazy Static) ---
static TRIPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TRIPLE_PATTERN).expect("Failed to compile TRIPLE_PATTERN"));

// --- Data Structures ---

/// One placed character of the hidden message: glyph `glyph` at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoordinateRecord {
    pub x: u32,
    pub glyph: char,
    pub y: u32,
}

/// A parsing strategy: pure function from flattened text to records.
pub type ExtractionStrategy = fn(&str) -> Vec<CoordinateRecord>;

// Chain of responsibility. Order matters: the first strategy that yields
// any record at all supplies the full result, the rest never run.
const STRATEGIES: [(&str, ExtractionStrategy); 3] = [
    ("regex triple scan", scan_single_digit_triples),
    ("known-glyph proximity scan", scan_glyph_neighborhoods),
    ("cursor scan", scan_concatenated_runs),
];

// --- Main Extractor Structure ---
pub struct CoordinateExtractor;

impl CoordinateExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Extracts coordinate records from flattened document text.
    ///
    /// Never fails: on adversarial or empty input this returns an empty
    /// vector, which callers treat as a reportable "no data" outcome.
    pub fn extract(&self, text: &str) -> Vec<CoordinateRecord> {
        for (name, strategy) in STRATEGIES {
            let records = strategy(text);
            if !records.is_empty() {
                tracing::info!("Strategy '{}' matched {} records", name, records.len());
                return records;
            }
            tracing::debug!("Strategy '{}' found nothing, falling back", name);
        }
        tracing::warn!("No strategy found any coordinate records in {} chars of text", text.chars().count());
        Vec::new()
    }
}

impl Default for CoordinateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

// --- Section Location ---

/// Returns the text following the first marker occurrence, or the whole
/// text when no marker is present. Case-sensitive; prefers the longer
/// "y-coordinate" marker so the bare "coordinate" inside it is not matched
/// at a misleading offset.
fn coordinate_section(text: &str) -> &str {
    for marker in SECTION_MARKERS {
        if let Some(pos) = text.find(marker) {
            tracing::debug!("Found section marker '{}' at byte {}", marker, pos);
            return &text[pos + marker.len()..];
        }
    }
    tracing::debug!("No section marker found, scanning full text");
    text
}

// --- Strategy 1 ---

/// Scans the marker section for single-digit `x<glyph>y` triples.
///
/// Deliberately limited to one digit per coordinate: in documents where
/// the coordinate table survived flattening as a run like "0█00█10█2",
/// this is the unambiguous reading.
fn scan_single_digit_triples(text: &str) -> Vec<CoordinateRecord> {
    let section = coordinate_section(text);
    let mut records = Vec::new();

    for caps in TRIPLE_RE.captures_iter(section) {
        let glyph = match caps[2].chars().next() {
            Some(c) => c,
            None => continue,
        };
        // The pattern already excludes letters; re-check anyway so a
        // pattern edit cannot silently admit alphabetic separators.
        if glyph.is_alphabetic() {
            continue;
        }
        let (Some(x), Some(y)) = (parse_single_digit(&caps[1]), parse_single_digit(&caps[3]))
        else {
            continue;
        };
        tracing::trace!("Triple match: ({}, '{}', {})", x, glyph, y);
        records.push(CoordinateRecord { x, glyph, y });
    }

    records
}

fn parse_single_digit(s: &str) -> Option<u32> {
    s.chars().next().and_then(|c| c.to_digit(10))
}

// --- Strategy 2 ---

/// Looks for allow-listed glyphs anywhere in the text and reads the
/// nearest digit runs on either side as x and y. Handles multi-digit
/// coordinates and tolerates a little noise between number and glyph.
fn scan_glyph_neighborhoods(text: &str) -> Vec<CoordinateRecord> {
    let chars: Vec<char> = text.chars().collect();
    let mut records = Vec::new();

    for glyph in GLYPH_ALLOW_LIST {
        for pos in glyph_positions(&chars, glyph) {
            let x = digit_run_before(&chars, pos);
            let y = digit_run_after(&chars, pos);
            if let (Some(x), Some(y)) = (x, y) {
                tracing::trace!("Proximity match: ({}, '{}', {})", x, glyph, y);
                records.push(CoordinateRecord { x, glyph, y });
            }
        }
    }

    records
}

fn glyph_positions(chars: &[char], glyph: char) -> Vec<usize> {
    chars
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == glyph)
        .map(|(i, _)| i)
        .collect()
}

/// Nearest digit run ending within `PROXIMITY_WINDOW` chars before `pos`,
/// extended leftward to its full length.
fn digit_run_before(chars: &[char], pos: usize) -> Option<u32> {
    let lo = pos.saturating_sub(PROXIMITY_WINDOW);
    for i in (lo..pos).rev() {
        if chars[i].is_ascii_digit() {
            let mut start = i;
            while start > 0 && chars[start - 1].is_ascii_digit() {
                start -= 1;
            }
            return parse_digit_run(&chars[start..=i]);
        }
    }
    None
}

/// Nearest digit run starting within `PROXIMITY_WINDOW` chars after `pos`,
/// extended rightward to its full length.
fn digit_run_after(chars: &[char], pos: usize) -> Option<u32> {
    let hi = (pos + PROXIMITY_WINDOW + 1).min(chars.len());
    for i in pos + 1..hi {
        if chars[i].is_ascii_digit() {
            let mut end = i;
            while end + 1 < chars.len() && chars[end + 1].is_ascii_digit() {
                end += 1;
            }
            return parse_digit_run(&chars[i..=end]);
        }
    }
    None
}

// Absurdly long digit runs are noise, not coordinates: drop the candidate
// instead of overflowing.
fn parse_digit_run(digits: &[char]) -> Option<u32> {
    digits
        .iter()
        .try_fold(0u32, |acc, c| {
            acc.checked_mul(10)?.checked_add(c.to_digit(10)?)
        })
}

// --- Strategy 3 ---

/// Explicit-cursor walk over the marker section for `x<glyph>y` runs with
/// multi-digit coordinates, e.g. "10█2311▀24". On any malformed triple the
/// cursor advances one position and scanning resumes.
fn scan_concatenated_runs(text: &str) -> Vec<CoordinateRecord> {
    let chars: Vec<char> = coordinate_section(text).chars().collect();
    let mut records = Vec::new();
    let mut i = 0;

    // A complete triple needs at least three characters past the cursor.
    while i + 2 < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        // Consume the maximal digit run as x.
        let x_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let x = parse_digit_run(&chars[x_start..i]);

        // The very next character must be a glyph.
        if i < chars.len() && !chars[i].is_ascii_digit() && !chars[i].is_alphabetic() {
            let glyph = chars[i];
            i += 1;

            // And the character after that must begin the y run.
            if i < chars.len() && chars[i].is_ascii_digit() {
                let y_start = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                let y = parse_digit_run(&chars[y_start..i]);
                if let (Some(x), Some(y)) = (x, y) {
                    tracing::trace!("Cursor match: ({}, '{}', {})", x, glyph, y);
                    records.push(CoordinateRecord { x, glyph, y });
                }
            } else {
                i += 1;
            }
        } else {
            i += 1;
        }
    }

    records
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn rec(x: u32, glyph: char, y: u32) -> CoordinateRecord {
        CoordinateRecord { x, glyph, y }
    }

    #[test]
    fn triple_scan_finds_marker_prefixed_triple() {
        let extractor = CoordinateExtractor::new();
        let records = extractor.extract("blah blah coordinate header 3#4 trailer");
        assert_eq!(records, vec![rec(3, '#', 4)]);
    }

    #[test]
    fn triple_scan_prefers_long_marker() {
        // Text before "y-coordinate" must not be scanned.
        let records = scan_single_digit_triples("1*2 then x-coordinate y-coordinate 3#4");
        assert_eq!(records, vec![rec(3, '#', 4)]);
    }

    #[test]
    fn triple_scan_without_marker_uses_full_text() {
        let records = scan_single_digit_triples("just 5%6 here");
        assert_eq!(records, vec![rec(5, '%', 6)]);
    }

    #[test]
    fn adjacent_digits_never_form_a_record() {
        assert!(scan_single_digit_triples("coordinate 34").is_empty());
        assert!(scan_concatenated_runs("coordinate 34").is_empty());
    }

    #[test]
    fn letters_are_not_glyphs() {
        assert!(scan_single_digit_triples("coordinate 3a4").is_empty());
        assert!(scan_concatenated_runs("coordinate 3a4").is_empty());
    }

    #[test]
    fn triple_scan_reads_concatenated_table() {
        // The table layout after HTML flattening: "0█00█10█2..."
        let records = scan_single_digit_triples("y-coordinate0█00█10█2");
        assert_eq!(records, vec![rec(0, '█', 0), rec(0, '█', 1), rec(0, '█', 2)]);
    }

    #[test]
    fn proximity_scan_reads_multi_digit_values() {
        let records = scan_glyph_neighborhoods("12█7");
        assert_eq!(records, vec![rec(12, '█', 7)]);
    }

    #[test]
    fn proximity_scan_skips_glyph_without_both_sides() {
        assert!(scan_glyph_neighborhoods("12█ no trailing digit").is_empty());
        assert!(scan_glyph_neighborhoods("no leading digit █7").is_empty());
    }

    #[test]
    fn proximity_scan_window_is_four_chars() {
        // Digit five characters away is out of reach.
        assert!(scan_glyph_neighborhoods("3....█....7").is_empty());
        // Within the window it is found and extended to the full run.
        assert_eq!(scan_glyph_neighborhoods("41..█.27"), vec![rec(41, '█', 27)]);
    }

    #[test]
    fn chain_reaches_proximity_scan_when_triple_scan_misses() {
        // "12a█7" defeats the triple pattern (letter adjacent to the
        // glyph), but the proximity scan reads past the noise.
        let extractor = CoordinateExtractor::new();
        assert_eq!(extractor.extract("12a█7"), vec![rec(12, '█', 7)]);
    }

    #[test]
    fn chain_reaches_cursor_scan_last() {
        // Whitespace separators defeat the triple pattern (its middle
        // class rejects whitespace) and there is no allow-listed glyph,
        // so only the cursor scan reads these pairs.
        let extractor = CoordinateExtractor::new();
        assert_eq!(extractor.extract("coordinate 10 23"), vec![rec(10, ' ', 23)]);
    }

    #[test]
    fn cursor_scan_reads_multi_digit_triples() {
        assert_eq!(
            scan_concatenated_runs("coordinate10♥23noise4♥5"),
            vec![rec(10, '♥', 23), rec(4, '♥', 5)]
        );
    }

    #[test]
    fn first_matching_strategy_wins() {
        // Strategy 1 sees only the single-digit reading of "1*2"; the
        // cursor scan would read "34*56" as well. Only strategy 1 runs.
        let extractor = CoordinateExtractor::new();
        let text = "coordinate 1*2 and 34*56";
        let records = extractor.extract(text);
        assert_eq!(records, scan_single_digit_triples(text));
        assert!(records.contains(&rec(1, '*', 2)));
        assert!(records.contains(&rec(4, '*', 5)));
        assert!(!records.contains(&rec(34, '*', 56)));
    }

    #[test]
    fn cursor_scan_consumes_maximal_digit_runs() {
        let records = scan_concatenated_runs("y-coordinate120█45x7▀8");
        assert_eq!(records, vec![rec(120, '█', 45), rec(7, '▀', 8)]);
    }

    #[test]
    fn cursor_scan_tolerates_trailing_garbage() {
        let records = scan_concatenated_runs("coordinate..3♦..9♦9");
        assert_eq!(records, vec![rec(9, '♦', 9)]);
    }

    #[test]
    fn overflowing_digit_run_is_dropped() {
        // 11 digits cannot fit in u32; the candidate is skipped, not a panic.
        assert!(scan_concatenated_runs("coordinate99999999999█1").is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let extractor = CoordinateExtractor::new();
        let text = "y-coordinate0█00█11▀0";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn empty_text_yields_no_records() {
        let extractor = CoordinateExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("nothing to see here").is_empty());
    }
}
