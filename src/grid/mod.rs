// src/grid/mod.rs
use crate::extractors::coords::CoordinateRecord;

/// Placeholder for cells no record wrote to.
pub const BLANK: char = ' ';

// A real message fits comfortably; anything larger means the extractor
// read noise as coordinates.
const MAX_CANVAS_CELLS: u64 = 1_000_000;

/// The decoded message canvas plus the coordinate bounds it was built
/// from. Bounds are kept so the renderer can label axes with absolute
/// coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<char>>,
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl Grid {
    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }

    /// Cell at grid-local (row, col); `None` out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.iter().map(|row| row.as_slice())
    }
}

/// Projects coordinate records onto a canvas bounded by their extremal
/// x/y values. Records sharing a cell resolve silently to the later one.
///
/// Returns `None` for an empty record set, or when the bounding span is
/// too large to allocate: both are ordinary "no grid" outcomes the caller
/// reports, not errors.
pub fn build(records: &[CoordinateRecord]) -> Option<Grid> {
    let first = records.first()?;

    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;
    for r in records {
        min_x = min_x.min(r.x);
        max_x = max_x.max(r.x);
        min_y = min_y.min(r.y);
        max_y = max_y.max(r.y);
    }

    // Spans in u64: u32 arithmetic would overflow on extreme coordinates
    // the extractor is allowed to produce from noisy text.
    let span_x = max_x as u64 - min_x as u64 + 1;
    let span_y = max_y as u64 - min_y as u64 + 1;
    match span_x.checked_mul(span_y) {
        Some(cells) if cells <= MAX_CANVAS_CELLS => {}
        _ => {
            tracing::warn!(
                "Canvas {} x {} is too large to allocate, treating as no grid",
                span_x, span_y
            );
            return None;
        }
    }

    let width = span_x as usize;
    let height = span_y as usize;
    tracing::info!(
        "Grid size: {} x {} (x: {}..={}, y: {}..={})",
        width, height, min_x, max_x, min_y, max_y
    );

    let mut cells = vec![vec![BLANK; width]; height];
    for r in records {
        let col = (r.x - min_x) as usize;
        let row = (r.y - min_y) as usize;
        tracing::debug!("Placed '{}' at grid ({}, {}) from coord ({}, {})", r.glyph, col, row, r.x, r.y);
        cells[row][col] = r.glyph;
    }

    Some(Grid { cells, min_x, max_x, min_y, max_y })
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn rec(x: u32, glyph: char, y: u32) -> CoordinateRecord {
        CoordinateRecord { x, glyph, y }
    }

    #[test]
    fn builds_two_by_two_grid() {
        let grid = build(&[rec(0, '█', 0), rec(1, '▀', 0), rec(0, '▄', 1)]).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(0, 0), Some('█'));
        assert_eq!(grid.get(0, 1), Some('▀'));
        assert_eq!(grid.get(1, 0), Some('▄'));
        assert_eq!(grid.get(1, 1), Some(BLANK));
    }

    #[test]
    fn empty_records_yield_no_grid() {
        assert!(build(&[]).is_none());
    }

    #[test]
    fn later_record_wins_shared_cell() {
        let grid = build(&[rec(0, '○', 0), rec(1, '■', 1), rec(0, '●', 0)]).unwrap();
        assert_eq!(grid.get(0, 0), Some('●'));
    }

    #[test]
    fn bounds_offset_nonzero_minima() {
        let grid = build(&[rec(5, '★', 10), rec(7, '☆', 12)]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.min_x, 5);
        assert_eq!(grid.max_y, 12);
        assert_eq!(grid.get(0, 0), Some('★'));
        assert_eq!(grid.get(2, 2), Some('☆'));
        assert_eq!(grid.get(0, 2), Some(BLANK));
    }

    #[test]
    fn extreme_span_yields_no_grid() {
        // Coordinates as far apart as u32 allows must degrade to the
        // no-grid outcome, not overflow the span arithmetic.
        assert!(build(&[rec(0, '█', 0), rec(u32::MAX, '█', 0)]).is_none());
        assert!(build(&[rec(0, '█', 0), rec(0, '█', u32::MAX)]).is_none());
        assert!(build(&[rec(u32::MAX, '█', u32::MAX)]).is_some());
    }

    #[test]
    fn adversarial_extremes_degrade_end_to_end() {
        use crate::extractors::coords::CoordinateExtractor;

        // The cursor scan happily reads "4294967295" as a coordinate; the
        // resulting four-billion-column canvas is reported as no grid.
        let records = CoordinateExtractor::new().extract("coordinate 0 1 4294967295 2");
        assert!(!records.is_empty());
        assert!(build(&records).is_none());
    }

    #[test]
    fn out_of_bounds_get_is_none() {
        let grid = build(&[rec(0, '█', 0)]).unwrap();
        assert_eq!(grid.get(1, 0), None);
        assert_eq!(grid.get(0, 1), None);
    }
}
