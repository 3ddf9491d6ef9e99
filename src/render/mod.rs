// src/render/mod.rs
use std::fmt::Write;

use crate::grid::Grid;

/// Axis-labeled view: a column-index header and a row-index gutter, both
/// showing absolute coordinates mod 10 so wide grids stay aligned.
pub fn labeled(grid: &Grid) -> String {
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..grid.width() {
        let _ = write!(out, "{}", (col as u32 + grid.min_x) % 10);
    }
    out.push('\n');

    for (row_idx, row) in grid.rows().enumerate() {
        let _ = write!(out, "{}: ", (row_idx as u32 + grid.min_y) % 10);
        out.extend(row.iter());
        out.push('\n');
    }

    out
}

/// Bare glyph-only view, one grid row per line.
pub fn clean(grid: &Grid) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

/// Clean view with the row order reversed. Some source documents encode y
/// increasing upward; this view reads those the right way up.
pub fn flipped(grid: &Grid) -> String {
    let rows: Vec<&[char]> = grid.rows().collect();
    let mut out = String::new();
    for row in rows.into_iter().rev() {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::coords::CoordinateRecord;
    use crate::grid;

    fn sample() -> Grid {
        let records = [
            CoordinateRecord { x: 0, glyph: '█', y: 0 },
            CoordinateRecord { x: 1, glyph: '▀', y: 0 },
            CoordinateRecord { x: 0, glyph: '▄', y: 1 },
        ];
        grid::build(&records).unwrap()
    }

    #[test]
    fn labeled_view_has_header_and_gutter() {
        assert_eq!(labeled(&sample()), "   01\n0: █▀\n1: ▄ \n");
    }

    #[test]
    fn labeled_view_uses_absolute_coordinates_mod_ten() {
        let records = [
            CoordinateRecord { x: 9, glyph: '■', y: 11 },
            CoordinateRecord { x: 10, glyph: '●', y: 12 },
        ];
        let grid = grid::build(&records).unwrap();
        let view = labeled(&grid);
        let mut lines = view.lines();
        assert_eq!(lines.next(), Some("   90"));
        assert_eq!(lines.next(), Some("1: ■ "));
        assert_eq!(lines.next(), Some("2:  ●"));
    }

    #[test]
    fn clean_view_is_rows_only() {
        assert_eq!(clean(&sample()), "█▀\n▄ \n");
    }

    #[test]
    fn flipped_view_reverses_row_order() {
        assert_eq!(flipped(&sample()), "▄ \n█▀\n");
    }
}
