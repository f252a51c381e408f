//! Plain-text board rendering
//!
//! Rows run from r = -5 at the top to r = 5 at the bottom; each row is
//! indented so the cells line up as a hexagon.

use crate::board::Board;
use crate::hex::{Hex, BOARD_RADIUS};
use crate::pieces::{Color, PlacedPiece};
use std::fmt::Write;

fn color_prefix(color: Color) -> char {
    match color {
        Color::Blue => 'b',
        Color::White => 'w',
        Color::Red => 'r',
    }
}

/// Two-character cell label: color prefix plus piece symbol
pub fn cell_label(occupant: Option<PlacedPiece>, hex: Hex) -> String {
    match occupant {
        Some(placed) => format!("{}{}", color_prefix(placed.color()), placed.kind().symbol()),
        None if hex.is_portal() => " @".to_string(),
        None => " ·".to_string(),
    }
}

/// Render the whole board, one line per row
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    let width = 2 * BOARD_RADIUS + 1;

    for r in -BOARD_RADIUS..=BOARD_RADIUS {
        let q_start = (-BOARD_RADIUS).max(-BOARD_RADIUS - r);
        let q_end = BOARD_RADIUS.min(BOARD_RADIUS - r);
        let count = q_end - q_start + 1;

        out.push_str(&" ".repeat(2 * (width - count) as usize));
        let cells: Vec<String> = (q_start..=q_end)
            .map(|q| {
                let hex = Hex::new(q, r);
                cell_label(board.occupant_at(hex), hex)
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }

    out
}

/// Board plus a caption line
pub fn render_with_caption(board: &Board, caption: &str) -> String {
    format!("--- {caption} ---\n{}", render_board(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::standard_board;

    #[test]
    fn test_row_shape() {
        let text = render_board(&Board::new());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);

        let counts: Vec<usize> = lines
            .iter()
            .map(|line| line.matches('·').count() + line.matches('@').count())
            .collect();
        assert_eq!(counts, vec![6, 7, 8, 9, 10, 11, 10, 9, 8, 7, 6]);
        assert!(lines[5].contains('@'));
    }

    #[test]
    fn test_standard_layout_labels() {
        let text = render_board(&standard_board());
        assert_eq!(text.matches("bK").count(), 1);
        assert_eq!(text.matches("rP").count(), 3);
        assert_eq!(text.matches("wE").count(), 3);
        assert_eq!(text.matches('@').count(), 1);
    }

    #[test]
    fn test_caption() {
        let text = render_with_caption(&Board::new(), "Blue's Turn.");
        assert!(text.starts_with("--- Blue's Turn. ---\n"));
    }
}
