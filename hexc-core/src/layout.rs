//! Standard starting layout

use crate::board::Board;
use crate::pieces::{Color, PieceKind, PlacedPiece};

use Color::{Blue, Red, White};
use PieceKind::{Castle, Elephant, King, Pawn, Queen};

/// The thirty fixed starting placements, ten per color
pub const STANDARD_LAYOUT: [PlacedPiece; 30] = [
    // Blue
    PlacedPiece::new(Castle, Blue, -1, -4),
    PlacedPiece::new(Castle, Blue, -4, -1),
    PlacedPiece::new(Elephant, Blue, -1, -3),
    PlacedPiece::new(Elephant, Blue, -2, -2),
    PlacedPiece::new(Elephant, Blue, -3, -1),
    PlacedPiece::new(Pawn, Blue, -1, -2),
    PlacedPiece::new(Pawn, Blue, -1, -1),
    PlacedPiece::new(Pawn, Blue, -2, -1),
    PlacedPiece::new(Queen, Blue, -3, -2),
    PlacedPiece::new(King, Blue, -2, -3),
    // Red
    PlacedPiece::new(Castle, Red, -4, 5),
    PlacedPiece::new(Castle, Red, -1, 5),
    PlacedPiece::new(Elephant, Red, -3, 4),
    PlacedPiece::new(Elephant, Red, -2, 4),
    PlacedPiece::new(Elephant, Red, -1, 4),
    PlacedPiece::new(Pawn, Red, -2, 3),
    PlacedPiece::new(Pawn, Red, -1, 3),
    PlacedPiece::new(Pawn, Red, -1, 2),
    PlacedPiece::new(King, Red, -3, 5),
    PlacedPiece::new(Queen, Red, -2, 5),
    // White
    PlacedPiece::new(Castle, White, 5, -4),
    PlacedPiece::new(Castle, White, 5, -1),
    PlacedPiece::new(Elephant, White, 4, -3),
    PlacedPiece::new(Elephant, White, 4, -2),
    PlacedPiece::new(Elephant, White, 4, -1),
    PlacedPiece::new(Pawn, White, 3, -2),
    PlacedPiece::new(Pawn, White, 3, -1),
    PlacedPiece::new(Pawn, White, 2, -1),
    PlacedPiece::new(King, White, 5, -3),
    PlacedPiece::new(Queen, White, 5, -2),
];

/// Every placement is on the board and no two share a cell
const fn layout_is_sound(layout: &[PlacedPiece]) -> bool {
    let mut i = 0;
    while i < layout.len() {
        let hex = layout[i].hex;
        if !hex.is_valid() {
            return false;
        }
        let mut j = i + 1;
        while j < layout.len() {
            if layout[j].hex.q == hex.q && layout[j].hex.r == hex.r {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    layout_is_sound(&STANDARD_LAYOUT),
    "standard layout has an off-board or shared cell"
);

/// A board with the standard layout
pub fn standard_board() -> Board {
    match Board::from_pieces(&STANDARD_LAYOUT) {
        Ok(board) => board,
        // Ruled out at compile time by `layout_is_sound`
        Err(err) => unreachable!("standard layout rejected: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::TURN_ORDER;

    #[test]
    fn test_layout_is_valid_and_unique() {
        let board = Board::from_pieces(&STANDARD_LAYOUT).unwrap();
        assert_eq!(board.len(), 30);
        assert_eq!(standard_board().pieces(), board.pieces());
    }

    #[test]
    fn test_layout_check_catches_bad_tables() {
        assert!(layout_is_sound(&STANDARD_LAYOUT));

        let mut shared = STANDARD_LAYOUT;
        shared[1].hex = shared[0].hex;
        assert!(!layout_is_sound(&shared));
        assert!(Board::from_pieces(&shared).is_err());

        let mut off_board = STANDARD_LAYOUT;
        off_board[0] = PlacedPiece::new(Castle, Blue, 4, 4);
        assert!(!layout_is_sound(&off_board));
        assert!(Board::from_pieces(&off_board).is_err());
    }

    #[test]
    fn test_layout_uses_full_roster() {
        let board = standard_board();
        for color in TURN_ORDER {
            assert!(board.sidelined(color).is_empty(), "{color} should start with no reserve");
            assert!(board.king_of(color).is_some());
        }
    }

    #[test]
    fn test_portal_starts_empty() {
        assert!(standard_board().portal_occupant().is_none());
    }
}
