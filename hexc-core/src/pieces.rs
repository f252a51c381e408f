//! Piece kinds, colors and movement tables

use crate::hex::Hex;
use serde::{Deserialize, Serialize};

/// Piece kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Elephant,
    Castle,
    Queen,
    King,
}

pub const PIECE_KINDS: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Elephant,
    PieceKind::Castle,
    PieceKind::Queen,
    PieceKind::King,
];

impl PieceKind {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Elephant => 'E',
            PieceKind::Castle => 'C',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Elephant => "Elephant",
            PieceKind::Castle => "Castle",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Parse a kind by name, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        PIECE_KINDS
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Red,
}

/// Seating order; play passes Blue -> White -> Red -> Blue
pub const TURN_ORDER: [Color; 3] = [Color::Blue, Color::White, Color::Red];

impl Color {
    /// The color seated immediately after this one
    pub fn next(self) -> Self {
        match self {
            Color::Blue => Color::White,
            Color::White => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Blue => "Blue",
            Color::Red => "Red",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        TURN_ORDER
            .iter()
            .copied()
            .find(|color| color.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece off the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    pub fn at(self, hex: Hex) -> PlacedPiece {
        PlacedPiece { piece: self, hex }
    }
}

/// A piece bound to a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub piece: Piece,
    pub hex: Hex,
}

impl PlacedPiece {
    pub const fn new(kind: PieceKind, color: Color, q: i8, r: i8) -> Self {
        Self {
            piece: Piece::new(kind, color),
            hex: Hex::new(q, r),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.piece.kind
    }

    pub fn color(&self) -> Color {
        self.piece.color
    }

    /// Same piece, different cell
    pub fn moved_to(&self, hex: Hex) -> Self {
        self.piece.at(hex)
    }
}

/// Starting count of each kind, per color, indexed by `PieceKind::index`
pub const ROSTER: [u8; 5] = [3, 3, 2, 1, 1];

/// Elephant leaps (distance three, jumps over anything)
pub const ELEPHANT_LEAPS: [(i8, i8); 12] = [
    (1, -3), (2, -3), (-2, -1), (-1, -2), (3, -2), (3, -1),
    (2, 1), (1, 2), (-2, 3), (-1, 3), (-3, 1), (-3, 2),
];

/// Castle runs are at most this long
pub const CASTLE_RANGE: i8 = 6;

/// Queen diagonal runs are at most this long
pub const DIAGONAL_RANGE: i8 = 5;

/// Length of the Queen's gated diagonal leap
pub const QUEEN_LEAP: i8 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_cycle() {
        assert_eq!(Color::Blue.next(), Color::White);
        assert_eq!(Color::White.next(), Color::Red);
        assert_eq!(Color::Red.next(), Color::Blue);
        for color in TURN_ORDER {
            assert_eq!(color.next().next().next(), color);
        }
    }

    #[test]
    fn test_roster_size() {
        assert_eq!(ROSTER.iter().map(|&n| n as usize).sum::<usize>(), 10);
        assert_eq!(ROSTER[PieceKind::King.index()], 1);
        assert_eq!(ROSTER[PieceKind::Castle.index()], 2);
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(PieceKind::from_name("elephant"), Some(PieceKind::Elephant));
        assert_eq!(PieceKind::from_name("KING"), Some(PieceKind::King));
        assert_eq!(PieceKind::from_name("Rook"), None);
        assert_eq!(Color::from_name("red"), Some(Color::Red));
        assert_eq!(Color::from_name("Black"), None);
    }

    #[test]
    fn test_elephant_leaps_are_distance_three() {
        let origin = Hex::new(0, 0);
        for &(dq, dr) in &ELEPHANT_LEAPS {
            assert_eq!(origin.distance_to(Hex::new(dq, dr)), 3);
        }
    }
}
