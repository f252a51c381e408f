//! Piece placement storage
//!
//! The board is keyed by cell, so at most one piece can ever occupy a
//! location. Attack queries only use raw reachability from `movegen` and
//! never run the self-check filter.

use crate::hex::{Hex, PORTAL};
use crate::movegen::reachable;
use crate::outcome::MoveEvent;
use crate::pieces::{Color, Piece, PieceKind, PlacedPiece, PIECE_KINDS, ROSTER, TURN_ORDER};
use rustc_hash::FxHashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cannot place piece at {0}: location is off the board")]
    OutOfBounds(Hex),
    #[error("cannot place piece at {0}: location is already occupied")]
    Occupied(Hex),
}

/// Pieces of one color that are not on the board, counted per kind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reserve {
    counts: [u8; 5],
}

impl Reserve {
    pub fn count(&self, kind: PieceKind) -> u8 {
        self.counts[kind.index()]
    }

    pub fn contains(&self, kind: PieceKind) -> bool {
        self.count(kind) > 0
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&n| n as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Kinds with at least one piece in reserve
    pub fn kinds(&self) -> impl Iterator<Item = PieceKind> + '_ {
        PIECE_KINDS.iter().copied().filter(|&kind| self.contains(kind))
    }
}

/// Board (clone for a fully independent scratch copy)
#[derive(Clone, Debug, Default)]
pub struct Board {
    cells: FxHashMap<Hex, Piece>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit placements. Unlike `place`, a second piece
    /// on an occupied cell is an error here.
    pub fn from_pieces(pieces: &[PlacedPiece]) -> Result<Self, BoardError> {
        let mut board = Board::new();
        for placed in pieces {
            if board.cells.contains_key(&placed.hex) {
                return Err(BoardError::Occupied(placed.hex));
            }
            board.place(*placed)?;
        }
        Ok(board)
    }

    pub fn occupant_at(&self, hex: Hex) -> Option<PlacedPiece> {
        self.cells.get(&hex).map(|piece| piece.at(hex))
    }

    pub fn is_empty_at(&self, hex: Hex) -> bool {
        !self.cells.contains_key(&hex)
    }

    pub fn portal_occupant(&self) -> Option<PlacedPiece> {
        self.occupant_at(PORTAL)
    }

    /// First piece of the given kind and color, scanning cells in row order
    pub fn find_piece(&self, kind: PieceKind, color: Color) -> Option<PlacedPiece> {
        self.pieces()
            .into_iter()
            .find(|placed| placed.kind() == kind && placed.color() == color)
    }

    pub fn king_of(&self, color: Color) -> Option<PlacedPiece> {
        self.find_piece(PieceKind::King, color)
    }

    /// Put a piece on the board, replacing whatever stood there
    pub fn place(&mut self, placed: PlacedPiece) -> Result<(), BoardError> {
        if !placed.hex.is_valid() {
            return Err(BoardError::OutOfBounds(placed.hex));
        }
        self.cells.insert(placed.hex, placed.piece);
        Ok(())
    }

    /// Remove the piece only if kind, color and location all match
    pub fn remove(&mut self, placed: PlacedPiece) -> bool {
        if self.cells.get(&placed.hex) == Some(&placed.piece) {
            self.cells.remove(&placed.hex);
            true
        } else {
            false
        }
    }

    /// Replay an event sequence in order
    pub fn apply(&mut self, events: &[MoveEvent]) -> Result<(), BoardError> {
        for event in events {
            match *event {
                MoveEvent::Remove(placed) => {
                    self.remove(placed);
                }
                MoveEvent::Add(placed) => self.place(placed)?,
            }
        }
        Ok(())
    }

    /// All placed pieces, sorted by row then column
    pub fn pieces(&self) -> Vec<PlacedPiece> {
        let mut pieces: Vec<PlacedPiece> = self
            .cells
            .iter()
            .map(|(&hex, &piece)| piece.at(hex))
            .collect();
        pieces.sort_by_key(|placed| (placed.hex.r, placed.hex.q));
        pieces
    }

    pub fn pieces_of(&self, color: Color) -> Vec<PlacedPiece> {
        self.pieces()
            .into_iter()
            .filter(|placed| placed.color() == color)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Starting roster minus what is on the board, per kind
    pub fn sidelined(&self, color: Color) -> Reserve {
        let mut counts = ROSTER;
        for piece in self.cells.values().filter(|piece| piece.color == color) {
            let slot = &mut counts[piece.kind.index()];
            *slot = slot.saturating_sub(1);
        }
        Reserve { counts }
    }

    /// True if any piece not of `excluding` can reach `hex`
    pub fn is_square_attacked(&self, hex: Hex, excluding: Color) -> bool {
        self.cells
            .iter()
            .filter(|(_, piece)| piece.color != excluding)
            .any(|(&from, &piece)| reachable(self, piece.at(from)).contains(&hex))
    }

    /// Colors (in seating order) with at least one piece that reaches `hex`
    pub fn attackers_of(&self, hex: Hex, victim: Color) -> Vec<Color> {
        TURN_ORDER
            .iter()
            .copied()
            .filter(|&color| color != victim)
            .filter(|&color| {
                self.cells
                    .iter()
                    .filter(|(_, piece)| piece.color == color)
                    .any(|(&from, &piece)| reachable(self, piece.at(from)).contains(&hex))
            })
            .collect()
    }
}
