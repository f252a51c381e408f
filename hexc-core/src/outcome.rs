//! Move outcomes as ordered board events, and the self-check filter

use crate::board::Board;
use crate::hex::{Hex, PORTAL};
use crate::movegen::reachable;
use crate::pieces::{Piece, PieceKind, PlacedPiece};
use serde::{Deserialize, Serialize};

/// One board mutation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEvent {
    Add(PlacedPiece),
    Remove(PlacedPiece),
}

/// What a move would do, not yet committed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub piece: PlacedPiece,
    pub destination: Hex,
    pub events: Vec<MoveEvent>,
}

impl Outcome {
    /// The enemy piece removed by this move, if any
    pub fn captured(&self) -> Option<PlacedPiece> {
        self.events.iter().find_map(|event| match *event {
            MoveEvent::Remove(placed) if placed.hex == self.destination && placed != self.piece => {
                Some(placed)
            }
            _ => None,
        })
    }

    /// The reinforcement materialised in the Portal, if any. The mover's own
    /// Add, when present, is always the last event.
    pub fn reincarnation(&self) -> Option<PlacedPiece> {
        let spawn_events = if self.mover_survives() {
            &self.events[..self.events.len().saturating_sub(1)]
        } else {
            &self.events[..]
        };
        spawn_events.iter().find_map(|event| match *event {
            MoveEvent::Add(placed) => Some(placed),
            MoveEvent::Remove(_) => None,
        })
    }

    /// False when a non-King walks into the Portal and is consumed
    pub fn mover_survives(&self) -> bool {
        !(self.destination.is_portal() && self.piece.kind() != PieceKind::King)
    }

    pub fn wins_by_portal(&self) -> bool {
        self.destination.is_portal() && self.piece.kind() == PieceKind::King
    }
}

/// Build the event sequence for moving `piece` to `destination`. The caller
/// is responsible for having checked that the destination is reachable.
pub fn outcome_of(board: &Board, piece: PlacedPiece, destination: Hex) -> Outcome {
    let mut events = vec![MoveEvent::Remove(piece)];

    if let Some(captured) = board.occupant_at(destination) {
        events.push(MoveEvent::Remove(captured));

        // The capturer's own reserve of the captured kind feeds the Portal
        let in_reserve = board.sidelined(piece.color()).contains(captured.kind());
        let portal_free = match board.portal_occupant() {
            None => true,
            Some(occupant) => captured.hex.is_portal() || occupant == piece,
        };
        if in_reserve && portal_free {
            let spawn = Piece::new(captured.kind(), piece.color()).at(PORTAL);
            events.push(MoveEvent::Add(spawn));
        }
    }

    let mut outcome = Outcome {
        piece,
        destination,
        events,
    };
    if outcome.mover_survives() {
        outcome.events.push(MoveEvent::Add(piece.moved_to(destination)));
    }
    outcome
}

/// Replay the outcome on a scratch board and make sure the mover's King is
/// not left under attack. A color without a King is never in check.
pub fn is_self_safe(board: &Board, outcome: &Outcome) -> bool {
    let color = outcome.piece.color();
    let mut scratch = board.clone();
    if scratch.apply(&outcome.events).is_err() {
        return false;
    }
    match scratch.king_of(color) {
        Some(king) => !scratch.is_square_attacked(king.hex, color),
        None => true,
    }
}

/// Every fully legal outcome for one piece: raw reach, minus enemy Kings,
/// minus anything that exposes the mover's own King.
pub fn legal_outcomes(board: &Board, piece: PlacedPiece) -> Vec<Outcome> {
    reachable(board, piece)
        .into_iter()
        .filter(|&cell| {
            board
                .occupant_at(cell)
                .map_or(true, |occupant| occupant.kind() != PieceKind::King)
        })
        .map(|cell| outcome_of(board, piece, cell))
        .filter(|outcome| is_self_safe(board, outcome))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Color::{self, *};
    use crate::pieces::PieceKind::*;

    fn pp(kind: PieceKind, color: Color, q: i8, r: i8) -> PlacedPiece {
        PlacedPiece::new(kind, color, q, r)
    }

    fn board(pieces: &[PlacedPiece]) -> Board {
        Board::from_pieces(pieces).unwrap()
    }

    #[test]
    fn test_quiet_move_events() {
        let pawn = pp(Pawn, Blue, -1, -1);
        let b = board(&[pawn]);
        let outcome = outcome_of(&b, pawn, Hex::new(-1, 0));
        assert_eq!(
            outcome.events,
            vec![
                MoveEvent::Remove(pawn),
                MoveEvent::Add(pp(Pawn, Blue, -1, 0)),
            ]
        );
        assert!(outcome.captured().is_none());
        assert!(outcome.reincarnation().is_none());
    }

    #[test]
    fn test_capture_reincarnates_for_capturer() {
        let castle = pp(Castle, White, 2, -1);
        let victim = pp(Pawn, Red, 1, 0);
        let b = board(&[castle, victim]);
        let outcome = outcome_of(&b, castle, Hex::new(1, 0));
        assert_eq!(
            outcome.events,
            vec![
                MoveEvent::Remove(castle),
                MoveEvent::Remove(victim),
                MoveEvent::Add(pp(Pawn, White, 0, 0)),
                MoveEvent::Add(pp(Castle, White, 1, 0)),
            ]
        );
        assert_eq!(outcome.captured(), Some(victim));
        assert_eq!(outcome.reincarnation(), Some(pp(Pawn, White, 0, 0)));
    }

    #[test]
    fn test_no_reincarnation_without_reserve() {
        let castle = pp(Castle, White, 2, -1);
        let victim = pp(Pawn, Red, 1, 0);
        let b = board(&[
            pp(Pawn, White, 3, -2),
            pp(Pawn, White, 3, -1),
            pp(Pawn, White, 4, -2),
            castle,
            victim,
        ]);
        let outcome = outcome_of(&b, castle, Hex::new(1, 0));
        assert_eq!(outcome.events.len(), 3);
        assert!(outcome.reincarnation().is_none());
    }

    #[test]
    fn test_no_reincarnation_into_occupied_portal() {
        let castle = pp(Castle, White, 2, -1);
        let victim = pp(Pawn, Red, 1, 0);
        let b = board(&[castle, victim, pp(Elephant, Blue, 0, 0)]);
        let outcome = outcome_of(&b, castle, Hex::new(1, 0));
        assert!(outcome.reincarnation().is_none());
    }

    #[test]
    fn test_reincarnation_when_mover_leaves_portal() {
        let king = pp(King, White, 0, 0);
        let victim = pp(Pawn, Red, 1, 0);
        let b = board(&[king, victim]);
        let outcome = outcome_of(&b, king, Hex::new(1, 0));
        assert_eq!(outcome.reincarnation(), Some(pp(Pawn, White, 0, 0)));
    }

    #[test]
    fn test_non_king_consumed_by_portal() {
        let castle = pp(Castle, White, 0, -3);
        let victim = pp(Elephant, Red, 0, 0);
        let b = board(&[castle, victim]);
        let outcome = outcome_of(&b, castle, PORTAL);
        assert!(!outcome.mover_survives());
        assert_eq!(
            outcome.events,
            vec![
                MoveEvent::Remove(castle),
                MoveEvent::Remove(victim),
                MoveEvent::Add(pp(Elephant, White, 0, 0)),
            ]
        );
        assert_eq!(outcome.reincarnation(), Some(pp(Elephant, White, 0, 0)));
    }

    #[test]
    fn test_king_portal_capture_lands_last() {
        let king = pp(King, Blue, 0, 1);
        let victim = pp(Pawn, Red, 0, 0);
        let b = board(&[king, victim]);
        let outcome = outcome_of(&b, king, PORTAL);
        assert!(outcome.wins_by_portal());

        let mut after = b.clone();
        after.apply(&outcome.events).unwrap();
        assert_eq!(after.portal_occupant(), Some(pp(King, Blue, 0, 0)));
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn test_self_check_rejected() {
        // Blue castle shields its King from a White castle on the same row
        let king = pp(King, Blue, -4, 3);
        let shield = pp(Castle, Blue, -2, 3);
        let b = board(&[king, shield, pp(Castle, White, 1, 3)]);

        let destinations: Vec<Hex> = legal_outcomes(&b, shield)
            .iter()
            .map(|outcome| outcome.destination)
            .collect();
        // Staying on the row, or capturing the attacker, keeps the King safe
        assert!(destinations.contains(&Hex::new(-1, 3)));
        assert!(destinations.contains(&Hex::new(1, 3)));
        // Leaving the row exposes the King
        assert!(!destinations.contains(&Hex::new(-2, 2)));
    }

    #[test]
    fn test_enemy_king_is_never_a_destination() {
        let castle = pp(Castle, White, 3, 0);
        let b = board(&[castle, pp(King, Red, 1, 0)]);
        assert!(reachable(&b, castle).contains(&Hex::new(1, 0)));
        assert!(legal_outcomes(&b, castle)
            .iter()
            .all(|outcome| outcome.destination != Hex::new(1, 0)));
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let king = pp(King, Blue, -3, 0);
        let b = board(&[king, pp(Castle, Red, -2, 4)]);
        let destinations: Vec<Hex> = legal_outcomes(&b, king)
            .iter()
            .map(|outcome| outcome.destination)
            .collect();
        // The Red castle covers the whole q = -2 file
        assert!(!destinations.contains(&Hex::new(-2, 0)));
        assert!(!destinations.contains(&Hex::new(-2, -1)));
        assert!(destinations.contains(&Hex::new(-4, 0)));
    }
}
