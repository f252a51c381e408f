//! Move geometry and the occupancy filter
//!
//! `candidates` is the per-kind geometry; `reachable` layers bounds, Portal
//! entry, friendly occupancy and the phalanx rule on top. Neither consults
//! the self-check filter, so attack queries built on them cannot recurse.

use crate::board::Board;
use crate::hex::{Hex, DIAGONALS, DIAGONAL_GATES, DIRECTIONS};
use crate::pieces::{
    PieceKind, PlacedPiece, CASTLE_RANGE, DIAGONAL_RANGE, ELEPHANT_LEAPS, QUEEN_LEAP,
};

// ============================================================================
// GEOMETRY
// ============================================================================

/// Cells a piece could move to by its kind's geometry alone
pub fn candidates(board: &Board, mover: PlacedPiece) -> Vec<Hex> {
    let mut cells = Vec::new();
    let origin = mover.hex;

    match mover.kind() {
        PieceKind::King => {
            cells.extend(origin.neighbors());
        }
        PieceKind::Pawn => {
            cells.extend(origin.neighbors().filter(|&cell| board.is_empty_at(cell)));
            pawn_attacks(board, mover, &mut cells);
        }
        PieceKind::Elephant => {
            cells.extend(ELEPHANT_LEAPS.iter().map(|&(dq, dr)| origin.offset(dq, dr)));
        }
        PieceKind::Castle => {
            slide(board, mover, &DIRECTIONS, CASTLE_RANGE, &mut cells);
        }
        PieceKind::Queen => {
            slide(board, mover, &DIRECTIONS, CASTLE_RANGE, &mut cells);
            slide(board, mover, &DIAGONALS, DIAGONAL_RANGE, &mut cells);
            queen_leaps(board, origin, &mut cells);
        }
    }

    cells
}

/// A gate pair is open when at least one of its cells is empty
fn gate_open(board: &Board, from: Hex, gates: &[(i8, i8); 2]) -> bool {
    gates
        .iter()
        .any(|&(dq, dr)| board.is_empty_at(from.offset(dq, dr)))
}

/// Diagonal captures; only onto enemies, and only through an open gate
fn pawn_attacks(board: &Board, pawn: PlacedPiece, cells: &mut Vec<Hex>) {
    for (&(dq, dr), gates) in DIAGONALS.iter().zip(DIAGONAL_GATES.iter()) {
        let target = pawn.hex.offset(dq, dr);
        let enemy_there = board
            .occupant_at(target)
            .is_some_and(|occupant| occupant.color() != pawn.color());
        if enemy_there && gate_open(board, pawn.hex, gates) {
            cells.push(target);
        }
    }
}

/// Sliding runs. A run ends at the first occupied cell (kept only if it
/// holds an enemy) and never enters an empty or friendly-held Portal.
fn slide(
    board: &Board,
    mover: PlacedPiece,
    directions: &[(i8, i8); 6],
    range: i8,
    cells: &mut Vec<Hex>,
) {
    for &dir in directions {
        for steps in 1..=range {
            let cell = mover.hex.step(dir, steps);
            if !cell.is_valid() {
                break;
            }

            match board.occupant_at(cell) {
                None if cell.is_portal() => break,
                None => cells.push(cell),
                Some(occupant) => {
                    if occupant.color() != mover.color() {
                        cells.push(cell);
                    }
                    break;
                }
            }
        }
    }
}

/// The Queen's three-cell diagonal leap. Both pass-through cells must be
/// empty and every step needs an open gate; otherwise the leap is lost.
fn queen_leaps(board: &Board, origin: Hex, cells: &mut Vec<Hex>) {
    for (&dir, gates) in DIAGONALS.iter().zip(DIAGONAL_GATES.iter()) {
        let mut from = origin;
        let mut clear = true;

        for steps in 1..=QUEEN_LEAP {
            let to = from.step(dir, 1);
            if steps < QUEEN_LEAP && !board.is_empty_at(to) {
                clear = false;
                break;
            }
            if !gate_open(board, from, gates) {
                clear = false;
                break;
            }
            from = to;
        }

        if clear {
            cells.push(origin.step(dir, QUEEN_LEAP));
        }
    }
}

// ============================================================================
// OCCUPANCY FILTER
// ============================================================================

/// Raw destinations: geometry filtered by bounds, Portal entry, friendly
/// occupancy and the phalanx rule. Enemy Kings are still included here so
/// that attack queries can see them.
pub fn reachable(board: &Board, mover: PlacedPiece) -> Vec<Hex> {
    let portal_open = can_enter_portal(board, mover);
    let mut reach: Vec<Hex> = Vec::new();

    for cell in candidates(board, mover) {
        if !cell.is_valid() {
            continue;
        }
        if cell.is_portal() && !portal_open {
            continue;
        }
        if let Some(occupant) = board.occupant_at(cell) {
            if occupant.color() == mover.color() {
                continue;
            }
            if in_phalanx(board, occupant) {
                continue;
            }
        }
        if !reach.contains(&cell) {
            reach.push(cell);
        }
    }

    reach
}

/// An empty Portal admits only Kings; an occupied one admits any enemy of
/// its occupant.
pub fn can_enter_portal(board: &Board, mover: PlacedPiece) -> bool {
    match board.portal_occupant() {
        None => mover.kind() == PieceKind::King,
        Some(occupant) => occupant.color() != mover.color(),
    }
}

/// A pawn with two or more allied pawns next to it cannot be captured
pub fn in_phalanx(board: &Board, piece: PlacedPiece) -> bool {
    if piece.kind() != PieceKind::Pawn {
        return false;
    }
    piece
        .hex
        .neighbors()
        .filter_map(|cell| board.occupant_at(cell))
        .filter(|neighbor| neighbor.kind() == PieceKind::Pawn && neighbor.color() == piece.color())
        .count()
        >= 2
}
