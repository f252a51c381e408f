//! Turn controller
//!
//! Owns the live board, the turn, the swap flag and the status message.
//! Every submission is one atomic attempt: a rejected move leaves board,
//! turn and flags exactly as they were and only rewrites the message.

use crate::board::{Board, BoardError};
use crate::hex::Hex;
use crate::layout::standard_board;
use crate::outcome::{legal_outcomes, Outcome};
use crate::pieces::{Color, PieceKind, PlacedPiece};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Active,
    Finished,
}

/// How a game was won
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    Portal,
    Checkmate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub color: Color,
    pub reason: WinReason,
}

/// What an accepted submission did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// King and Queen traded places; the same color still has to move
    Swapped,
    /// A main move; the turn passed to `turn`
    Moved { turn: Color, in_check: bool },
    /// The move ended the game
    Won(Winner),
}

/// Why a submission was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("The game is over.")]
    GameFinished,
    #[error("No piece selected.")]
    NoPiece(Hex),
    #[error("It is {0}'s turn!")]
    WrongTurn(Color),
    #[error("You cannot move onto your own piece.")]
    OwnPiece,
    #[error("You cannot Swap again. Please make your Main Move.")]
    SwapPending,
    #[error("That swap would leave your King in check.")]
    SwapExposesKing,
    #[error("Invalid Move.")]
    IllegalMove,
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Danger to one color's King
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Threat {
    None,
    Check(Vec<Color>),
    Checkmate { attackers: Vec<Color>, winner: Color },
}

/// Among simultaneous checkmating colors, the one seated right after the
/// victim takes the win; otherwise the first remaining attacker does.
pub fn priority_winner(victim: Color, attackers: &[Color]) -> Option<Color> {
    attackers
        .iter()
        .copied()
        .find(|&color| color == victim.next())
        .or_else(|| attackers.first().copied())
}

/// Attack and escape test for one color on a given board
pub fn threat_against(board: &Board, victim: Color) -> Threat {
    let king = match board.king_of(victim) {
        Some(king) => king,
        None => return Threat::None,
    };

    let attackers = board.attackers_of(king.hex, victim);
    if attackers.is_empty() {
        return Threat::None;
    }

    if !legal_outcomes(board, king).is_empty() {
        return Threat::Check(attackers);
    }

    match priority_winner(victim, &attackers) {
        Some(winner) => Threat::Checkmate { attackers, winner },
        None => Threat::None,
    }
}

// ============================================================================
// GAME
// ============================================================================

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
    state: GameState,
    status: String,
    main_move_pending: bool,
    winner: Option<Winner>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New game in the standard layout, Blue to move
    pub fn new() -> Self {
        Self {
            board: standard_board(),
            turn: Color::Blue,
            state: GameState::Active,
            status: "Game Started. Blue to move.".to_string(),
            main_move_pending: false,
            winner: None,
        }
    }

    /// New game on an arbitrary board
    pub fn with_board(board: Board, turn: Color) -> Self {
        let mut game = Self::new();
        game.load_match_state(board, turn);
        game
    }

    /// Replace the working board and turn. Lifecycle state and the swap
    /// flag are left alone.
    pub fn load_match_state(&mut self, board: Board, turn: Color) {
        self.board = board;
        self.turn = turn;
        self.status = format!("Game Loaded. {turn} to move.");
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == GameState::Finished
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn main_move_pending(&self) -> bool {
        self.main_move_pending
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn placed_pieces(&self) -> Vec<PlacedPiece> {
        self.board.pieces()
    }

    /// Every legal main move for `color` on the current board
    pub fn legal_moves(&self, color: Color) -> Vec<Outcome> {
        self.board
            .pieces_of(color)
            .into_iter()
            .flat_map(|piece| legal_outcomes(&self.board, piece))
            .collect()
    }

    // ========================================================================
    // MOVE SUBMISSION
    // ========================================================================

    /// Attempt a move. On rejection the status message explains why and
    /// nothing else changes.
    pub fn submit_move(&mut self, from: Hex, to: Hex) -> Result<Advance, MoveError> {
        let result = self.try_move(from, to);
        match &result {
            Ok(advance) => debug!(%from, %to, ?advance, "move accepted"),
            // A finished game keeps its final message
            Err(MoveError::GameFinished) => {}
            Err(err) => {
                debug!(%from, %to, %err, "move rejected");
                self.status = err.to_string();
            }
        }
        result
    }

    fn try_move(&mut self, from: Hex, to: Hex) -> Result<Advance, MoveError> {
        if self.is_finished() {
            return Err(MoveError::GameFinished);
        }

        let piece = self.board.occupant_at(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color() != self.turn {
            return Err(MoveError::WrongTurn(self.turn));
        }

        if let Some(target) = self.board.occupant_at(to) {
            if target.color() == piece.color() {
                return if is_swap_pair(piece, target) {
                    self.swap(piece, target)
                } else {
                    Err(MoveError::OwnPiece)
                };
            }
        }

        let outcome = legal_outcomes(&self.board, piece)
            .into_iter()
            .find(|outcome| outcome.destination == to)
            .ok_or(MoveError::IllegalMove)?;

        self.commit(&outcome)
    }

    // ========================================================================
    // SWAP
    // ========================================================================

    fn swap(&mut self, piece: PlacedPiece, target: PlacedPiece) -> Result<Advance, MoveError> {
        if self.main_move_pending {
            return Err(MoveError::SwapPending);
        }

        let color = piece.color();
        let mut scratch = self.board.clone();
        scratch.remove(piece);
        scratch.remove(target);
        scratch.place(piece.moved_to(target.hex))?;
        scratch.place(target.moved_to(piece.hex))?;

        if let Some(king) = scratch.king_of(color) {
            if scratch.is_square_attacked(king.hex, color) {
                return Err(MoveError::SwapExposesKing);
            }
        }

        self.board = scratch;
        self.main_move_pending = true;

        if let Some(winner) = self.check_portal_victory() {
            return Ok(Advance::Won(winner));
        }

        self.status = "Diddilydoo complete. Make your Main Move.".to_string();
        Ok(Advance::Swapped)
    }

    // ========================================================================
    // COMMIT
    // ========================================================================

    fn commit(&mut self, outcome: &Outcome) -> Result<Advance, MoveError> {
        let mut next = self.board.clone();
        next.apply(&outcome.events)?;
        self.board = next;

        if let Some(winner) = self.check_portal_victory() {
            return Ok(Advance::Won(winner));
        }

        let entropy = self.portal_entropy(outcome);

        self.main_move_pending = false;
        self.turn = self.turn.next();
        self.status = format!("{}'s Turn.", self.turn);
        if let Some(note) = entropy {
            self.status.push_str(note);
        }

        let victim = self.turn;
        let in_check = match threat_against(&self.board, victim) {
            Threat::None => false,
            Threat::Check(_) => {
                self.status.push_str(&format!(" {victim} is in Check!"));
                true
            }
            Threat::Checkmate { winner, .. } => {
                let winner = Winner {
                    color: winner,
                    reason: WinReason::Checkmate,
                };
                let message = format!("{} Wins by Checkmate! ({victim} has no escape)", winner.color);
                self.finish(winner, message);
                return Ok(Advance::Won(winner));
            }
        };

        // The color seated after the new mover has not had a chance to react yet
        let bystander = victim.next();
        if let Threat::Checkmate { .. } = threat_against(&self.board, bystander) {
            self.status
                .push_str(&format!(" Warning: {bystander} faces a pending checkmate."));
        }

        Ok(Advance::Moved {
            turn: self.turn,
            in_check,
        })
    }

    /// A King standing in the Portal wins outright
    fn check_portal_victory(&mut self) -> Option<Winner> {
        let occupant = self.board.portal_occupant()?;
        if !occupant.piece.is_king() {
            return None;
        }
        let winner = Winner {
            color: occupant.color(),
            reason: WinReason::Portal,
        };
        self.finish(winner, format!("{} Wins by Portal!", winner.color));
        Some(winner)
    }

    /// Decay of non-King pieces in the Portal, applied before the turn passes
    fn portal_entropy(&mut self, outcome: &Outcome) -> Option<&'static str> {
        if !outcome.mover_survives() {
            debug!(piece = ?outcome.piece, "attacker vanished in the portal");
            return Some(" (Attacker vanished in the Portal)");
        }

        let camper = self.board.portal_occupant()?;
        let neglected = camper.color() == outcome.piece.color()
            && camper.kind() != PieceKind::King
            && outcome.reincarnation() != Some(camper);
        if !neglected {
            return None;
        }

        debug!(piece = ?camper, "abandoned piece decayed in the portal");
        self.board.remove(camper);
        Some(" (Abandoned piece lost to the Portal)")
    }

    fn finish(&mut self, winner: Winner, message: String) {
        info!(winner = %winner.color, reason = ?winner.reason, "game finished");
        self.state = GameState::Finished;
        self.winner = Some(winner);
        self.status = message;
    }
}

fn is_swap_pair(a: PlacedPiece, b: PlacedPiece) -> bool {
    matches!(
        (a.kind(), b.kind()),
        (PieceKind::King, PieceKind::Queen) | (PieceKind::Queen, PieceKind::King)
    )
}

// ============================================================================
// TESTS
// ============================================================================
