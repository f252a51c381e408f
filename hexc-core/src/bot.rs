//! Heuristic bot
//!
//! Picks among the mover's legal outcomes with a fixed priority: a King
//! stepping into the Portal wins outright, then any capture, then anything.
//! Ties are broken uniformly at random.

use crate::game::Game;
use crate::outcome::Outcome;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct BasicBot {
    rng: ChaCha8Rng,
}

impl BasicBot {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Reproducible bot
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Choose a move for whoever is to move. `None` when that color has no
    /// legal move at all or the game is already over.
    pub fn pick_move(&mut self, game: &Game) -> Option<Outcome> {
        if game.is_finished() {
            return None;
        }
        self.pick_from(game.legal_moves(game.turn()))
    }

    fn pick_from(&mut self, moves: Vec<Outcome>) -> Option<Outcome> {
        if let Some(win) = moves.iter().find(|outcome| outcome.wins_by_portal()) {
            return Some(win.clone());
        }

        let captures: Vec<&Outcome> = moves
            .iter()
            .filter(|outcome| outcome.captured().is_some())
            .collect();
        if let Some(capture) = captures.choose(&mut self.rng) {
            return Some((*capture).clone());
        }

        moves.choose(&mut self.rng).cloned()
    }
}

impl Default for BasicBot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::hex::{Hex, PORTAL};
    use crate::pieces::Color::*;
    use crate::pieces::PieceKind::*;
    use crate::pieces::PlacedPiece;

    fn game_with(pieces: &[PlacedPiece], turn: crate::pieces::Color) -> Game {
        Game::with_board(Board::from_pieces(pieces).unwrap(), turn)
    }

    #[test]
    fn test_bot_takes_portal_win() {
        let game = game_with(
            &[
                PlacedPiece::new(King, Red, 1, 0),
                PlacedPiece::new(Castle, Red, -3, 3),
                PlacedPiece::new(Pawn, Blue, -3, 1),
            ],
            Red,
        );
        let mut bot = BasicBot::with_seed(7);
        let pick = bot.pick_move(&game).unwrap();
        assert_eq!(pick.piece, PlacedPiece::new(King, Red, 1, 0));
        assert_eq!(pick.destination, PORTAL);
    }

    #[test]
    fn test_bot_prefers_capture() {
        let game = game_with(
            &[
                PlacedPiece::new(Castle, White, 2, -1),
                PlacedPiece::new(Pawn, Red, 1, 0),
                PlacedPiece::new(Pawn, White, 4, 1),
            ],
            White,
        );
        for seed in 0..8 {
            let mut bot = BasicBot::with_seed(seed);
            let pick = bot.pick_move(&game).unwrap();
            assert_eq!(pick.destination, Hex::new(1, 0));
        }
    }

    #[test]
    fn test_bot_is_reproducible() {
        let game = Game::new();
        let a = BasicBot::with_seed(42).pick_move(&game);
        let b = BasicBot::with_seed(42).pick_move(&game);
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn test_bot_without_moves() {
        let game = game_with(&[PlacedPiece::new(Pawn, Red, 1, 0)], Blue);
        assert!(BasicBot::with_seed(1).pick_move(&game).is_none());
    }
}
