//! Match registry
//!
//! Matches live behind one `RwLock`ed map. Each match has its own mutex,
//! held for the whole of a submission, so two moves on the same match can
//! never interleave while moves on different matches run independently.

use hexc_core::Game;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// Why a match could not be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateError {
    BlankId,
    AlreadyExists,
}

pub type SharedGame = Arc<Mutex<Game>>;

/// Server-wide shared state
pub struct ServerState {
    games: RwLock<HashMap<String, SharedGame>>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new match in the standard layout
    pub fn create_game(&self, id: &str) -> Result<SharedGame, CreateError> {
        if id.trim().is_empty() {
            return Err(CreateError::BlankId);
        }

        // Existence check and insert happen under one write lock
        let mut games = self.games.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if games.contains_key(id) {
            return Err(CreateError::AlreadyExists);
        }
        let game = Arc::new(Mutex::new(Game::new()));
        games.insert(id.to_string(), Arc::clone(&game));
        Ok(game)
    }

    pub fn get(&self, id: &str) -> Option<SharedGame> {
        let games = self.games.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        games.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.games.read().map(|games| games.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive access to one match. A panic while a previous holder had the
/// lock does not leave the game half-written, since commits are atomic.
pub fn lock_game(game: &SharedGame) -> MutexGuard<'_, Game> {
    game.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get() {
        let state = ServerState::new();
        assert!(state.is_empty());
        state.create_game("alpha").unwrap();
        assert!(state.get("alpha").is_some());
        assert!(state.get("beta").is_none());
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_create_rejects_blank_and_duplicate() {
        let state = ServerState::new();
        assert_eq!(state.create_game("  ").unwrap_err(), CreateError::BlankId);
        state.create_game("alpha").unwrap();
        assert_eq!(state.create_game("alpha").unwrap_err(), CreateError::AlreadyExists);
    }

    #[test]
    fn test_matches_are_independent() {
        let state = ServerState::new();
        let a = state.create_game("a").unwrap();
        state.create_game("b").unwrap();

        lock_game(&a)
            .submit_move(hexc_core::Hex::new(-1, -1), hexc_core::Hex::new(-1, 0))
            .unwrap();

        let b = state.get("b").unwrap();
        assert_eq!(lock_game(&a).turn(), hexc_core::Color::White);
        assert_eq!(lock_game(&b).turn(), hexc_core::Color::Blue);
    }
}
