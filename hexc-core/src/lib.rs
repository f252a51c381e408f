//! HexC Core - Rules engine for three-player hexagonal chess
//!
//! This crate provides the core game logic for HexC:
//! - Board geometry (radius-5 hex grid with axial coordinates, Portal at the center)
//! - Piece kinds, colors and movement tables
//! - Raw reachability and the self-check legality filter
//! - Move outcomes as Add/Remove event sequences with Portal reincarnation
//! - The turn controller (swap, Portal victory and decay, check and checkmate)
//! - A heuristic bot and a plain-text renderer

pub mod hex;
pub mod pieces;
pub mod board;
pub mod movegen;
pub mod outcome;
pub mod layout;
pub mod game;
pub mod bot;
pub mod render;

// Re-exports for convenient access
pub use hex::{Hex, BOARD_RADIUS, DIAGONALS, DIRECTIONS, PORTAL};
pub use pieces::{Color, Piece, PieceKind, PlacedPiece, PIECE_KINDS, TURN_ORDER};
pub use board::{Board, BoardError, Reserve};
pub use outcome::{legal_outcomes, MoveEvent, Outcome};
pub use layout::{standard_board, STANDARD_LAYOUT};
pub use game::{Advance, Game, GameState, MoveError, WinReason, Winner};
pub use bot::BasicBot;
pub use render::render_board;
