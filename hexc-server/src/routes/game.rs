//! Match API endpoints
//!
//! Thin wrappers over the engine: each handler looks up one match, takes its
//! lock and translates the engine's answer into HTTP.

use crate::state::{lock_game, CreateError, ServerState};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use hexc_core::{Color, GameState, Hex, Winner};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

const NOT_FOUND: &str = "Game not found";

#[derive(Deserialize)]
pub struct GameParams {
    #[serde(rename = "gameId", default)]
    pub game_id: String,
}

#[derive(Deserialize)]
pub struct MoveParams {
    #[serde(rename = "gameId", default)]
    pub game_id: String,
    pub q1: i32,
    pub r1: i32,
    pub q2: i32,
    pub r2: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub turn: Color,
    pub state: GameState,
    pub message: String,
    pub main_move_pending: bool,
    pub winner: Option<Winner>,
}

#[derive(Serialize)]
pub struct PieceView {
    pub piece: &'static str,
    pub color: &'static str,
    pub q: i8,
    pub r: i8,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveAccepted {
    pub success: bool,
    pub new_turn: Color,
    pub message: String,
}

#[derive(Serialize)]
pub struct MoveRejected {
    pub success: bool,
    pub message: String,
}

/// Coordinates far outside the board still have to map onto a cell
fn hex_param(q: i32, r: i32) -> Hex {
    let clamp = |v: i32| v.clamp(i8::MIN as i32, i8::MAX as i32) as i8;
    Hex::new(clamp(q), clamp(r))
}

/// Create a match in the standard layout
pub async fn create_game(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<GameParams>,
) -> Result<String, (StatusCode, String)> {
    let id = params.game_id;
    match state.create_game(&id) {
        Ok(_) => {
            info!(game_id = %id, "match created");
            Ok(format!("Game {id} created. Blue to move."))
        }
        Err(CreateError::BlankId) => Err((
            StatusCode::BAD_REQUEST,
            "Game ID cannot be empty.".to_string(),
        )),
        Err(CreateError::AlreadyExists) => Err((
            StatusCode::CONFLICT,
            format!("Game {id} already exists."),
        )),
    }
}

/// Turn, lifecycle state and status message of a match
pub async fn get_status(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<GameParams>,
) -> Result<Json<StatusView>, (StatusCode, String)> {
    let shared = state
        .get(&params.game_id)
        .ok_or((StatusCode::NOT_FOUND, NOT_FOUND.to_string()))?;
    let game = lock_game(&shared);

    Ok(Json(StatusView {
        turn: game.turn(),
        state: game.state(),
        message: game.status().to_string(),
        main_move_pending: game.main_move_pending(),
        winner: game.winner(),
    }))
}

/// Every placed piece of a match
pub async fn get_board(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<GameParams>,
) -> Result<Json<Vec<PieceView>>, (StatusCode, String)> {
    let shared = state
        .get(&params.game_id)
        .ok_or((StatusCode::NOT_FOUND, NOT_FOUND.to_string()))?;
    let game = lock_game(&shared);

    let pieces = game
        .placed_pieces()
        .into_iter()
        .map(|placed| PieceView {
            piece: placed.kind().name(),
            color: placed.color().name(),
            q: placed.hex.q,
            r: placed.hex.r,
        })
        .collect();
    Ok(Json(pieces))
}

/// Submit one move. Swaps count as accepted even though the turn stays.
pub async fn submit_move(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<MoveParams>,
) -> Result<Json<MoveAccepted>, (StatusCode, Json<MoveRejected>)> {
    let shared = state.get(&params.game_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(MoveRejected {
                success: false,
                message: NOT_FOUND.to_string(),
            }),
        )
    })?;

    // Held for the whole submission
    let mut game = lock_game(&shared);
    let from = hex_param(params.q1, params.r1);
    let to = hex_param(params.q2, params.r2);

    match game.submit_move(from, to) {
        Ok(advance) => {
            debug!(game_id = %params.game_id, ?advance, "move applied");
            Ok(Json(MoveAccepted {
                success: true,
                new_turn: game.turn(),
                message: game.status().to_string(),
            }))
        }
        Err(_) => Err((
            StatusCode::BAD_REQUEST,
            Json(MoveRejected {
                success: false,
                message: game.status().to_string(),
            }),
        )),
    }
}
