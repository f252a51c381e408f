//! Board geometry endpoint

use axum::Json;
use hexc_core::hex::{all_hexes, BOARD_RADIUS, DIRECTIONS, PORTAL};
use serde::Serialize;

#[derive(Serialize)]
pub struct BoardInfo {
    pub radius: i8,
    pub hexes: Vec<[i8; 2]>,
    pub portal: [i8; 2],
    pub directions: Vec<[i8; 2]>,
    pub direction_names: Vec<&'static str>,
}

/// Get board geometry
pub async fn get_board() -> Json<BoardInfo> {
    Json(BoardInfo {
        radius: BOARD_RADIUS,
        hexes: all_hexes().into_iter().map(|hex| [hex.q, hex.r]).collect(),
        portal: [PORTAL.q, PORTAL.r],
        directions: DIRECTIONS.iter().map(|&(dq, dr)| [dq, dr]).collect(),
        direction_names: vec!["N", "NE", "SE", "S", "SW", "NW"],
    })
}
