//! Hex board geometry with axial coordinates

use serde::{Deserialize, Serialize};

/// Board radius (distance from the Portal to the edge)
pub const BOARD_RADIUS: i8 = 5;

/// The central cell
pub const PORTAL: Hex = Hex::new(0, 0);

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Check if this hex is on the board
    pub const fn is_valid(&self) -> bool {
        self.q.abs() <= BOARD_RADIUS
            && self.r.abs() <= BOARD_RADIUS
            && (self.q + self.r).abs() <= BOARD_RADIUS
    }

    pub fn is_portal(&self) -> bool {
        *self == PORTAL
    }

    /// Hex shifted by (dq, dr). Saturates instead of overflowing so that
    /// far-off offsets simply land off the board.
    pub fn offset(&self, dq: i8, dr: i8) -> Hex {
        Hex::new(self.q.saturating_add(dq), self.r.saturating_add(dr))
    }

    /// Hex `steps` cells away along (dq, dr)
    pub fn step(&self, (dq, dr): (i8, i8), steps: i8) -> Hex {
        self.offset(dq.saturating_mul(steps), dr.saturating_mul(steps))
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> i8 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = ((self.q + self.r) - (other.q + other.r)).abs();
        (dq + dr + ds) / 2
    }

    /// Distance from the Portal
    pub fn distance_to_center(&self) -> i8 {
        self.distance_to(PORTAL)
    }

    /// The six adjacent cells (some may be off the board)
    pub fn neighbors(&self) -> impl Iterator<Item = Hex> + '_ {
        DIRECTIONS.iter().map(move |&(dq, dr)| self.offset(dq, dr))
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

/// Direction vectors in axial coordinates (dq, dr)
/// Index: 0=N, 1=NE, 2=SE, 3=S, 4=SW, 5=NW
pub const DIRECTIONS: [(i8, i8); 6] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // NW
];

/// Two-step diagonals. Each is the sum of two neighbouring unit vectors,
/// and those two unit vectors point at the diagonal's gate cells.
pub const DIAGONALS: [(i8, i8); 6] = [
    (1, 1),
    (2, -1),
    (1, -2),
    (-1, -1),
    (-2, 1),
    (-1, 2),
];

/// Gate offsets per diagonal, relative to the cell the step starts from
pub const DIAGONAL_GATES: [[(i8, i8); 2]; 6] = [
    [(1, 0), (0, 1)],
    [(1, 0), (1, -1)],
    [(1, -1), (0, -1)],
    [(-1, 0), (0, -1)],
    [(-1, 0), (-1, 1)],
    [(-1, 1), (0, 1)],
];

/// Every cell of the board, row by row (r ascending, then q ascending)
pub fn all_hexes() -> Vec<Hex> {
    let mut hexes = Vec::new();
    for r in -BOARD_RADIUS..=BOARD_RADIUS {
        for q in -BOARD_RADIUS..=BOARD_RADIUS {
            let hex = Hex::new(q, r);
            if hex.is_valid() {
                hexes.push(hex);
            }
        }
    }
    hexes
}
