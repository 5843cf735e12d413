use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the eight compass directions, or `Here` for "no step".
///
/// North is `y - 1`: the grid grows downwards like a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    Here,
}

impl Side {
    /// The eight real directions, clockwise from north.
    pub const ALL: [Side; 8] = [
        Side::N,
        Side::NE,
        Side::E,
        Side::SE,
        Side::S,
        Side::SW,
        Side::W,
        Side::NW,
    ];

    /// Scan order used for exits: N, E, S, W.
    pub const CARDINAL: [Side; 4] = [Side::N, Side::E, Side::S, Side::W];

    #[must_use]
    pub const fn dx(self) -> i32 {
        match self {
            Side::NE | Side::E | Side::SE => 1,
            Side::SW | Side::W | Side::NW => -1,
            Side::N | Side::S | Side::Here => 0,
        }
    }

    #[must_use]
    pub const fn dy(self) -> i32 {
        match self {
            Side::N | Side::NE | Side::NW => -1,
            Side::S | Side::SE | Side::SW => 1,
            Side::E | Side::W | Side::Here => 0,
        }
    }

    /// Direction for a unit offset; any component is reduced to its sign.
    #[must_use]
    pub const fn from_offset(dx: i32, dy: i32) -> Self {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Side::N,
            (1, -1) => Side::NE,
            (1, 0) => Side::E,
            (1, 1) => Side::SE,
            (0, 1) => Side::S,
            (-1, 1) => Side::SW,
            (-1, 0) => Side::W,
            (-1, -1) => Side::NW,
            _ => Side::Here,
        }
    }

    /// The single step that brings `(x1, y1)` closer to `(x2, y2)`.
    #[must_use]
    pub fn between(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::from_offset(x2.saturating_sub(x1), y2.saturating_sub(y1))
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_offset(-self.dx(), -self.dy())
    }

    /// Uniformly random real direction (never `Here`).
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}
