use serde::{Deserialize, Serialize};

/// Integer grid coordinate.
///
/// Every spatial structure keys its cells by [`Coord::key`], the packed
/// 64-bit form produced by [`pack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// Grid location of an entity. Stored as an ECS component.
pub type Position = Coord;

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Packed 64-bit key of this coordinate.
    #[inline]
    #[must_use]
    pub const fn key(self) -> i64 {
        pack(self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn from_key(key: i64) -> Self {
        let (x, y) = unpack(key);
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }

    #[must_use]
    pub fn chebyshev(self, other: Coord) -> i32 {
        distance_chebyshev(self.x, self.y, other.x, other.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Packs `(x, y)` into one key: `y` in the high 32 bits, `x` in the low 32.
#[inline]
#[must_use]
pub const fn pack(x: i32, y: i32) -> i64 {
    ((y as i64) << 32) | (x as u32 as i64)
}

/// Inverse of [`pack`]. Both halves are sign-extended.
#[inline]
#[must_use]
pub const fn unpack(key: i64) -> (i32, i32) {
    (key as i32, (key >> 32) as i32)
}

/// `max(|dx|, |dy|)`: the number of 8-directional steps between two cells.
#[inline]
#[must_use]
pub fn distance_chebyshev(x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
    clamp_u32(x2.abs_diff(x1).max(y2.abs_diff(y1)))
}

/// Manhattan distance.
#[inline]
#[must_use]
pub fn distance_block(x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
    clamp_u32(x2.abs_diff(x1).saturating_add(y2.abs_diff(y1)))
}

#[inline]
fn clamp_u32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Euclidean distance, for radius comparisons where exactness is not needed.
#[inline]
#[must_use]
pub fn distance_pseudo_euclidean(x1: i32, y1: i32, x2: i32, y2: i32) -> f32 {
    let dx = x2.abs_diff(x1) as f32;
    let dy = y2.abs_diff(y1) as f32;
    (dx * dx + dy * dy).sqrt()
}
