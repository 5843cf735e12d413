pub use hinterland_data::Cell;
use hinterland_data::{distance_chebyshev, pack, Coord, Side};
use rand::Rng;
use std::collections::HashSet;

use crate::error::{Result, WorldError};
use crate::visibility::Board;

pub mod generation;

/// Rules attached to each terrain type.
pub trait CellLogic {
    /// Blocks movement and sight.
    fn is_obstacle(&self) -> bool;
    /// Multiplier on the time a step onto this cell takes.
    fn movement_modifier(&self) -> f32;
    fn is_water(&self) -> bool;
    /// Herbivores can graze here.
    fn is_grazeable(&self) -> bool;
}

impl CellLogic for Cell {
    fn is_obstacle(&self) -> bool {
        matches!(self, Cell::Wall | Cell::ClosedDoor)
    }

    fn movement_modifier(&self) -> f32 {
        match self {
            Cell::DeepWater => 3.0,
            Cell::Water => 2.0,
            Cell::Sand => 1.2,
            Cell::Grass | Cell::OpenDoor | Cell::Empty => 1.0,
            Cell::HillGrass => 1.3,
            Cell::Hill => 1.5,
            Cell::Mountain => 2.0,
            Cell::HighMountain => 3.0,
            Cell::Wall | Cell::ClosedDoor => 0.0,
        }
    }

    fn is_water(&self) -> bool {
        matches!(self, Cell::Water | Cell::DeepWater)
    }

    fn is_grazeable(&self) -> bool {
        matches!(self, Cell::Grass | Cell::HillGrass)
    }
}

/// Fixed-size map of terrain cells.
///
/// Coordinates outside the grid read as [`Cell::Empty`] and count as
/// obstacles; writes outside it are ignored.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
    /// Cells blocked by something standing on them (trees).
    obstructed: HashSet<i64>,
}

impl TerrainGrid {
    /// A grid filled with [`Cell::Grass`].
    pub fn new(width: i32, height: i32) -> Result<Self> {
        Self::filled(width, height, Cell::Grass)
    }

    pub fn filled(width: i32, height: i32, cell: Cell) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        Ok(Self {
            cells: vec![cell; width as usize * height as usize],
            width,
            height,
            obstructed: HashSet::new(),
        })
    }

    pub(crate) fn from_cells(width: i32, height: i32, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width as usize * height as usize);
        Self {
            cells,
            width,
            height,
            obstructed: HashSet::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Cell {
        if self.contains(x, y) {
            self.cells[self.index(x, y)]
        } else {
            Cell::Empty
        }
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if self.contains(x, y) {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    #[must_use]
    pub fn is_obstacle(&self, x: i32, y: i32) -> bool {
        !self.contains(x, y)
            || self.get(x, y).is_obstacle()
            || self.obstructed.contains(&pack(x, y))
    }

    /// Whether the neighbour of `(x, y)` on `side` is an obstacle.
    #[must_use]
    pub fn is_obstacle_toward(&self, x: i32, y: i32, side: Side) -> bool {
        self.is_obstacle(x.wrapping_add(side.dx()), y.wrapping_add(side.dy()))
    }

    /// Flags or clears a cell as blocked regardless of its terrain type.
    pub fn set_obstructed(&mut self, x: i32, y: i32, obstructed: bool) {
        if !self.contains(x, y) {
            return;
        }
        if obstructed {
            self.obstructed.insert(pack(x, y));
        } else {
            self.obstructed.remove(&pack(x, y));
        }
    }

    #[must_use]
    pub fn is_obstructed(&self, x: i32, y: i32) -> bool {
        self.obstructed.contains(&pack(x, y))
    }

    /// First non-obstacle neighbour scanning N, E, S, W; `Here` if walled in.
    #[must_use]
    pub fn first_free_exit(&self, x: i32, y: i32) -> Side {
        Side::CARDINAL
            .into_iter()
            .find(|&side| !self.is_obstacle_toward(x, y, side))
            .unwrap_or(Side::Here)
    }

    /// A uniformly random direction if it happens to be free, otherwise
    /// [`first_free_exit`](Self::first_free_exit).
    pub fn free_exit_randomised<R: Rng + ?Sized>(&self, x: i32, y: i32, rng: &mut R) -> Side {
        let side = Side::random(rng);
        if self.is_obstacle_toward(x, y, side) {
            self.first_free_exit(x, y)
        } else {
            side
        }
    }

    /// Nearest cell of one of `types`, searching square rings of growing
    /// radius around `(x, y)`.
    ///
    /// Each ring is walked clockwise: the north row eastbound from just past
    /// the north-west corner, the east column southbound, the south row
    /// westbound, then the west column northbound up to and including the
    /// north-west corner. The first match wins, so among equally distant
    /// cells the walk order decides.
    #[must_use]
    pub fn first_of_type(&self, x: i32, y: i32, max_radius: i32, types: &[Cell]) -> Option<Coord> {
        let max_radius = max_radius.saturating_abs();
        for d in 1..=max_radius {
            if let Some(found) = ring(x, y, d).find(|c| {
                self.contains(c.x, c.y) && types.contains(&self.get(c.x, c.y))
            }) {
                return Some(found);
            }
        }
        None
    }

    /// Every in-bounds cell matching `predicate`, in row-major order.
    pub fn cells_where<'a, F>(&'a self, predicate: F) -> impl Iterator<Item = Coord> + 'a
    where
        F: Fn(Cell) -> bool + 'a,
    {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| predicate(**cell))
            .map(move |(idx, _)| Coord::new(idx as i32 % w, idx as i32 / w))
    }

    /// Cells within Chebyshev distance `radius` of `(x, y)` that are in bounds.
    pub fn neighbourhood(&self, x: i32, y: i32, radius: i32) -> impl Iterator<Item = Coord> + '_ {
        let r = radius.saturating_abs();
        (y.saturating_sub(r)..=y.saturating_add(r))
            .flat_map(move |cy| (x.saturating_sub(r)..=x.saturating_add(r)).map(move |cx| Coord::new(cx, cy)))
            .filter(move |c| self.contains(c.x, c.y) && distance_chebyshev(x, y, c.x, c.y) <= r)
    }
}

/// Cells at exactly Chebyshev distance `d` from `(x, y)`, clockwise.
///
/// The walk starts one cell east of the north-west corner and ends on that
/// corner, at the top of the west column.
fn ring(x: i32, y: i32, d: i32) -> impl Iterator<Item = Coord> {
    let north = (x - d + 1..=x + d).map(move |cx| Coord::new(cx, y - d));
    let east = (y - d + 1..y + d).map(move |cy| Coord::new(x + d, cy));
    let south = (x - d + 1..=x + d).rev().map(move |cx| Coord::new(cx, y + d));
    let west = (y - d..=y + d).rev().map(move |cy| Coord::new(x - d, cy));
    north.chain(east).chain(south).chain(west)
}

impl Board for TerrainGrid {
    fn contains(&self, x: i32, y: i32) -> bool {
        TerrainGrid::contains(self, x, y)
    }

    fn is_obstacle(&self, x: i32, y: i32) -> bool {
        TerrainGrid::is_obstacle(self, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            TerrainGrid::new(0, 5),
            Err(WorldError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(TerrainGrid::new(3, -1).is_err());
    }

    #[test]
    fn test_out_of_bounds_reads_and_writes() {
        let mut grid = TerrainGrid::new(4, 4).unwrap();
        assert_eq!(grid.get(-1, 0), Cell::Empty);
        assert_eq!(grid.get(4, 0), Cell::Empty);
        grid.set(10, 10, Cell::Wall);
        assert!(grid.is_obstacle(-1, 2));
        assert!(grid.is_obstacle(2, 4));
        assert!(!grid.is_obstacle(2, 2));
    }

    #[test]
    fn test_walls_doors_and_flags() {
        let mut grid = TerrainGrid::new(4, 4).unwrap();
        grid.set(1, 1, Cell::Wall);
        grid.set(2, 1, Cell::ClosedDoor);
        grid.set(3, 1, Cell::OpenDoor);
        assert!(grid.is_obstacle(1, 1));
        assert!(grid.is_obstacle(2, 1));
        assert!(!grid.is_obstacle(3, 1));

        grid.set_obstructed(0, 0, true);
        assert!(grid.is_obstacle(0, 0));
        assert!(grid.is_obstacle_toward(1, 0, Side::W));
        grid.set_obstructed(0, 0, false);
        assert!(!grid.is_obstacle(0, 0));
    }

    #[test]
    fn test_first_free_exit_order() {
        let mut grid = TerrainGrid::new(3, 3).unwrap();
        assert_eq!(grid.first_free_exit(1, 1), Side::N);
        grid.set(1, 0, Cell::Wall);
        assert_eq!(grid.first_free_exit(1, 1), Side::E);
        grid.set(2, 1, Cell::Wall);
        grid.set(1, 2, Cell::Wall);
        assert_eq!(grid.first_free_exit(1, 1), Side::W);
        grid.set(0, 1, Cell::Wall);
        assert_eq!(grid.first_free_exit(1, 1), Side::Here);
    }

    #[test]
    fn test_corner_exit_skips_outside() {
        let grid = TerrainGrid::new(3, 3).unwrap();
        assert_eq!(grid.first_free_exit(0, 0), Side::E);
    }

    #[test]
    fn test_free_exit_randomised_is_free() {
        let mut grid = TerrainGrid::new(3, 3).unwrap();
        grid.set(1, 0, Cell::Wall);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let side = grid.free_exit_randomised(1, 1, &mut rng);
            assert_ne!(side, Side::Here);
            assert!(!grid.is_obstacle_toward(1, 1, side));
        }
    }

    #[test]
    fn test_ring_walk_order() {
        let cells: Vec<_> = ring(0, 0, 1).map(|c| (c.x, c.y)).collect();
        assert_eq!(
            cells,
            vec![(0, -1), (1, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1)]
        );
        let wide: Vec<_> = ring(0, 0, 2).map(|c| (c.x, c.y)).collect();
        assert_eq!(wide.first(), Some(&(-1, -2)));
        assert_eq!(wide[4..7], [(2, -1), (2, 0), (2, 1)]);
        assert_eq!(wide.last(), Some(&(-2, -2)));
        assert_eq!(ring(5, 5, 3).count(), 24);
    }

    #[test]
    fn test_ring_side_cell_beats_north_west_corner() {
        let mut grid = TerrainGrid::filled(10, 10, Cell::Sand).unwrap();
        grid.set(4, 4, Cell::Water);
        grid.set(6, 5, Cell::Water);
        assert_eq!(
            grid.first_of_type(5, 5, 1, &[Cell::Water]),
            Some(Coord::new(6, 5))
        );

        grid.set(6, 5, Cell::Sand);
        grid.set(4, 5, Cell::Water);
        assert_eq!(
            grid.first_of_type(5, 5, 1, &[Cell::Water]),
            Some(Coord::new(4, 5))
        );
    }

    proptest! {
        #[test]
        fn prop_ring_covers_each_cell_once(x in -50i32..50, y in -50i32..50, d in 1i32..12) {
            let cells: Vec<Coord> = ring(x, y, d).collect();
            prop_assert_eq!(cells.len() as i32, 8 * d);
            let unique: HashSet<Coord> = cells.iter().copied().collect();
            prop_assert_eq!(unique.len(), cells.len());
            for c in &cells {
                prop_assert_eq!(distance_chebyshev(x, y, c.x, c.y), d);
            }
            for pair in cells.windows(2) {
                prop_assert_eq!(pair[0].chebyshev(pair[1]), 1);
            }
        }
    }

    #[test]
    fn test_first_of_type_radius_threshold() {
        let mut grid = TerrainGrid::new(10, 10).unwrap();
        grid.set(7, 5, Cell::Water);
        assert_eq!(grid.first_of_type(4, 5, 2, &[Cell::Water]), None);
        assert_eq!(
            grid.first_of_type(4, 5, 3, &[Cell::Water]),
            Some(Coord::new(7, 5))
        );
        assert_eq!(
            grid.first_of_type(4, 5, -3, &[Cell::Water]),
            Some(Coord::new(7, 5))
        );
    }

    #[test]
    fn test_first_of_type_tie_follows_walk() {
        let mut grid = TerrainGrid::new(10, 10).unwrap();
        grid.set(4, 7, Cell::Sand);
        grid.set(7, 4, Cell::Sand);
        // Both at distance 2; the east column is walked before the south row.
        assert_eq!(grid.first_of_type(5, 5, 1, &[Cell::Sand]), None);
        assert_eq!(
            grid.first_of_type(5, 5, 2, &[Cell::Sand]),
            Some(Coord::new(7, 4))
        );
    }

    #[test]
    fn test_neighbourhood_clips_to_bounds() {
        let grid = TerrainGrid::new(5, 5).unwrap();
        assert_eq!(grid.neighbourhood(0, 0, 1).count(), 4);
        assert_eq!(grid.neighbourhood(2, 2, 1).count(), 9);
    }
}
