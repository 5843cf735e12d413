//! Field of view and line of sight.
//!
//! Field of view is symmetric shadowcasting: a floor cell `B` is visible from
//! `A` exactly when `A` is visible from `B`. Obstacles are revealed but hide
//! what lies behind them.

use hinterland_data::{pack, Coord};
use std::collections::HashSet;

/// What the visibility and path queries need to know about a map.
pub trait Board {
    fn contains(&self, x: i32, y: i32) -> bool;
    /// Must be `true` outside the board.
    fn is_obstacle(&self, x: i32, y: i32) -> bool;
}

/// Exact slope `num / den`, `den > 0`.
#[derive(Debug, Clone, Copy)]
struct Slope {
    num: i64,
    den: i64,
}

impl Slope {
    const fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    /// Slope through the left edge of the cell at `(depth, col)`.
    const fn of(depth: i64, col: i64) -> Self {
        Self::new(2 * col - 1, 2 * depth)
    }

    /// `round(depth * self)` with halves rounded up.
    fn round_up(self, depth: i64) -> i64 {
        (2 * depth * self.num + self.den).div_euclid(2 * self.den)
    }

    /// `round(depth * self)` with halves rounded down.
    fn round_down(self, depth: i64) -> i64 {
        -(self.den - 2 * depth * self.num).div_euclid(2 * self.den)
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i64,
    start: Slope,
    end: Slope,
}

impl Row {
    fn next(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    /// Whether the cell's centre lies inside the row's sector.
    fn is_symmetric(&self, col: i64) -> bool {
        col * self.start.den >= self.depth * self.start.num
            && col * self.end.den <= self.depth * self.end.num
    }
}

#[derive(Debug, Clone, Copy)]
enum Quadrant {
    North,
    East,
    South,
    West,
}

impl Quadrant {
    const ALL: [Quadrant; 4] = [
        Quadrant::North,
        Quadrant::East,
        Quadrant::South,
        Quadrant::West,
    ];

    fn transform(self, ox: i64, oy: i64, depth: i64, col: i64) -> (i64, i64) {
        match self {
            Quadrant::North => (ox + col, oy - depth),
            Quadrant::South => (ox + col, oy + depth),
            Quadrant::East => (ox + depth, oy + col),
            Quadrant::West => (ox - depth, oy + col),
        }
    }
}

fn narrow(x: i64, y: i64) -> Option<(i32, i32)> {
    Some((i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}

/// Packed coordinates of every cell visible from `(x, y)` within `radius`.
///
/// The origin is always included. A cell is within range when
/// `dx² + dy² <= r² + r`. Only cells on the board are returned.
pub fn visible_cells<B: Board + ?Sized>(board: &B, x: i32, y: i32, radius: i32) -> HashSet<i64> {
    let mut visible = HashSet::new();
    visible.insert(pack(x, y));

    let r = i64::from(radius).abs();
    let limit = r * r + r;
    let (ox, oy) = (i64::from(x), i64::from(y));

    let blocked = |cx: i64, cy: i64| narrow(cx, cy).map_or(true, |(cx, cy)| board.is_obstacle(cx, cy));

    for quadrant in Quadrant::ALL {
        let mut rows = vec![Row {
            depth: 1,
            start: Slope::new(-1, 1),
            end: Slope::new(1, 1),
        }];

        while let Some(mut row) = rows.pop() {
            if row.depth > r {
                continue;
            }
            let mut prev_wall: Option<bool> = None;
            let min_col = row.start.round_up(row.depth);
            let max_col = row.end.round_down(row.depth);

            for col in min_col..=max_col {
                let (cx, cy) = quadrant.transform(ox, oy, row.depth, col);
                let wall = blocked(cx, cy);
                let in_range = row.depth * row.depth + col * col <= limit;

                if in_range && (wall || row.is_symmetric(col)) {
                    if let Some((vx, vy)) = narrow(cx, cy) {
                        if board.contains(vx, vy) {
                            visible.insert(pack(vx, vy));
                        }
                    }
                }
                if prev_wall == Some(true) && !wall {
                    row.start = Slope::of(row.depth, col);
                }
                if prev_wall == Some(false) && wall {
                    let mut next = row.next();
                    next.end = Slope::of(row.depth, col);
                    rows.push(next);
                }
                prev_wall = Some(wall);
            }
            if prev_wall == Some(false) {
                rows.push(row.next());
            }
        }
    }
    visible
}

/// Cells of the straight line from `(x1, y1)` to `(x2, y2)`, both included.
fn bresenham(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<Coord> {
    let (mut x, mut y) = (i64::from(x1), i64::from(y1));
    let (tx, ty) = (i64::from(x2), i64::from(y2));
    let dx = (tx - x).abs();
    let dy = -(ty - y).abs();
    let sx = if x < tx { 1 } else { -1 };
    let sy = if y < ty { 1 } else { -1 };
    let mut err = dx + dy;

    let mut line = Vec::with_capacity(dx.max(-dy) as usize + 1);
    loop {
        // Every point lies between the two i32 endpoints.
        line.push(Coord::new(x as i32, y as i32));
        if x == tx && y == ty {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    line
}

fn is_clear<B: Board + ?Sized>(board: &B, line: &[Coord]) -> bool {
    line.len() < 3
        || line[1..line.len() - 1]
            .iter()
            .all(|c| !board.is_obstacle(c.x, c.y))
}

/// Line from `(x1, y1)` to `(x2, y2)` with no obstacle strictly between the
/// endpoints.
///
/// The line traced from the source is tried first, then the one traced back
/// from the target; the returned path always runs source to target. `None`
/// when both are blocked.
pub fn line_of_sight<B: Board + ?Sized>(
    board: &B,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
) -> Option<Vec<Coord>> {
    let forward = bresenham(x1, y1, x2, y2);
    if is_clear(board, &forward) {
        return Some(forward);
    }
    let mut backward = bresenham(x2, y2, x1, y1);
    if is_clear(board, &backward) {
        backward.reverse();
        return Some(backward);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{Cell, TerrainGrid};
    use hinterland_data::unpack;

    fn open(w: i32, h: i32) -> TerrainGrid {
        TerrainGrid::new(w, h).unwrap()
    }

    #[test]
    fn test_origin_always_visible() {
        let grid = open(5, 5);
        let cells = visible_cells(&grid, 2, 2, 0);
        assert_eq!(cells.len(), 1);
        assert!(cells.contains(&pack(2, 2)));
    }

    #[test]
    fn test_open_field_radius() {
        let grid = open(21, 21);
        let cells = visible_cells(&grid, 10, 10, 3);
        for key in &cells {
            let (x, y) = unpack(*key);
            let (dx, dy) = (x - 10, y - 10);
            assert!(dx * dx + dy * dy <= 12);
        }
        assert!(cells.contains(&pack(13, 10)));
        assert!(cells.contains(&pack(12, 12)));
        assert!(!cells.contains(&pack(13, 13)));
        assert!(!cells.contains(&pack(14, 10)));
    }

    #[test]
    fn test_walls_seen_but_opaque() {
        let mut grid = open(11, 11);
        grid.set(6, 5, Cell::Wall);
        let cells = visible_cells(&grid, 5, 5, 5);
        assert!(cells.contains(&pack(6, 5)));
        assert!(!cells.contains(&pack(7, 5)));
        assert!(!cells.contains(&pack(9, 5)));
        assert!(cells.contains(&pack(5, 9)));
    }

    #[test]
    fn test_only_board_cells_returned() {
        let grid = open(5, 5);
        let cells = visible_cells(&grid, 0, 0, 4);
        for key in cells {
            let (x, y) = unpack(key);
            assert!(grid.contains(x, y));
        }
    }

    #[test]
    fn test_symmetry_with_pillars() {
        let mut grid = open(12, 12);
        for &(x, y) in &[(3, 3), (4, 7), (8, 2), (6, 6), (9, 9), (2, 9)] {
            grid.set(x, y, Cell::Wall);
        }
        let floors: Vec<(i32, i32)> = (0..12)
            .flat_map(|y| (0..12).map(move |x| (x, y)))
            .filter(|&(x, y)| !grid.is_obstacle(x, y))
            .collect();
        for &(ax, ay) in &floors {
            let from_a = visible_cells(&grid, ax, ay, 6);
            for &(bx, by) in &floors {
                if from_a.contains(&pack(bx, by)) {
                    let from_b = visible_cells(&grid, bx, by, 6);
                    assert!(
                        from_b.contains(&pack(ax, ay)),
                        "({bx},{by}) sees not ({ax},{ay})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_bresenham_endpoints() {
        let line = bresenham(0, 0, 5, 2);
        assert_eq!(line.first(), Some(&Coord::new(0, 0)));
        assert_eq!(line.last(), Some(&Coord::new(5, 2)));
        assert_eq!(line.len(), 6);
    }

    #[test]
    fn test_line_of_sight_open() {
        let grid = open(10, 10);
        let path = line_of_sight(&grid, 1, 1, 7, 4).unwrap();
        assert_eq!(path[0], Coord::new(1, 1));
        assert_eq!(*path.last().unwrap(), Coord::new(7, 4));
    }

    #[test]
    fn test_line_of_sight_falls_back_to_reverse() {
        let mut grid = open(5, 5);
        // Forward trace from (0,0) to (2,1) passes (1,1); the reverse passes (1,0).
        grid.set(1, 1, Cell::Wall);
        let path = line_of_sight(&grid, 0, 0, 2, 1).unwrap();
        assert_eq!(
            path,
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 1)]
        );

        grid.set(1, 0, Cell::Wall);
        assert!(line_of_sight(&grid, 0, 0, 2, 1).is_none());
    }

    #[test]
    fn test_endpoints_never_block() {
        let mut grid = open(5, 5);
        grid.set(0, 0, Cell::Wall);
        grid.set(3, 0, Cell::Wall);
        assert!(line_of_sight(&grid, 0, 0, 3, 0).is_some());
        assert!(line_of_sight(&grid, 2, 2, 2, 2).is_some());
    }
}
