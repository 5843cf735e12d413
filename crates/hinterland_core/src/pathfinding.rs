//! Radius-bounded A* on the 8-connected grid.

use crate::visibility::Board;
use hinterland_data::{Coord, Side};
use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

const STRAIGHT: u32 = 10;
const DIAGONAL: u32 = 14;

/// Octile distance in the same integer units as the step costs.
fn heuristic(a: Coord, b: Coord) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    STRAIGHT
        .saturating_mul(hi)
        .saturating_add((DIAGONAL - STRAIGHT).saturating_mul(lo))
}

struct Node {
    g: u32,
    parent: Option<i64>,
    closed: bool,
}

/// Shortest 8-directional path from `from` to `to`, both included.
///
/// Cells farther than `max_radius` (Chebyshev, from `from`) are never
/// expanded, so a destination beyond it is never found. The start cell may
/// itself be an obstacle; the destination may not.
#[must_use]
pub fn find_path<B: Board + ?Sized>(
    board: &B,
    from: Coord,
    to: Coord,
    max_radius: i32,
) -> Option<Vec<Coord>> {
    if from == to {
        return Some(vec![from]);
    }
    let radius = max_radius.saturating_abs();
    if board.is_obstacle(to.x, to.y) || from.chebyshev(to) > radius {
        return None;
    }

    let mut nodes: HashMap<i64, Node> = HashMap::new();
    let mut open: BinaryHeap<Reverse<(u32, u64, i64)>> = BinaryHeap::new();
    let mut seq: u64 = 0;

    nodes.insert(
        from.key(),
        Node {
            g: 0,
            parent: None,
            closed: false,
        },
    );
    open.push(Reverse((heuristic(from, to), seq, from.key())));

    while let Some(Reverse((_, _, key))) = open.pop() {
        let g = match nodes.get_mut(&key) {
            Some(node) if !node.closed => {
                node.closed = true;
                node.g
            }
            _ => continue,
        };
        if key == to.key() {
            return Some(reconstruct(&nodes, key));
        }
        let current = Coord::from_key(key);

        for side in Side::ALL {
            let next = current.offset(side.dx(), side.dy());
            if from.chebyshev(next) > radius || board.is_obstacle(next.x, next.y) {
                continue;
            }
            let step = if side.dx() != 0 && side.dy() != 0 {
                DIAGONAL
            } else {
                STRAIGHT
            };
            let tentative = g.saturating_add(step);
            let improved = match nodes.entry(next.key()) {
                Entry::Occupied(mut slot) => {
                    let node = slot.get_mut();
                    if node.closed || tentative >= node.g {
                        false
                    } else {
                        node.g = tentative;
                        node.parent = Some(key);
                        true
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(Node {
                        g: tentative,
                        parent: Some(key),
                        closed: false,
                    });
                    true
                }
            };
            if improved {
                seq += 1;
                let f = tentative.saturating_add(heuristic(next, to));
                open.push(Reverse((f, seq, next.key())));
            }
        }
    }
    None
}

fn reconstruct(nodes: &HashMap<i64, Node>, goal: i64) -> Vec<Coord> {
    let mut path = vec![Coord::from_key(goal)];
    let mut cursor = nodes.get(&goal).and_then(|n| n.parent);
    while let Some(key) = cursor {
        path.push(Coord::from_key(key));
        cursor = nodes.get(&key).and_then(|n| n.parent);
    }
    path.reverse();
    path
}
