//! Sparse maps from grid cells to the entities standing in them.
//!
//! Both grids key cells by [`pack`]ed coordinates and keep a reverse index,
//! so an entity is in at most one cell of a grid at a time.

use hecs::Entity;
use hinterland_data::pack;
use std::collections::{HashMap, HashSet};

/// At most one entity per cell. Used for creatures.
#[derive(Debug, Default, Clone)]
pub struct SingleGrid {
    cells: HashMap<i64, Entity>,
    index: HashMap<Entity, i64>,
}

impl SingleGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Entity> {
        self.cells.get(&pack(x, y)).copied()
    }

    /// Puts `id` at `(x, y)`, replacing any previous occupant of the cell.
    /// If `id` was placed elsewhere it leaves its old cell.
    pub fn set(&mut self, x: i32, y: i32, id: Entity) {
        let key = pack(x, y);
        if let Some(old_key) = self.index.insert(id, key) {
            if old_key != key {
                self.cells.remove(&old_key);
            }
        }
        if let Some(evicted) = self.cells.insert(key, id) {
            if evicted != id {
                self.index.remove(&evicted);
            }
        }
    }

    pub fn remove(&mut self, x: i32, y: i32) -> Option<Entity> {
        let id = self.cells.remove(&pack(x, y))?;
        self.index.remove(&id);
        Some(id)
    }

    /// Takes `id` out of whatever cell holds it. Returns that cell's key.
    pub fn remove_entity(&mut self, id: Entity) -> Option<i64> {
        let key = self.index.remove(&id)?;
        self.cells.remove(&key);
        Some(key)
    }

    /// Packed key of the cell holding `id`.
    #[must_use]
    pub fn position_of(&self, id: Entity) -> Option<i64> {
        self.index.get(&id).copied()
    }

    #[must_use]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        !self.cells.contains_key(&pack(x, y))
    }

    /// Occupants of `cells`, ordered by packed key.
    #[must_use]
    pub fn entities(&self, cells: &HashSet<i64>) -> Vec<Entity> {
        let mut found: Vec<(i64, Entity)> = cells
            .iter()
            .filter_map(|key| self.cells.get(key).map(|&id| (*key, id)))
            .collect();
        found.sort_unstable_by_key(|&(key, _)| key);
        found.into_iter().map(|(_, id)| id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
    }
}

/// Any number of entities per cell, in insertion order. Used for items.
#[derive(Debug, Default, Clone)]
pub struct MultipleGrid {
    cells: HashMap<i64, Vec<Entity>>,
    index: HashMap<Entity, i64>,
}

impl MultipleGrid {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `id` to `(x, y)`, taking it out of any other cell first.
    pub fn add(&mut self, x: i32, y: i32, id: Entity) {
        self.remove_entity(id);
        let key = pack(x, y);
        self.cells.entry(key).or_default().push(id);
        self.index.insert(id, key);
    }

    /// The most recently added entity at `(x, y)`.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Entity> {
        self.cells.get(&pack(x, y)).and_then(|ids| ids.last().copied())
    }

    #[must_use]
    pub fn all(&self, x: i32, y: i32) -> &[Entity] {
        self.cells.get(&pack(x, y)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes `id` from `(x, y)`. Returns whether it was there.
    pub fn remove(&mut self, x: i32, y: i32, id: Entity) -> bool {
        let key = pack(x, y);
        if self.index.get(&id) != Some(&key) {
            return false;
        }
        self.remove_entity(id).is_some()
    }

    pub fn remove_entity(&mut self, id: Entity) -> Option<i64> {
        let key = self.index.remove(&id)?;
        if let Some(ids) = self.cells.get_mut(&key) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.cells.remove(&key);
            }
        }
        Some(key)
    }

    #[must_use]
    pub fn position_of(&self, id: Entity) -> Option<i64> {
        self.index.get(&id).copied()
    }

    #[must_use]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        !self.cells.contains_key(&pack(x, y))
    }

    /// All entities in `cells`, cell by cell in packed-key order.
    #[must_use]
    pub fn entities(&self, cells: &HashSet<i64>) -> Vec<Entity> {
        let mut keys: Vec<i64> = cells
            .iter()
            .copied()
            .filter(|key| self.cells.contains_key(key))
            .collect();
        keys.sort_unstable();
        keys.iter()
            .filter_map(|key| self.cells.get(key))
            .flatten()
            .copied()
            .collect()
    }

    /// Number of entities across all cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Entity> {
        let mut world = hecs::World::new();
        (0..n).map(|_| world.spawn(())).collect()
    }

    #[test]
    fn test_single_set_get_remove() {
        let e = ids(1);
        let mut grid = SingleGrid::new();
        assert!(grid.is_empty(3, 4));
        grid.set(3, 4, e[0]);
        assert_eq!(grid.get(3, 4), Some(e[0]));
        assert_eq!(grid.remove(3, 4), Some(e[0]));
        assert!(grid.is_empty(3, 4));
        assert_eq!(grid.len(), 0);
        assert_eq!(grid.remove(3, 4), None);
    }

    #[test]
    fn test_single_set_relocates() {
        let e = ids(1);
        let mut grid = SingleGrid::new();
        grid.set(1, 1, e[0]);
        grid.set(2, 1, e[0]);
        assert!(grid.is_empty(1, 1));
        assert_eq!(grid.get(2, 1), Some(e[0]));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.position_of(e[0]), Some(pack(2, 1)));
    }

    #[test]
    fn test_single_overwrite_evicts() {
        let e = ids(2);
        let mut grid = SingleGrid::new();
        grid.set(0, 0, e[0]);
        grid.set(0, 0, e[1]);
        assert_eq!(grid.get(0, 0), Some(e[1]));
        assert_eq!(grid.position_of(e[0]), None);
        assert_eq!(grid.remove_entity(e[0]), None);
    }

    #[test]
    fn test_single_entities_in_key_order() {
        let e = ids(3);
        let mut grid = SingleGrid::new();
        grid.set(5, 2, e[0]);
        grid.set(1, 0, e[1]);
        grid.set(9, 9, e[2]);
        let cells: HashSet<i64> = [pack(5, 2), pack(1, 0), pack(4, 4)].into_iter().collect();
        assert_eq!(grid.entities(&cells), vec![e[1], e[0]]);
    }

    #[test]
    fn test_multiple_stacking() {
        let e = ids(3);
        let mut grid = MultipleGrid::new();
        grid.add(2, 2, e[0]);
        grid.add(2, 2, e[1]);
        assert_eq!(grid.get(2, 2), Some(e[1]));
        assert_eq!(grid.all(2, 2), &[e[0], e[1]]);

        assert!(grid.remove(2, 2, e[1]));
        assert_eq!(grid.get(2, 2), Some(e[0]));
        assert!(!grid.remove(3, 3, e[0]));
        assert!(grid.remove(2, 2, e[0]));
        assert!(grid.is_empty(2, 2));
        assert!(grid.all(2, 2).is_empty());

        grid.add(1, 1, e[2]);
        grid.add(4, 1, e[2]);
        assert!(grid.is_empty(1, 1));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_clear() {
        let e = ids(2);
        let mut single = SingleGrid::new();
        let mut multiple = MultipleGrid::new();
        single.set(0, 0, e[0]);
        multiple.add(0, 0, e[1]);
        single.clear();
        multiple.clear();
        assert_eq!(single.len(), 0);
        assert_eq!(multiple.len(), 0);
        assert_eq!(single.position_of(e[0]), None);
    }
}
