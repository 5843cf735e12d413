use super::World;
use hecs::Entity;
use hinterland_data::{Ai, Group, Health, Position, Sight};

impl World {
    /// Every entity with an `Ai`, in ascending id order.
    #[must_use]
    pub fn ai_entities(&self) -> Vec<Entity> {
        let mut ids: Vec<Entity> = self.ecs.query::<&Ai>().iter().map(|(id, _)| id).collect();
        ids.sort_unstable_by_key(|id| id.to_bits());
        ids
    }

    /// Living members of `group`, in ascending id order.
    #[must_use]
    pub fn group_members(&self, group: Group) -> Vec<Entity> {
        let mut ids: Vec<Entity> = self
            .ecs
            .query::<&Group>()
            .iter()
            .filter(|(_, g)| **g == group)
            .map(|(id, _)| id)
            .collect();
        ids.sort_unstable_by_key(|id| id.to_bits());
        ids
    }

    /// Floored mean position of `group`'s members.
    #[must_use]
    pub fn group_centroid(&self, group: Group) -> Option<Position> {
        let positions: Vec<Position> = self
            .group_members(group)
            .into_iter()
            .filter_map(|id| self.position(id))
            .collect();
        mean_position(&positions)
    }

    /// Creatures (trees included) the actor can currently see, nearest
    /// cells first by packed key. The actor itself is left out.
    #[must_use]
    pub fn visible_creatures(&self, actor: Entity) -> Vec<Entity> {
        let (Some(pos), Some(sight)) = (self.position(actor), self.component::<Sight>(actor)) else {
            return Vec::new();
        };
        let cells = self.visible_cells(pos.x, pos.y, sight.0);
        self.creatures
            .entities(&cells)
            .into_iter()
            .filter(|&id| id != actor)
            .collect()
    }

    /// Corpses and stones in the actor's field of view.
    #[must_use]
    pub fn visible_items(&self, actor: Entity) -> Vec<Entity> {
        let (Some(pos), Some(sight)) = (self.position(actor), self.component::<Sight>(actor)) else {
            return Vec::new();
        };
        let cells = self.visible_cells(pos.x, pos.y, sight.0);
        self.items.entities(&cells)
    }

    /// Number of living creatures, trees excluded.
    #[must_use]
    pub fn creature_count(&self) -> usize {
        self.ecs
            .query::<&Health>()
            .without::<&hinterland_data::Tree>()
            .iter()
            .count()
    }
}

/// Component-wise floored mean; `None` for no positions.
#[must_use]
pub fn mean_position(positions: &[Position]) -> Option<Position> {
    if positions.is_empty() {
        return None;
    }
    let n = positions.len() as i64;
    let (sx, sy) = positions.iter().fold((0i64, 0i64), |(sx, sy), p| {
        (sx + i64::from(p.x), sy + i64::from(p.y))
    });
    Some(Position::new(
        sx.div_euclid(n) as i32,
        sy.div_euclid(n) as i32,
    ))
}
