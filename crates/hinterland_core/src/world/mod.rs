//! World state: terrain, the two occupancy grids and the entity arena.
//!
//! Every creature, tree and boulder lives in [`World::creatures`]; corpses
//! and stones lie in [`World::items`]. An entity's `Position` component always mirrors the
//! grid cell holding it.

use crate::config::AppConfig;
use crate::error::{Result, WorldError};
use crate::events::WorldEvent;
use crate::occupancy::{MultipleGrid, SingleGrid};
use crate::pathfinding;
use crate::terrain::TerrainGrid;
use crate::visibility::{self, Board};
use hecs::{Component, Entity};
use hinterland_data::{
    ActionDelay, Agility, Ai, Ammo, Carnivore, Corpse, CreatureTemplate, Crushable, Diet, Group, Health, Herbivore,
    Name, Obstacle, Player, Position, Sight, Speed, Strength, Tree, Underwater,
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

mod init;
mod state;

pub use init::{default_templates, DemoTemplates};
pub use state::mean_position;

/// Health of a freshly grown tree.
pub const TREE_HEALTH: f32 = 10.0;

pub struct World {
    pub config: AppConfig,
    pub terrain: TerrainGrid,
    /// One creature, tree or boulder per cell.
    pub creatures: SingleGrid,
    /// Corpses and stones, stacked.
    pub items: MultipleGrid,
    pub ecs: hecs::World,
    pub rng: ChaCha8Rng,
    pub tick: u64,
    events: Vec<WorldEvent>,
    next_group: u32,
}

/// Terrain plus creatures carrying [`Obstacle`], as one obstacle predicate.
pub struct BlockingView<'a> {
    terrain: &'a TerrainGrid,
    creatures: &'a SingleGrid,
    ecs: &'a hecs::World,
}

impl Board for BlockingView<'_> {
    fn contains(&self, x: i32, y: i32) -> bool {
        self.terrain.contains(x, y)
    }

    fn is_obstacle(&self, x: i32, y: i32) -> bool {
        self.terrain.is_obstacle(x, y)
            || self.creatures.get(x, y).map_or(false, |id| {
                self.ecs
                    .entity(id)
                    .map_or(false, |entity| entity.has::<Obstacle>())
            })
    }
}

impl World {
    fn validate_template(template: &CreatureTemplate) -> Result<()> {
        let fail = |reason: &str| Err(WorldError::template(template.name.clone(), reason));
        if template.name.trim().is_empty() {
            return fail("name must not be empty");
        }
        if template.sight < 0 {
            return fail("sight must not be negative");
        }
        if !(template.speed > 0.0) {
            return fail("speed must be positive");
        }
        if !(template.agility > 0.0) {
            return fail("agility must be positive");
        }
        if !(template.health > 0.0) {
            return fail("health must be positive");
        }
        if !(template.strength >= 0.0) {
            return fail("strength must not be negative");
        }
        Ok(())
    }

    fn check_free(&self, pos: Position) -> Result<()> {
        let reason = if !self.terrain.contains(pos.x, pos.y) {
            "outside the map"
        } else if self.terrain.is_obstacle(pos.x, pos.y) {
            "blocked terrain"
        } else if !self.creatures.is_empty(pos.x, pos.y) {
            "occupied"
        } else {
            return Ok(());
        };
        Err(WorldError::CellUnavailable {
            x: pos.x,
            y: pos.y,
            reason,
        })
    }

    /// Turns a creature record into an entity standing at `pos`.
    ///
    /// AI creatures start with a random delay of up to
    /// `ai.initial_delay_jitter` seconds so they do not all act on one tick.
    pub fn spawn_creature(&mut self, template: &CreatureTemplate, pos: Position) -> Result<Entity> {
        Self::validate_template(template)?;
        self.check_free(pos)?;

        let mut builder = hecs::EntityBuilder::new();
        builder
            .add(Name(template.name.clone()))
            .add(pos)
            .add(Sight(template.sight))
            .add(Speed(template.speed))
            .add(Strength(template.strength))
            .add(Agility(template.agility))
            .add(Health::new(template.health));

        match template.diet {
            Diet::Herbivore => {
                builder.add(Herbivore);
            }
            Diet::Carnivore => {
                builder.add(Carnivore);
            }
            Diet::Omnivore => {
                builder.add(Herbivore).add(Carnivore);
            }
        }
        if template.underwater {
            builder.add(Underwater);
        }

        let delay = if template.behaviours.is_empty() {
            0.0
        } else {
            builder.add(Ai::new(template.behaviours.clone()));
            let jitter = self.config.ai.initial_delay_jitter;
            if jitter > 0.0 {
                self.rng.gen_range(0.0..jitter)
            } else {
                0.0
            }
        };
        builder.add(ActionDelay(delay));

        let id = self.ecs.spawn(builder.build());
        self.creatures.set(pos.x, pos.y, id);
        tracing::debug!(name = %template.name, x = pos.x, y = pos.y, "Spawned creature");
        Ok(id)
    }

    /// Spawns the externally controlled creature. It never gets an `Ai`.
    pub fn spawn_player(&mut self, template: &CreatureTemplate, pos: Position) -> Result<Entity> {
        let mut template = template.clone();
        template.behaviours.clear();
        let id = self.spawn_creature(&template, pos)?;
        self.ecs
            .insert_one(id, Player)
            .map_err(|_| WorldError::NoSuchEntity(id))?;
        Ok(id)
    }

    /// Grows a tree at `(x, y)` and flags the cell as obstructed.
    pub fn spawn_tree(&mut self, x: i32, y: i32) -> Result<Entity> {
        let pos = Position::new(x, y);
        self.check_free(pos)?;
        let id = self.ecs.spawn((
            Name("tree".to_string()),
            pos,
            Tree,
            Obstacle,
            Health::new(TREE_HEALTH),
        ));
        self.creatures.set(x, y, id);
        self.terrain.set_obstructed(x, y, true);
        Ok(id)
    }

    /// Rolls a boulder onto `(x, y)`. It blocks the cell like a tree.
    pub fn spawn_boulder(&mut self, x: i32, y: i32) -> Result<Entity> {
        let pos = Position::new(x, y);
        self.check_free(pos)?;
        let id = self
            .ecs
            .spawn((Name("boulder".to_string()), pos, Crushable, Obstacle));
        self.creatures.set(x, y, id);
        self.terrain.set_obstructed(x, y, true);
        Ok(id)
    }

    /// Drops a throwable stone at `at` in the item grid.
    pub fn spawn_stone(&mut self, at: Position) -> Entity {
        let damage = self.config.actions.stone_damage;
        let id = self
            .ecs
            .spawn((Name("stone".to_string()), at, Ammo { damage }));
        self.items.add(at.x, at.y, id);
        id
    }

    /// Drops remains named after `name` at `at` in the item grid.
    pub fn spawn_corpse(&mut self, at: Position, name: &str, nutrition: f32) -> Entity {
        let id = self.ecs.spawn((
            Name(format!("{name} corpse")),
            at,
            Corpse { nutrition },
        ));
        self.items.add(at.x, at.y, id);
        id
    }

    /// Puts an existing entity at `pos` in the creature grid.
    pub fn place(&mut self, id: Entity, pos: Position) -> Result<()> {
        if !self.ecs.contains(id) {
            return Err(WorldError::NoSuchEntity(id));
        }
        if self.creatures.get(pos.x, pos.y) != Some(id) {
            self.check_free(pos)?;
        }
        self.creatures.set(pos.x, pos.y, id);
        self.ecs
            .insert_one(id, pos)
            .map_err(|_| WorldError::NoSuchEntity(id))
    }

    /// Moves a placed entity to `to`: remove from the old cell, then set.
    /// Returns `false` if the entity is gone or `to` is taken.
    pub fn relocate(&mut self, id: Entity, to: Position) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        if from == to {
            return true;
        }
        if !self.creatures.is_empty(to.x, to.y) {
            return false;
        }
        self.creatures.remove_entity(id);
        self.creatures.set(to.x, to.y, id);
        if let Ok(mut pos) = self.ecs.get::<&mut Position>(id) {
            *pos = to;
        }
        true
    }

    /// Removes an entity from the arena and from every grid. Felled
    /// obstacles free their cell.
    pub fn despawn(&mut self, id: Entity) {
        if self.has::<Obstacle>(id) {
            if let Some(at) = self.position(id) {
                self.terrain.set_obstructed(at.x, at.y, false);
            }
        }
        self.creatures.remove_entity(id);
        self.items.remove_entity(id);
        if self.ecs.despawn(id).is_err() {
            tracing::trace!(?id, "Despawn of missing entity");
        }
    }

    #[must_use]
    pub fn position(&self, id: Entity) -> Option<Position> {
        self.component::<Position>(id)
    }

    /// Copy of a component, if the entity has it.
    #[must_use]
    pub fn component<T: Component + Copy>(&self, id: Entity) -> Option<T> {
        self.ecs.get::<&T>(id).ok().map(|c| *c)
    }

    #[must_use]
    pub fn has<T: Component>(&self, id: Entity) -> bool {
        self.ecs.entity(id).map_or(false, |entity| entity.has::<T>())
    }

    #[must_use]
    pub fn name(&self, id: Entity) -> String {
        self.ecs
            .get::<&Name>(id)
            .map_or_else(|_| "something".to_string(), |n| n.0.clone())
    }

    #[must_use]
    pub fn is_alive(&self, id: Entity) -> bool {
        self.ecs.contains(id)
    }

    #[must_use]
    pub fn board(&self) -> BlockingView<'_> {
        BlockingView {
            terrain: &self.terrain,
            creatures: &self.creatures,
            ecs: &self.ecs,
        }
    }

    #[must_use]
    pub fn visible_cells(&self, x: i32, y: i32, radius: i32) -> HashSet<i64> {
        visibility::visible_cells(&self.board(), x, y, radius)
    }

    #[must_use]
    pub fn line_of_sight(&self, from: Position, to: Position) -> Option<Vec<Position>> {
        visibility::line_of_sight(&self.board(), from.x, from.y, to.x, to.y)
    }

    #[must_use]
    pub fn find_path(&self, from: Position, to: Position, max_radius: i32) -> Option<Vec<Position>> {
        pathfinding::find_path(&self.board(), from, to, max_radius)
    }

    /// A fresh herd or pack id.
    pub fn create_group(&mut self) -> Group {
        self.next_group += 1;
        Group(self.next_group)
    }

    pub fn join_group(&mut self, id: Entity, group: Group) -> Result<()> {
        self.ecs
            .insert_one(id, group)
            .map_err(|_| WorldError::NoSuchEntity(id))
    }

    pub fn emit(&mut self, event: WorldEvent) {
        tracing::debug!(event = %event.format(), "World event");
        self.events.push(event);
    }

    /// Takes every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// The controlled creature, if one was spawned and is alive.
    #[must_use]
    pub fn player(&self) -> Option<Entity> {
        self.ecs
            .query::<&Player>()
            .iter()
            .map(|(id, _)| id)
            .min_by_key(|id| id.to_bits())
    }

    #[must_use]
    pub fn is_tree(&self, id: Entity) -> bool {
        self.has::<Tree>(id)
    }

    #[must_use]
    pub fn is_underwater(&self, id: Entity) -> bool {
        self.has::<Underwater>(id)
    }
}
