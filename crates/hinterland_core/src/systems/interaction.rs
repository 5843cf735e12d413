//! What happens when a creature bumps into a cell: a step into free space,
//! or an interaction with whatever stands there.
//!
//! Every handler returns the simulated seconds the action took; `0.0` means
//! nothing happened.

use crate::config::ActionConfig;
use crate::events::WorldEvent;
use crate::terrain::CellLogic;
use crate::visibility::Board;
use crate::world::World;
use hecs::Entity;
use hinterland_data::{
    Agility, Crushable, Group, Health, Player, Side, Speed, Strength, Tree, Underwater,
};

/// Handles a bump into an empty cell.
pub trait MoveHandler {
    fn step(&self, world: &mut World, actor: Entity, side: Side) -> f32;
}

/// Handles a bump into an occupied cell.
pub trait Interaction {
    fn name(&self) -> &'static str;
    fn applies(&self, world: &World, actor: Entity, target: Entity) -> bool;
    fn perform(&self, world: &mut World, actor: Entity, target: Entity) -> f32;
}

/// Walking and swimming.
#[derive(Debug, Clone)]
pub struct Movement {
    pub base_cost: f32,
}

impl Movement {
    #[must_use]
    pub fn new(actions: &ActionConfig) -> Self {
        Self {
            base_cost: actions.base_move_cost,
        }
    }
}

impl MoveHandler for Movement {
    fn step(&self, world: &mut World, actor: Entity, side: Side) -> f32 {
        let Some(from) = world.position(actor) else {
            return 0.0;
        };
        let to = from.offset(side.dx(), side.dy());
        if world.board().is_obstacle(to.x, to.y) {
            return 0.0;
        }
        let here = world.terrain.get(from.x, from.y);
        let there = world.terrain.get(to.x, to.y);
        // Fish stay in the water once they are in it.
        if world.has::<Underwater>(actor) && here.is_water() && !there.is_water() {
            return 0.0;
        }
        let speed = world.component::<Speed>(actor).map_or(1.0, |s| s.0);
        if speed <= 0.0 || !world.relocate(actor, to) {
            return 0.0;
        }
        self.base_cost * there.movement_modifier() / speed
    }
}

/// The player cutting down trees.
#[derive(Debug, Clone)]
pub struct Harvest {
    pub cost: f32,
}

impl Harvest {
    #[must_use]
    pub fn new(actions: &ActionConfig) -> Self {
        Self {
            cost: actions.harvest_cost,
        }
    }
}

impl Interaction for Harvest {
    fn name(&self) -> &'static str {
        "harvest"
    }

    fn applies(&self, world: &World, actor: Entity, target: Entity) -> bool {
        world.has::<Player>(actor) && world.has::<Tree>(target)
    }

    fn perform(&self, world: &mut World, actor: Entity, target: Entity) -> f32 {
        let strength = world.component::<Strength>(actor).map_or(1.0, |s| s.0);
        let felled = match world.ecs.get::<&mut Health>(target) {
            Ok(mut health) => {
                health.value -= strength;
                health.is_dead()
            }
            Err(_) => return 0.0,
        };
        if felled {
            let at = world.position(target);
            world.despawn(target);
            if let Some(at) = at {
                world.emit(WorldEvent::Felled { by: actor, at });
            }
        }
        self.cost
    }
}

/// Melee against anything with health that is not a tree or a packmate.
#[derive(Debug, Clone)]
pub struct Attack {
    pub base_cost: f32,
}

impl Attack {
    #[must_use]
    pub fn new(actions: &ActionConfig) -> Self {
        Self {
            base_cost: actions.base_attack_cost,
        }
    }
}

impl Interaction for Attack {
    fn name(&self) -> &'static str {
        "attack"
    }

    fn applies(&self, world: &World, actor: Entity, target: Entity) -> bool {
        if actor == target || !world.has::<Health>(target) || world.has::<Tree>(target) {
            return false;
        }
        match (
            world.component::<Group>(actor),
            world.component::<Group>(target),
        ) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        }
    }

    fn perform(&self, world: &mut World, actor: Entity, target: Entity) -> f32 {
        let strength = world.component::<Strength>(actor).map_or(1.0, |s| s.0);
        let agility = world.component::<Agility>(actor).map_or(1.0, |a| a.0);
        if deal_damage(world, actor, target, strength).is_none() {
            return 0.0;
        }
        self.base_cost / agility.max(f32::EPSILON)
    }
}

/// The player smashing boulders into throwable stones.
#[derive(Debug, Clone)]
pub struct Crush {
    pub cost: f32,
    pub stones: u32,
}

impl Crush {
    #[must_use]
    pub fn new(actions: &ActionConfig) -> Self {
        Self {
            cost: actions.crush_cost,
            stones: actions.stones_per_boulder,
        }
    }
}

impl Interaction for Crush {
    fn name(&self) -> &'static str {
        "crush"
    }

    fn applies(&self, world: &World, actor: Entity, target: Entity) -> bool {
        world.has::<Player>(actor) && world.has::<Crushable>(target)
    }

    fn perform(&self, world: &mut World, actor: Entity, target: Entity) -> f32 {
        let Some(at) = world.position(target) else {
            return 0.0;
        };
        world.despawn(target);
        for _ in 0..self.stones {
            world.spawn_stone(at);
        }
        world.emit(WorldEvent::Crushed {
            by: actor,
            at,
            stones: self.stones,
        });
        self.cost
    }
}

/// Takes `amount` health from `target` and reports the hit.
///
/// A target brought to zero leaves the creature grid and a corpse drops
/// in its cell. Returns the remaining health, or `None` when the target
/// has no health at all.
pub(crate) fn deal_damage(world: &mut World, actor: Entity, target: Entity, amount: f32) -> Option<f32> {
    let (remaining, max) = {
        let mut health = world.ecs.get::<&mut Health>(target).ok()?;
        health.value -= amount;
        (health.value, health.max)
    };

    let victim_name = world.name(target);
    world.emit(WorldEvent::Damage {
        attacker: actor,
        victim: target,
        victim_name: victim_name.clone(),
        amount,
        remaining,
    });

    if remaining <= 0.0 {
        match world.position(target) {
            Some(at) => {
                world.despawn(target);
                world.spawn_corpse(at, &victim_name, max);
                world.emit(WorldEvent::Death {
                    entity: target,
                    name: victim_name,
                    at,
                });
            }
            None => world.despawn(target),
        }
    }
    Some(remaining)
}
