//! Stones: picking them up and throwing them along a line of sight.

use super::interaction::deal_damage;
use crate::events::WorldEvent;
use crate::world::World;
use hecs::Entity;
use hinterland_data::{Ammo, Health, Position, Sight, Tree};

/// Throwables an entity carries, last picked up on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory(pub Vec<Entity>);

/// Number of throwables `actor` carries.
#[must_use]
pub fn ammo_count(world: &World, actor: Entity) -> usize {
    world.ecs.get::<&Inventory>(actor).map_or(0, |inv| inv.0.len())
}

/// Picks up the topmost throwable in `actor`'s cell. Returns the cost, or
/// `0.0` if there is nothing to take.
pub fn pick_up(world: &mut World, actor: Entity) -> f32 {
    let Some(at) = world.position(actor) else {
        return 0.0;
    };
    let Some(&stone) = world
        .items
        .all(at.x, at.y)
        .iter()
        .rev()
        .find(|&&id| world.has::<Ammo>(id))
    else {
        return 0.0;
    };

    world.items.remove(at.x, at.y, stone);
    if world.ecs.remove_one::<Position>(stone).is_err() {
        return 0.0;
    }
    let carried = match world.ecs.get::<&mut Inventory>(actor) {
        Ok(mut inv) => {
            inv.0.push(stone);
            true
        }
        Err(_) => false,
    };
    if !carried && world.ecs.insert_one(actor, Inventory(vec![stone])).is_err() {
        return 0.0;
    }
    tracing::debug!(actor = ?actor, stone = ?stone, x = at.x, y = at.y, "Picked up");
    world.config.actions.pick_up_cost
}

/// Throws the top carried stone at `target`.
///
/// The target must be within the thrower's sight and in line of sight. The
/// stone flies along the line and stops at the first creature in its way,
/// or at the target cell. Anything with health it stops on takes the
/// stone's damage, except trees. The stone then lies where it stopped.
/// Returns the cost, or `0.0` if nothing was thrown.
pub fn throw_at(world: &mut World, actor: Entity, target: Position) -> f32 {
    let Some(from) = world.position(actor) else {
        return 0.0;
    };
    let range = world.component::<Sight>(actor).map_or(0, |s| s.0);
    let distance = from.chebyshev(target);
    if distance == 0 || distance > range || ammo_count(world, actor) == 0 {
        return 0.0;
    }
    let Some(line) = world.line_of_sight(from, target) else {
        return 0.0;
    };

    let hit = line
        .iter()
        .skip(1)
        .find_map(|p| world.creatures.get(p.x, p.y).map(|id| (id, *p)));
    let landing = hit.map_or(target, |(_, p)| p);

    let Some(stone) = world
        .ecs
        .get::<&mut Inventory>(actor)
        .ok()
        .and_then(|mut inv| inv.0.pop())
    else {
        return 0.0;
    };
    let damage = world.component::<Ammo>(stone).map_or(0.0, |a| a.damage);
    if world.ecs.insert_one(stone, landing).is_ok() {
        world.items.add(landing.x, landing.y, stone);
    }

    let victim = hit
        .map(|(id, _)| id)
        .filter(|&id| world.has::<Health>(id) && !world.has::<Tree>(id));
    world.emit(WorldEvent::Thrown {
        by: actor,
        at: landing,
        hit: victim,
    });
    if let Some(victim) = victim {
        deal_damage(world, actor, victim, damage);
    }
    world.config.actions.throw_cost
}
