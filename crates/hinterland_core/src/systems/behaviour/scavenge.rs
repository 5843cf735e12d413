use super::{nearest, Evaluation, Intent};
use crate::events::WorldEvent;
use crate::world::World;
use hecs::Entity;
use hinterland_data::{Carnivore, Corpse, Health};

const SCORE: f32 = 0.6;

/// Carnivores eat remains underfoot or walk to the nearest ones in view.
pub(super) fn evaluate(world: &World, actor: Entity) -> Evaluation {
    if !world.has::<Carnivore>(actor) {
        return Evaluation::NONE;
    }
    let Some(pos) = world.position(actor) else {
        return Evaluation::NONE;
    };
    if let Some(&corpse) = world
        .items
        .all(pos.x, pos.y)
        .iter()
        .rev()
        .find(|&&id| world.has::<Corpse>(id))
    {
        return Evaluation::new(SCORE, Intent::Eat(corpse));
    }
    let corpses: Vec<Entity> = world
        .visible_items(actor)
        .into_iter()
        .filter(|&id| world.has::<Corpse>(id))
        .collect();
    match nearest(world, pos, &corpses) {
        Some((_, at, _)) => Evaluation::new(SCORE, Intent::Toward(at)),
        None => Evaluation::NONE,
    }
}

pub(super) fn eat(world: &mut World, actor: Entity, corpse: Entity) -> f32 {
    let (Some(at), Some(remains)) = (world.position(corpse), world.component::<Corpse>(corpse)) else {
        return 0.0;
    };
    if world.position(actor) != Some(at) {
        return 0.0;
    }
    world.despawn(corpse);
    if let Ok(mut health) = world.ecs.get::<&mut Health>(actor) {
        health.value = (health.value + remains.nutrition).min(health.max);
    }
    world.emit(WorldEvent::Ate {
        by: actor,
        corpse,
        at,
    });
    world.config.actions.eat_cost
}
