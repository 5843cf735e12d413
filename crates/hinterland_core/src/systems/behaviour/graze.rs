use super::{Evaluation, Intent};
use crate::events::WorldEvent;
use crate::terrain::{Cell, CellLogic};
use crate::world::World;
use hecs::Entity;
use hinterland_data::{Health, Herbivore, Sight, Underwater};

const EATING: f32 = 0.3;
const SEEKING: f32 = 0.35;
const PASTURE: [Cell; 2] = [Cell::Grass, Cell::HillGrass];

/// Eats grass underfoot, or walks to the nearest patch in sight.
pub(super) fn evaluate(world: &World, actor: Entity) -> Evaluation {
    if !world.has::<Herbivore>(actor) || world.has::<Underwater>(actor) {
        return Evaluation::NONE;
    }
    let Some(pos) = world.position(actor) else {
        return Evaluation::NONE;
    };
    if world.terrain.get(pos.x, pos.y).is_grazeable() {
        return Evaluation::new(EATING, Intent::Graze);
    }
    let sight = world.component::<Sight>(actor).map_or(0, |s| s.0);
    match world.terrain.first_of_type(pos.x, pos.y, sight, &PASTURE) {
        Some(patch) => Evaluation::new(SEEKING, Intent::Toward(patch)),
        None => Evaluation::NONE,
    }
}

pub(super) fn graze(world: &mut World, actor: Entity) -> f32 {
    let Some(at) = world.position(actor) else {
        return 0.0;
    };
    let heal = world.config.actions.graze_heal;
    if let Ok(mut health) = world.ecs.get::<&mut Health>(actor) {
        health.value = (health.value + heal).min(health.max);
    }
    world.emit(WorldEvent::Grazed { by: actor, at });
    world.config.actions.graze_cost
}
