use super::{nearest, same_group, Evaluation, Intent};
use crate::world::World;
use hecs::Entity;
use hinterland_data::{Carnivore, Health, Player, Sight, Tree, Underwater};

/// Hunts the nearest visible prey. Closer prey scores higher.
pub(super) fn evaluate(world: &World, actor: Entity) -> Evaluation {
    if !world.has::<Carnivore>(actor) {
        return Evaluation::NONE;
    }
    let (Some(pos), Some(sight)) = (world.position(actor), world.component::<Sight>(actor)) else {
        return Evaluation::NONE;
    };
    if sight.0 <= 0 {
        return Evaluation::NONE;
    }
    let prey: Vec<Entity> = world
        .visible_creatures(actor)
        .into_iter()
        .filter(|&other| {
            world.has::<Health>(other)
                && !world.has::<Tree>(other)
                && !world.has::<Underwater>(other)
                && (world.has::<Player>(other) || !world.has::<Carnivore>(other))
                && !same_group(world, actor, other)
        })
        .collect();

    match nearest(world, pos, &prey) {
        Some((_, at, d)) => {
            let closeness = 1.0 - d as f32 / sight.0 as f32;
            Evaluation::new(0.5 + 0.4 * closeness, Intent::Toward(at))
        }
        None => Evaluation::NONE,
    }
}
