use super::{Evaluation, Intent};
use crate::systems::bump::BumpResolver;
use crate::world::World;
use hecs::Entity;
use hinterland_data::Side;

const SCORE: f32 = 0.1;

pub(super) fn evaluate(world: &World, actor: Entity) -> Evaluation {
    if world.position(actor).is_none() {
        return Evaluation::NONE;
    }
    Evaluation::new(SCORE, Intent::Wander)
}

pub(super) fn wander(world: &mut World, bump: &BumpResolver, actor: Entity) -> f32 {
    let Some(pos) = world.position(actor) else {
        return 0.0;
    };
    let side = world.terrain.free_exit_randomised(pos.x, pos.y, &mut world.rng);
    if side == Side::Here {
        return 0.0;
    }
    bump.bump(world, actor, side)
}
