use super::{Evaluation, Intent};
use crate::world::World;
use hecs::Entity;
use hinterland_data::{Group, Side};

const SCORE: f32 = 0.4;

/// Straying members head back toward the group's centre.
pub(super) fn evaluate(world: &World, actor: Entity) -> Evaluation {
    let (Some(group), Some(pos)) = (world.component::<Group>(actor), world.position(actor)) else {
        return Evaluation::NONE;
    };
    if world.group_members(group).len() < 2 {
        return Evaluation::NONE;
    }
    let Some(centre) = world.group_centroid(group) else {
        return Evaluation::NONE;
    };
    if pos.chebyshev(centre) <= world.config.ai.flock_distance {
        return Evaluation::NONE;
    }
    let side = Side::between(pos.x, pos.y, centre.x, centre.y);
    Evaluation::new(SCORE, Intent::Step(side))
}
