use super::{same_group, Evaluation, Intent};
use crate::systems::bump::BumpResolver;
use crate::visibility::Board;
use crate::world::{mean_position, World};
use hecs::Entity;
use hinterland_data::{Ai, Carnivore, Health, Player, Position, Side, Tree, Underwater};

const SCORE: f32 = 0.9;

fn is_threat(world: &World, actor: Entity, other: Entity) -> bool {
    world.has::<Health>(other)
        && !world.has::<Tree>(other)
        && !world.has::<Underwater>(other)
        && !same_group(world, actor, other)
        && (world.has::<Player>(other) || (world.has::<Ai>(other) && world.has::<Carnivore>(other)))
}

/// Any predator or the player in view makes the creature run.
pub(super) fn evaluate(world: &World, actor: Entity) -> Evaluation {
    if world.has::<Carnivore>(actor) {
        return Evaluation::NONE;
    }
    let threats: Vec<Position> = world
        .visible_creatures(actor)
        .into_iter()
        .filter(|&other| is_threat(world, actor, other))
        .filter_map(|other| world.position(other))
        .collect();
    match mean_position(&threats) {
        Some(centre) => Evaluation::new(SCORE, Intent::AwayFrom(centre)),
        None => Evaluation::NONE,
    }
}

/// Steps directly away from `threat`; stampedes to a random side when that
/// way is blocked.
pub(super) fn run_from(world: &mut World, bump: &BumpResolver, actor: Entity, threat: Position) -> f32 {
    let Some(pos) = world.position(actor) else {
        return 0.0;
    };
    let mut side = Side::between(threat.x, threat.y, pos.x, pos.y);
    let blocked = side == Side::Here
        || world
            .board()
            .is_obstacle(pos.x + side.dx(), pos.y + side.dy());
    if blocked {
        side = Side::random(&mut world.rng);
    }
    bump.bump(world, actor, side)
}
