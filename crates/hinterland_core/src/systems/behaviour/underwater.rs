use super::{Evaluation, Intent};
use crate::systems::bump::BumpResolver;
use crate::terrain::{Cell, CellLogic};
use crate::visibility::Board;
use crate::world::World;
use hecs::Entity;
use hinterland_data::{Side, Sight, Underwater};
use rand::seq::SliceRandom;

const STRANDED: f32 = 1.0;
const SWIMMING: f32 = 0.2;
const WATER: [Cell; 2] = [Cell::Water, Cell::DeepWater];

/// Water creatures swim about, and rush back when stranded on land.
pub(super) fn evaluate(world: &World, actor: Entity) -> Evaluation {
    if !world.has::<Underwater>(actor) {
        return Evaluation::NONE;
    }
    let Some(pos) = world.position(actor) else {
        return Evaluation::NONE;
    };
    if world.terrain.get(pos.x, pos.y).is_water() {
        return Evaluation::new(SWIMMING, Intent::Swim);
    }
    let sight = world.component::<Sight>(actor).map_or(1, |s| s.0.max(1));
    match world.terrain.first_of_type(pos.x, pos.y, sight, &WATER) {
        Some(water) => Evaluation::new(STRANDED, Intent::Toward(water)),
        None => Evaluation::NONE,
    }
}

pub(super) fn swim(world: &mut World, bump: &BumpResolver, actor: Entity) -> f32 {
    let Some(pos) = world.position(actor) else {
        return 0.0;
    };
    let options: Vec<Side> = {
        let board = world.board();
        Side::ALL
            .into_iter()
            .filter(|side| {
                let (x, y) = (pos.x + side.dx(), pos.y + side.dy());
                world.terrain.get(x, y).is_water()
                    && !board.is_obstacle(x, y)
                    && world.creatures.is_empty(x, y)
            })
            .collect()
    };
    match options.choose(&mut world.rng) {
        Some(&side) => bump.bump(world, actor, side),
        None => 0.0,
    }
}
