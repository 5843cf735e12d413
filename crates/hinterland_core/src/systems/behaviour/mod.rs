//! Behaviour strategies competing for a creature's turn.
//!
//! Evaluation only reads the world and returns a score with an owned
//! [`Intent`]; the winner's update then turns the intent into an action.
//! Randomness is drawn in updates only, so scoring is repeatable.

use super::bump::BumpResolver;
use crate::world::World;
use hecs::Entity;
use hinterland_data::{BehaviourKind, Group, Position, Side};

mod chase;
mod flee;
mod flock;
mod graze;
mod scavenge;
mod underwater;
mod wander;

/// What the behaviour wants to do if it wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Idle,
    Step(Side),
    /// Walk or attack along the path to a cell.
    Toward(Position),
    /// Run directly away from a cell; any free side if that is blocked.
    AwayFrom(Position),
    /// Any free exit.
    Wander,
    /// A random neighbouring water cell.
    Swim,
    /// Eat the grass underfoot.
    Graze,
    /// Eat the corpse underfoot.
    Eat(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// In `[0, 1]`; zero means "not interested".
    pub score: f32,
    pub intent: Intent,
}

impl Evaluation {
    pub const NONE: Evaluation = Evaluation {
        score: 0.0,
        intent: Intent::Idle,
    };

    #[must_use]
    pub fn new(score: f32, intent: Intent) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
            intent,
        }
    }
}

/// Scoring and acting, implemented by every [`BehaviourKind`].
pub trait BehaviourLogic {
    fn evaluate(&self, world: &World, actor: Entity) -> Evaluation;
    /// Carries out `intent`. Returns the action cost.
    fn update(&self, world: &mut World, bump: &BumpResolver, actor: Entity, intent: Intent) -> f32;
}

impl BehaviourLogic for BehaviourKind {
    fn evaluate(&self, world: &World, actor: Entity) -> Evaluation {
        match self {
            BehaviourKind::Flee => flee::evaluate(world, actor),
            BehaviourKind::Chase => chase::evaluate(world, actor),
            BehaviourKind::Flock => flock::evaluate(world, actor),
            BehaviourKind::Graze => graze::evaluate(world, actor),
            BehaviourKind::Wander => wander::evaluate(world, actor),
            BehaviourKind::Scavenge => scavenge::evaluate(world, actor),
            BehaviourKind::Underwater => underwater::evaluate(world, actor),
        }
    }

    fn update(&self, world: &mut World, bump: &BumpResolver, actor: Entity, intent: Intent) -> f32 {
        match intent {
            Intent::Idle => 0.0,
            Intent::Step(side) => bump.bump(world, actor, side),
            Intent::Toward(target) => bump.bump_toward(world, actor, target),
            Intent::AwayFrom(threat) => flee::run_from(world, bump, actor, threat),
            Intent::Wander => wander::wander(world, bump, actor),
            Intent::Swim => underwater::swim(world, bump, actor),
            Intent::Graze => graze::graze(world, actor),
            Intent::Eat(corpse) => scavenge::eat(world, actor, corpse),
        }
    }
}

/// Whether `a` and `b` belong to the same herd or pack.
pub(crate) fn same_group(world: &World, a: Entity, b: Entity) -> bool {
    match (world.component::<Group>(a), world.component::<Group>(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// The candidate nearest to `from` by Chebyshev distance; the earliest wins
/// ties.
pub(crate) fn nearest(world: &World, from: Position, candidates: &[Entity]) -> Option<(Entity, Position, i32)> {
    candidates
        .iter()
        .filter_map(|&id| world.position(id).map(|p| (id, p, from.chebyshev(p))))
        .min_by_key(|&(_, _, d)| d)
}
