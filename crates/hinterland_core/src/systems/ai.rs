//! Per-creature turns: behaviours compete, the best one acts.

use super::behaviour::{BehaviourLogic, Evaluation};
use super::bump::BumpResolver;
use super::EPSILON;
use crate::world::World;
use hecs::Entity;
use hinterland_data::{ActionDelay, Ai, BehaviourKind, TurnPhase};

/// Outcome of one arbitration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// `None` when every behaviour scored zero.
    pub behaviour: Option<BehaviourKind>,
    pub score: f32,
    pub cost: f32,
}

impl Decision {
    pub const NOTHING: Decision = Decision {
        behaviour: None,
        score: 0.0,
        cost: 0.0,
    };
}

/// What a tick did for one creature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurnOutcome {
    /// Still paying off an earlier action.
    Waiting,
    /// Eligible, but the chosen action cost nothing (or nothing was chosen).
    Idle(Decision),
    /// Acted; the delay now holds the cost.
    Acted(Decision),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Arbiter;

impl Arbiter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scores every behaviour of `actor`, then lets the best one act.
    ///
    /// All behaviours are evaluated and those scoring above zero are tried
    /// from the highest score down, the earliest registered first on a tie.
    /// The first one whose update costs something is the decision. When
    /// none of them can act, the top scorer is reported with a zero cost.
    pub fn decide(&self, world: &mut World, bump: &BumpResolver, actor: Entity) -> Decision {
        let Some(behaviours) = world
            .ecs
            .get::<&Ai>(actor)
            .ok()
            .map(|ai| ai.behaviours.clone())
        else {
            return Decision::NOTHING;
        };

        let mut candidates: Vec<(BehaviourKind, Evaluation)> = behaviours
            .iter()
            .map(|&kind| (kind, kind.evaluate(world, actor)))
            .filter(|(_, eval)| eval.score > 0.0)
            .collect();
        // Stable, so registration order survives among equal scores.
        candidates.sort_by(|(_, a), (_, b)| b.score.total_cmp(&a.score));

        let Some(&(top, top_eval)) = candidates.first() else {
            return Decision::NOTHING;
        };
        let mut decision = Decision {
            behaviour: Some(top),
            score: top_eval.score,
            cost: 0.0,
        };
        for &(kind, eval) in &candidates {
            let cost = kind.update(world, bump, actor, eval.intent);
            if cost > 0.0 {
                decision = Decision {
                    behaviour: Some(kind),
                    score: eval.score,
                    cost,
                };
                break;
            }
            tracing::trace!(actor = ?actor, behaviour = ?kind, "Behaviour could not act");
        }

        if let Ok(mut ai) = world.ecs.get::<&mut Ai>(actor) {
            ai.last_choice = decision.behaviour;
        }
        tracing::debug!(
            actor = ?actor,
            behaviour = ?decision.behaviour,
            score = decision.score,
            cost = decision.cost,
            "Decision"
        );
        decision
    }

    /// Advances `actor`'s delay by `dt` and, once it has run out, lets it
    /// decide.
    ///
    /// A positive cost is added to the (non-negative) delay. A zero cost
    /// leaves the creature idle with no delay, so it tries again next tick.
    pub fn run_turn(&self, world: &mut World, bump: &BumpResolver, actor: Entity, dt: f32) -> TurnOutcome {
        let Some(ActionDelay(delay)) = world.component::<ActionDelay>(actor) else {
            return TurnOutcome::Waiting;
        };
        let delay = delay - dt;
        if delay > EPSILON {
            set_turn(world, actor, delay, None);
            return TurnOutcome::Waiting;
        }

        set_turn(world, actor, delay, Some(TurnPhase::Deciding));
        let decision = self.decide(world, bump, actor);
        if decision.cost > 0.0 {
            set_turn(
                world,
                actor,
                delay.max(0.0) + decision.cost,
                Some(TurnPhase::Committed),
            );
            TurnOutcome::Acted(decision)
        } else {
            set_turn(world, actor, 0.0, Some(TurnPhase::Idle));
            TurnOutcome::Idle(decision)
        }
    }
}

fn set_turn(world: &mut World, actor: Entity, delay: f32, phase: Option<TurnPhase>) {
    if let Ok(mut d) = world.ecs.get::<&mut ActionDelay>(actor) {
        d.0 = delay;
    }
    if let Some(phase) = phase {
        if let Ok(mut ai) = world.ecs.get::<&mut Ai>(actor) {
            ai.phase = phase;
        }
    }
}
