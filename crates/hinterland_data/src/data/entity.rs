//! ECS components. Each attribute kind is its own component, so "does this
//! creature have health" is a membership check on the entity.

use serde::{Deserialize, Serialize};

/// Display name, used in event messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

/// Sight radius in cells. Also bounds how far the creature plans paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sight(pub i32);

/// Movement speed factor; a step costs `base_move_cost / speed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed(pub f32);

/// Melee damage dealt per hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strength(pub f32);

/// Scales how quickly the creature attacks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agility(pub f32);

/// Damageable creatures and objects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub value: f32,
    pub max: f32,
}

impl Health {
    #[must_use]
    pub const fn new(max: f32) -> Self {
        Self { value: max, max }
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.value <= 0.0
    }
}

/// Seconds of simulated time before the entity may act again.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionDelay(pub f32);

/// The externally controlled entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Player;

/// Harvestable resource: the player cuts it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tree;

/// A boulder: the player smashes it into stones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Crushable;

/// Something that can be thrown, with the damage it deals on a hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ammo {
    pub damage: f32,
}

/// The occupant blocks sight and movement like a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Obstacle;

/// Lives in water (fish).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Underwater;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Herbivore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Carnivore;

/// Remains of a dead creature, lying in the item grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corpse {
    pub nutrition: f32,
}

/// Herd or pack membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group(pub u32);

/// Behaviour strategies a creature can run. The order in [`Ai::behaviours`]
/// is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviourKind {
    Flee,
    Chase,
    Flock,
    Graze,
    Wander,
    Scavenge,
    Underwater,
}

/// Where an AI entity is in its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for its delay to run out, or eligible with nothing to do.
    #[default]
    Idle,
    /// Behaviours are being scored.
    Deciding,
    /// An action was performed; the delay is being paid off.
    Committed,
}

/// Autonomous decision making.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ai {
    pub behaviours: Vec<BehaviourKind>,
    pub phase: TurnPhase,
    #[serde(skip)]
    pub last_choice: Option<BehaviourKind>,
}

impl Ai {
    #[must_use]
    pub fn new(behaviours: Vec<BehaviourKind>) -> Self {
        Self {
            behaviours,
            phase: TurnPhase::Idle,
            last_choice: None,
        }
    }
}
