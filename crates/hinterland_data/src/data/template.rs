use super::entity::BehaviourKind;
use serde::{Deserialize, Serialize};

/// What a creature eats. Decides which of `Herbivore`/`Carnivore` it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diet {
    #[default]
    Herbivore,
    Carnivore,
    Omnivore,
}

/// Creature stat record as supplied by the content loader.
///
/// Values arrive already validated; the simulation only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    pub name: String,
    pub strength: f32,
    /// Scales attack speed.
    #[serde(default = "default_agility")]
    pub agility: f32,
    pub sight: i32,
    pub speed: f32,
    pub health: f32,
    #[serde(default)]
    pub diet: Diet,
    #[serde(default)]
    pub underwater: bool,
    #[serde(default)]
    pub behaviours: Vec<BehaviourKind>,
}

fn default_agility() -> f32 {
    1.0
}

impl CreatureTemplate {
    /// Baseline herbivore used by tests and the demo world.
    #[must_use]
    pub fn grazer(name: &str) -> Self {
        Self {
            name: name.to_string(),
            strength: 2.0,
            agility: 1.0,
            sight: 8,
            speed: 1.0,
            health: 10.0,
            diet: Diet::Herbivore,
            underwater: false,
            behaviours: vec![
                BehaviourKind::Flee,
                BehaviourKind::Graze,
                BehaviourKind::Flock,
                BehaviourKind::Wander,
            ],
        }
    }

    /// Baseline predator used by tests and the demo world.
    #[must_use]
    pub fn hunter(name: &str) -> Self {
        Self {
            name: name.to_string(),
            strength: 4.0,
            agility: 1.5,
            sight: 10,
            speed: 1.2,
            health: 15.0,
            diet: Diet::Carnivore,
            underwater: false,
            behaviours: vec![
                BehaviourKind::Chase,
                BehaviourKind::Scavenge,
                BehaviourKind::Flock,
                BehaviourKind::Wander,
            ],
        }
    }
}
