use hecs::Entity;
use hinterland_data::Coord;

/// Something that happened during a tick, for whoever presents the world.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    Damage {
        attacker: Entity,
        victim: Entity,
        victim_name: String,
        amount: f32,
        remaining: f32,
    },
    Death {
        entity: Entity,
        name: String,
        at: Coord,
    },
    /// A tree was cut down.
    Felled { by: Entity, at: Coord },
    Grazed { by: Entity, at: Coord },
    Ate { by: Entity, corpse: Entity, at: Coord },
    /// A boulder was smashed into `stones` stones.
    Crushed { by: Entity, at: Coord, stones: u32 },
    /// A thrown stone came down at `at`, on `hit` if it struck something.
    Thrown {
        by: Entity,
        at: Coord,
        hit: Option<Entity>,
    },
}

impl WorldEvent {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            WorldEvent::Damage { .. } => "damage",
            WorldEvent::Death { .. } => "death",
            WorldEvent::Felled { .. } => "felled",
            WorldEvent::Grazed { .. } => "grazed",
            WorldEvent::Ate { .. } => "ate",
            WorldEvent::Crushed { .. } => "crushed",
            WorldEvent::Thrown { .. } => "thrown",
        }
    }

    /// One-line message for a log.
    #[must_use]
    pub fn format(&self) -> String {
        match self {
            WorldEvent::Damage {
                victim_name,
                amount,
                remaining,
                ..
            } => format!("HIT {victim_name} for {amount:.2} hp ({remaining:.2})"),
            WorldEvent::Death { name, at, .. } => {
                format!("{name} dies at ({}, {})", at.x, at.y)
            }
            WorldEvent::Felled { at, .. } => format!("Tree felled at ({}, {})", at.x, at.y),
            WorldEvent::Grazed { at, .. } => format!("Grazing at ({}, {})", at.x, at.y),
            WorldEvent::Ate { at, .. } => format!("Corpse eaten at ({}, {})", at.x, at.y),
            WorldEvent::Crushed { at, stones, .. } => {
                format!("Boulder crushed into {stones} stones at ({}, {})", at.x, at.y)
            }
            WorldEvent::Thrown { at, hit, .. } => match hit {
                Some(_) => format!("Stone hits at ({}, {})", at.x, at.y),
                None => format!("Stone lands at ({}, {})", at.x, at.y),
            },
        }
    }
}
