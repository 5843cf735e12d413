use super::World;
use crate::config::AppConfig;
use crate::error::{Result, WorldError};
use crate::occupancy::{MultipleGrid, SingleGrid};
use crate::terrain::{Cell, TerrainGrid};
use hinterland_data::{BehaviourKind, CreatureTemplate, Diet, Position};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const LAND: [Cell; 4] = [Cell::Sand, Cell::Grass, Cell::HillGrass, Cell::Hill];
const WATER: [Cell; 2] = [Cell::Water, Cell::DeepWater];
const PLACEMENT_ATTEMPTS: usize = 50;

/// Creature records used by [`World::populate`].
#[derive(Debug, Clone)]
pub struct DemoTemplates {
    pub player: CreatureTemplate,
    pub buffalo: CreatureTemplate,
    pub rabbit: CreatureTemplate,
    pub wolf: CreatureTemplate,
    pub puma: CreatureTemplate,
    pub fish: CreatureTemplate,
}

/// Built-in stat records standing in for the external content loader.
#[must_use]
pub fn default_templates() -> DemoTemplates {
    let player = CreatureTemplate {
        name: "you".to_string(),
        strength: 3.0,
        agility: 1.0,
        sight: 12,
        speed: 1.0,
        health: 20.0,
        diet: Diet::Omnivore,
        underwater: false,
        behaviours: Vec::new(),
    };
    let buffalo = CreatureTemplate {
        strength: 3.0,
        speed: 0.8,
        health: 20.0,
        ..CreatureTemplate::grazer("buffalo")
    };
    let rabbit = CreatureTemplate {
        strength: 0.5,
        speed: 1.5,
        health: 4.0,
        sight: 6,
        ..CreatureTemplate::grazer("rabbit")
    };
    let wolf = CreatureTemplate::hunter("wolf");
    let puma = CreatureTemplate {
        strength: 5.0,
        sight: 8,
        ..CreatureTemplate::hunter("puma")
    };
    let fish = CreatureTemplate {
        name: "fish".to_string(),
        strength: 0.2,
        agility: 1.0,
        sight: 4,
        speed: 1.0,
        health: 2.0,
        diet: Diet::Herbivore,
        underwater: true,
        behaviours: vec![BehaviourKind::Underwater],
    };
    DemoTemplates {
        player,
        buffalo,
        rabbit,
        wolf,
        puma,
        fish,
    }
}

impl World {
    /// Generates terrain from the configured seed and, when
    /// `world.populate` is set, the demo population.
    pub fn new(config: AppConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| WorldError::config(e.to_string()))?;
        let seed = config
            .world
            .seed
            .unwrap_or_else(|| ChaCha8Rng::from_entropy().gen());
        let terrain = TerrainGrid::generate(config.world.width, config.world.height, seed)?;
        let populate = config.world.populate;

        let mut world = Self::with_terrain(config, terrain, seed);
        if populate {
            world.populate(&default_templates())?;
        }
        tracing::info!(
            seed,
            creatures = world.creatures.len(),
            "World initialised"
        );
        Ok(world)
    }

    /// An empty world over prepared terrain.
    #[must_use]
    pub fn with_terrain(config: AppConfig, terrain: TerrainGrid, seed: u64) -> Self {
        Self {
            config,
            terrain,
            creatures: SingleGrid::new(),
            items: MultipleGrid::new(),
            ecs: hecs::World::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
            events: Vec::new(),
            next_group: 0,
        }
    }

    /// Trees on grass and hills, boulders on dry land, the player in the middle, a buffalo herd,
    /// rabbits, a wolf pack, pumas around the player and fish in the water.
    pub fn populate(&mut self, templates: &DemoTemplates) -> Result<()> {
        let (w, h) = (self.terrain.width(), self.terrain.height());
        let centre = Position::new(w / 2, h / 2);

        let density = f64::from(self.config.world.tree_density).clamp(0.0, 1.0);
        let candidates: Vec<Position> = self
            .terrain
            .cells_where(|c| matches!(c, Cell::Grass | Cell::HillGrass | Cell::Hill))
            .filter(|p| *p != centre)
            .collect();
        let mut trees = 0usize;
        for pos in candidates {
            if self.rng.gen_bool(density) && self.spawn_tree(pos.x, pos.y).is_ok() {
                trees += 1;
            }
        }

        let density = f64::from(self.config.world.boulder_density).clamp(0.0, 1.0);
        let candidates: Vec<Position> = self
            .terrain
            .cells_where(|c| matches!(c, Cell::Sand | Cell::Grass | Cell::Hill | Cell::Mountain))
            .filter(|p| *p != centre)
            .collect();
        let mut boulders = 0usize;
        for pos in candidates {
            if self.rng.gen_bool(density) && self.spawn_boulder(pos.x, pos.y).is_ok() {
                boulders += 1;
            }
        }

        let player_pos = self.find_spot(centre, 0, &LAND);
        if let Some(pos) = player_pos {
            self.spawn_player(&templates.player, pos)?;
        } else {
            tracing::warn!("No land left for the player");
        }
        let home = player_pos.unwrap_or(centre);

        self.spawn_group(&templates.buffalo, 5, &LAND, true)?;
        self.spawn_group(&templates.rabbit, 3, &LAND, false)?;
        self.spawn_group(&templates.wolf, 5, &LAND, true)?;
        for _ in 0..3 {
            if let Some(pos) = self.find_spot(home, 5, &LAND) {
                self.spawn_creature(&templates.puma, pos)?;
            }
        }
        for _ in 0..4 {
            let anchor = self.random_cell();
            if let Some(pos) = self.find_spot(anchor, 3, &WATER) {
                self.spawn_creature(&templates.fish, pos)?;
            }
        }

        tracing::info!(
            trees,
            boulders,
            creatures = self.creatures.len() - trees - boulders,
            "Populated world"
        );
        Ok(())
    }

    fn spawn_group(
        &mut self,
        template: &CreatureTemplate,
        count: usize,
        cells: &[Cell],
        grouped: bool,
    ) -> Result<()> {
        let anchor = self.random_cell();
        let group = grouped.then(|| self.create_group());
        for _ in 0..count {
            let Some(pos) = self.find_spot(anchor, 3, cells) else {
                continue;
            };
            let id = self.spawn_creature(template, pos)?;
            if let Some(group) = group {
                self.join_group(id, group)?;
            }
        }
        Ok(())
    }

    fn random_cell(&mut self) -> Position {
        let x = self.rng.gen_range(0..self.terrain.width());
        let y = self.rng.gen_range(0..self.terrain.height());
        Position::new(x, y)
    }

    fn is_spot(&self, pos: Position, cells: &[Cell]) -> bool {
        self.terrain.contains(pos.x, pos.y)
            && !self.terrain.is_obstacle(pos.x, pos.y)
            && self.creatures.is_empty(pos.x, pos.y)
            && cells.contains(&self.terrain.get(pos.x, pos.y))
    }

    /// A free cell of one of `cells` within `spread` of `anchor`, tried at
    /// random first and then by ring search from the anchor.
    fn find_spot(&mut self, anchor: Position, spread: i32, cells: &[Cell]) -> Option<Position> {
        if self.is_spot(anchor, cells) {
            return Some(anchor);
        }
        if spread > 0 {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let pos = anchor.offset(
                    self.rng.gen_range(-spread..=spread),
                    self.rng.gen_range(-spread..=spread),
                );
                if self.is_spot(pos, cells) {
                    return Some(pos);
                }
            }
        }
        let reach = self.terrain.width().max(self.terrain.height());
        (1..=reach)
            .flat_map(|d| {
                self.terrain
                    .neighbourhood(anchor.x, anchor.y, d)
                    .filter(move |p| p.chebyshev(anchor) == d)
            })
            .find(|p| self.is_spot(*p, cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hinterland_data::{Ai, Group, Player, Tree};

    fn small_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.world.width = 48;
        config.world.height = 32;
        config.world.seed = Some(11);
        config
    }

    #[test]
    fn test_new_is_reproducible() {
        let a = World::new(small_config()).unwrap();
        let b = World::new(small_config()).unwrap();
        assert_eq!(a.creatures.len(), b.creatures.len());
        for y in 0..32 {
            for x in 0..48 {
                assert_eq!(a.terrain.get(x, y), b.terrain.get(x, y));
                assert_eq!(
                    a.creatures.get(x, y).is_some(),
                    b.creatures.get(x, y).is_some()
                );
            }
        }
    }

    #[test]
    fn test_populate_spawns_player_and_groups() {
        let world = World::new(small_config()).unwrap();
        assert_eq!(world.ecs.query::<&Player>().iter().count(), 1);
        assert!(world.ecs.query::<&Ai>().iter().count() > 0);
        let grouped = world.ecs.query::<&Group>().iter().count();
        assert!(grouped > 0);
        let player = world.player().unwrap();
        assert!(!world.has::<Tree>(player));
        assert!(!world.has::<Ai>(player));
    }

    #[test]
    fn test_unpopulated_world_is_empty() {
        let mut config = small_config();
        config.world.populate = false;
        let world = World::new(config).unwrap();
        assert_eq!(world.creatures.len(), 0);
        assert!(world.player().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = small_config();
        config.world.height = 0;
        assert!(matches!(World::new(config), Err(WorldError::InvalidConfig(_))));
    }
}
