use hecs::Entity;
use hinterland_lib::model::config::AppConfig;
use hinterland_lib::model::data::{CreatureTemplate, Position};
use hinterland_lib::model::scheduler::Simulation;
use hinterland_lib::model::terrain::{Cell, TerrainGrid};
use hinterland_lib::model::world::World;

type TerrainMod = Box<dyn FnOnce(&mut TerrainGrid)>;

/// Small hand-made worlds: fixed terrain, no demo population.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    width: i32,
    height: i32,
    fill: Cell,
    seed: u64,
    terrain_mods: Vec<TerrainMod>,
    creatures: Vec<(CreatureTemplate, Position)>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new(width: i32, height: i32) -> Self {
        let mut config = AppConfig::default();
        config.world.populate = false;
        config.ai.initial_delay_jitter = 0.0;
        Self {
            config,
            width,
            height,
            fill: Cell::Grass,
            seed: 1,
            terrain_mods: Vec::new(),
            creatures: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn filled_with(mut self, cell: Cell) -> Self {
        self.fill = cell;
        self
    }

    pub fn with_cell(mut self, x: i32, y: i32, cell: Cell) -> Self {
        self.terrain_mods
            .push(Box::new(move |terrain| terrain.set(x, y, cell)));
        self
    }

    /// Each `#` becomes a wall, `~` water and anything else the fill.
    pub fn with_map(mut self, rows: &[&str]) -> Self {
        let rows: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
        self.terrain_mods.push(Box::new(move |terrain| {
            for (y, row) in rows.iter().enumerate() {
                for (x, ch) in row.chars().enumerate() {
                    let cell = match ch {
                        '#' => Cell::Wall,
                        '~' => Cell::Water,
                        _ => continue,
                    };
                    terrain.set(x as i32, y as i32, cell);
                }
            }
        }));
        self
    }

    pub fn with_creature(mut self, template: CreatureTemplate, x: i32, y: i32) -> Self {
        self.creatures.push((template, Position::new(x, y)));
        self
    }

    pub fn build(self) -> World {
        let mut terrain = TerrainGrid::filled(self.width, self.height, self.fill).unwrap();
        for modifier in self.terrain_mods {
            modifier(&mut terrain);
        }
        let mut world = World::with_terrain(self.config, terrain, self.seed);
        for (template, pos) in &self.creatures {
            world.spawn_creature(template, *pos).unwrap();
        }
        world
    }

    pub fn build_simulation(self) -> Simulation {
        Simulation::new(self.build())
    }
}

/// Every entity with a position, in id order, for comparing runs.
#[allow(dead_code)]
pub fn snapshot(world: &World) -> Vec<(u64, Position, Option<f32>)> {
    let mut out: Vec<(u64, Position, Option<f32>)> = world
        .ecs
        .query::<&Position>()
        .iter()
        .map(|(id, pos)| (id.to_bits().get(), *pos, health_of(world, id)))
        .collect();
    out.sort_by_key(|(bits, _, _)| *bits);
    out
}

fn health_of(world: &World, id: Entity) -> Option<f32> {
    world
        .component::<hinterland_lib::model::data::Health>(id)
        .map(|h| h.value)
}
