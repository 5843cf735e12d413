//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration structures that map to `config.toml`.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults section by section)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 160
//! height = 100
//! seed = 42
//!
//! [scheduler]
//! fps = 25
//! realtime = false
//!
//! [actions]
//! base_move_cost = 0.5
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// World dimensions and generation.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Chance per grass/hill cell of growing a tree at bootstrap.
    pub tree_density: f32,
    /// Chance per dry land cell of a boulder at bootstrap.
    pub boulder_density: f32,
    /// Spawns the demo population (player, herds, packs, fish).
    pub populate: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 100,
            seed: None,
            tree_density: 0.01,
            boulder_density: 0.004,
            populate: true,
        }
    }
}

/// Fixed-timestep clock.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Ticks per simulated second.
    pub fps: u32,
    /// Wall-clock time accepted per iteration; the rest is dropped.
    pub max_frame_ms: u64,
    /// `false` waits for a player action before time moves on.
    pub realtime: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fps: 25,
            max_frame_ms: 250,
            realtime: false,
        }
    }
}

/// Time cost of every committed action, in simulated seconds.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ActionConfig {
    /// One step on plain ground at speed 1.
    pub base_move_cost: f32,
    /// One hit at agility 1.
    pub base_attack_cost: f32,
    pub harvest_cost: f32,
    pub graze_cost: f32,
    pub eat_cost: f32,
    /// Health regained per graze.
    pub graze_heal: f32,
    /// Smashing a boulder.
    pub crush_cost: f32,
    /// Stones left behind by a crushed boulder.
    pub stones_per_boulder: u32,
    /// Damage of one thrown stone.
    pub stone_damage: f32,
    pub pick_up_cost: f32,
    pub throw_cost: f32,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            base_move_cost: 0.5,
            base_attack_cost: 1.0,
            harvest_cost: 1.5,
            graze_cost: 1.0,
            eat_cost: 1.0,
            graze_heal: 0.5,
            crush_cost: 2.0,
            stones_per_boulder: 3,
            stone_damage: 2.0,
            pick_up_cost: 0.5,
            throw_cost: 1.0,
        }
    }
}

/// Behaviour tuning.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AiConfig {
    /// Group members farther than this from their centroid regroup.
    pub flock_distance: i32,
    /// Upper bound of the random delay creatures start with.
    pub initial_delay_jitter: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            flock_distance: 2,
            initial_delay_jitter: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub scheduler: SchedulerConfig,
    pub actions: ActionConfig,
    pub ai: AiConfig,
}

impl AppConfig {
    /// Loads `path`, or the defaults when the file does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(self.world.height > 0, "World height must be positive");
        anyhow::ensure!(
            self.world.width <= 4096 && self.world.height <= 4096,
            "World too large (max 4096x4096)"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.world.tree_density),
            "Tree density must be in [0, 1]"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.world.boulder_density),
            "Boulder density must be in [0, 1]"
        );

        anyhow::ensure!(self.scheduler.fps > 0, "Scheduler fps must be positive");
        anyhow::ensure!(
            self.scheduler.max_frame_ms > 0,
            "Max frame time must be positive"
        );

        for (name, cost) in [
            ("base_move_cost", self.actions.base_move_cost),
            ("base_attack_cost", self.actions.base_attack_cost),
            ("harvest_cost", self.actions.harvest_cost),
            ("graze_cost", self.actions.graze_cost),
            ("eat_cost", self.actions.eat_cost),
            ("crush_cost", self.actions.crush_cost),
            ("pick_up_cost", self.actions.pick_up_cost),
            ("throw_cost", self.actions.throw_cost),
        ] {
            anyhow::ensure!(cost > 0.0, "Action cost {name} must be positive");
        }
        anyhow::ensure!(
            self.actions.graze_heal >= 0.0,
            "Graze heal must be non-negative"
        );
        anyhow::ensure!(
            self.actions.stone_damage >= 0.0,
            "Stone damage must be non-negative"
        );

        anyhow::ensure!(
            self.ai.flock_distance >= 0,
            "Flock distance must be non-negative"
        );
        anyhow::ensure!(
            self.ai.initial_delay_jitter >= 0.0,
            "Initial delay jitter must be non-negative"
        );
        Ok(())
    }
}
