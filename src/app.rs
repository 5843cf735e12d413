use anyhow::Result;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::model::config::AppConfig;
use crate::model::data::{Ai, Ammo, Crushable, Position, Side};
use crate::model::Entity;
use crate::model::scheduler::{Scheduler, Simulation};
use crate::model::systems::ranged;
use crate::model::world::World;

/// Headless driver: owns the simulation and its clock and stands in for
/// the player with a random walk.
pub struct App {
    pub running: bool,
    pub sim: Simulation,
    pub scheduler: Scheduler,
    /// Stop once the world has run this many ticks.
    pub tick_limit: Option<u64>,
    pub event_counts: BTreeMap<&'static str, u64>,
}

/// What a finished run looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub creatures: usize,
    pub decisions: u64,
    pub actions: u64,
    pub player_actions: u64,
    pub events: BTreeMap<&'static str, u64>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let scheduler = Scheduler::new(&config.scheduler);
        let world = World::new(config)?;
        tracing::info!(
            width = world.terrain.width(),
            height = world.terrain.height(),
            creatures = world.creature_count(),
            mode = ?scheduler.mode(),
            "World created"
        );
        Ok(Self {
            running: true,
            sim: Simulation::new(world),
            scheduler,
            tick_limit: None,
            event_counts: BTreeMap::new(),
        })
    }

    /// Takes one player turn.
    ///
    /// The player throws a carried stone at the nearest creature in sight,
    /// picks up a stone underfoot, or crushes a neighbouring boulder, in
    /// that order. Otherwise it steps to a random free side; bumping into a
    /// creature attacks it. When the player is gone, still busy or boxed
    /// in, it waits one tick instead. Returns the cost charged to the clock.
    pub fn drive_player(&mut self) -> f32 {
        let wait = self.scheduler.tick_seconds();
        let ready = self
            .sim
            .world
            .player()
            .filter(|&player| self.sim.can_act(player))
            .and_then(|player| self.sim.world.position(player).map(|pos| (player, pos)));
        let Some((player, pos)) = ready else {
            self.scheduler.submit_player_action(wait);
            return wait;
        };

        let mut cost = 0.0;
        if ranged::ammo_count(&self.sim.world, player) > 0 {
            if let Some(target) = self.nearest_prey(player, pos) {
                cost = self.sim.throw_at(player, target);
            }
        }
        if cost <= 0.0 && self.stone_at(pos) {
            cost = self.sim.pick_up(player);
        }
        if cost <= 0.0 {
            if let Some(side) = self.boulder_beside(pos) {
                cost = self.sim.bump(player, side);
            }
        }
        if cost <= 0.0 {
            let world = &mut self.sim.world;
            let side = world.terrain.free_exit_randomised(pos.x, pos.y, &mut world.rng);
            cost = self.sim.bump(player, side);
        }
        if cost <= 0.0 {
            cost = wait;
        }
        self.scheduler.submit_player_action(cost);
        cost
    }

    fn nearest_prey(&self, player: Entity, pos: Position) -> Option<Position> {
        let world = &self.sim.world;
        world
            .visible_creatures(player)
            .into_iter()
            .filter(|&id| world.has::<Ai>(id))
            .filter_map(|id| world.position(id))
            .min_by_key(|p| pos.chebyshev(*p))
    }

    fn stone_at(&self, pos: Position) -> bool {
        let world = &self.sim.world;
        world.items.all(pos.x, pos.y).iter().any(|&id| world.has::<Ammo>(id))
    }

    fn boulder_beside(&self, pos: Position) -> Option<Side> {
        let world = &self.sim.world;
        Side::ALL.into_iter().find(|side| {
            world
                .creatures
                .get(pos.x + side.dx(), pos.y + side.dy())
                .map_or(false, |id| world.has::<Crushable>(id))
        })
    }

    /// Feeds one frame of wall-clock time. Returns the ticks that ran.
    pub fn frame(&mut self, elapsed: Duration) -> u32 {
        if self.scheduler.is_waiting_for_player() {
            self.drive_player();
        }
        let ran = self.scheduler.advance(elapsed, &mut self.sim);

        for event in self.sim.world.drain_events() {
            *self.event_counts.entry(event.kind()).or_default() += 1;
            tracing::info!(tick = self.sim.world.tick, "{}", event.format());
        }

        if let Some(limit) = self.tick_limit {
            if self.sim.world.tick >= limit {
                self.running = false;
            }
        }
        ran
    }

    /// Runs until the tick limit with simulated frames of exactly one tick.
    ///
    /// No wall clock is involved, so two apps built from the same seeded
    /// config end in the same state.
    pub fn run_fast(&mut self) -> RunSummary {
        let frame = self.scheduler.tick_duration();
        while self.running && self.tick_limit.is_some() {
            self.frame(frame);
        }
        self.summary()
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let metrics = &self.sim.metrics;
        RunSummary {
            ticks: self.sim.world.tick,
            creatures: self.sim.world.creature_count(),
            decisions: metrics.decision_count(),
            actions: metrics.action_count(),
            player_actions: metrics.counter("player_actions"),
            events: self.event_counts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::data::{BehaviourKind, CreatureTemplate, Health};
    use crate::model::scheduler::TimeMode;
    use crate::model::terrain::{Cell, TerrainGrid};
    use crate::model::world::default_templates;

    fn config(seed: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.world.width = 48;
        config.world.height = 32;
        config.world.seed = Some(seed);
        config
    }

    #[test]
    fn test_run_fast_stops_at_limit() {
        let mut app = App::new(config(11)).unwrap();
        app.tick_limit = Some(40);
        let summary = app.run_fast();
        assert!(!app.running);
        assert_eq!(summary.ticks, 40);
        assert!(summary.player_actions > 0);
    }

    #[test]
    fn test_step_mode_waits_for_player() {
        let mut app = App::new(config(3)).unwrap();
        assert_eq!(app.scheduler.mode(), TimeMode::Step);
        assert!(app.scheduler.is_waiting_for_player());
        app.frame(Duration::ZERO);
        assert!(!app.scheduler.is_waiting_for_player());
        assert!(app.scheduler.player_time() > 0.0);
    }

    fn open_field(seed: u64) -> App {
        let mut config = config(seed);
        config.world.populate = false;
        config.ai.initial_delay_jitter = 0.0;
        let mut app = App::new(config).unwrap();
        app.sim.world.terrain = TerrainGrid::filled(16, 16, Cell::Grass).unwrap();
        app
    }

    #[test]
    fn test_player_crushes_neighbouring_boulder() {
        let mut app = open_field(4);
        let templates = default_templates();
        let world = &mut app.sim.world;
        world.spawn_player(&templates.player, Position::new(5, 5)).unwrap();
        world.spawn_boulder(6, 5).unwrap();

        app.frame(app.scheduler.tick_duration());
        assert_eq!(app.event_counts.get("crushed"), Some(&1));
        assert!(app.sim.world.creatures.is_empty(6, 5));
        assert!(!app.sim.world.items.is_empty(6, 5));
    }

    #[test]
    fn test_player_gathers_then_throws() {
        let mut app = open_field(6);
        let templates = default_templates();
        let world = &mut app.sim.world;
        let player = world.spawn_player(&templates.player, Position::new(5, 5)).unwrap();
        world.spawn_stone(Position::new(5, 5));
        let mut post = CreatureTemplate::grazer("post");
        post.behaviours = vec![BehaviourKind::Chase];
        let target = world.spawn_creature(&post, Position::new(9, 5)).unwrap();

        app.frame(app.scheduler.tick_duration());
        assert_eq!(ranged::ammo_count(&app.sim.world, player), 1);

        for _ in 0..100 {
            app.frame(app.scheduler.tick_duration());
            if app.event_counts.contains_key("thrown") {
                break;
            }
        }
        assert_eq!(app.event_counts.get("thrown"), Some(&1));
        let health = app.sim.world.component::<Health>(target).unwrap();
        assert_eq!(health.value, health.max - app.sim.world.config.actions.stone_damage);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = config(1);
        config.world.width = 0;
        assert!(App::new(config).is_err());
    }
}
