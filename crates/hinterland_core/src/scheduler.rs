//! Fixed-timestep clock and the tick that drives every creature.
//!
//! Wall-clock time is fed to [`Scheduler::advance`], which converts it into
//! whole ticks of `1 / fps` simulated seconds. Elapsed time above the frame
//! cap is dropped.

use crate::config::SchedulerConfig;
use crate::metrics::Metrics;
use crate::systems::{ranged, Arbiter, BumpResolver, TurnOutcome, EPSILON};
use crate::world::World;
use hecs::Entity;
use hinterland_data::{ActionDelay, Position, Side};
use std::time::{Duration, Instant};

/// How simulated time relates to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeMode {
    /// Time flows with the wall clock.
    RealTime,
    /// Time only flows while the player's last action is being carried out.
    Step,
}

/// Counts from one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub decisions: usize,
    pub actions: usize,
}

/// World plus the systems that act on it.
pub struct Simulation {
    pub world: World,
    pub bump: BumpResolver,
    pub arbiter: Arbiter,
    pub metrics: Metrics,
}

impl Simulation {
    #[must_use]
    pub fn new(world: World) -> Self {
        let bump = BumpResolver::standard(&world.config.actions);
        Self {
            world,
            bump,
            arbiter: Arbiter::new(),
            metrics: Metrics::new(),
        }
    }

    /// One fixed step of `dt` seconds.
    ///
    /// The player's delay drains; AI creatures take their turns in
    /// ascending id order. A creature killed earlier in the tick is skipped.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let started = Instant::now();
        self.world.tick += 1;

        if let Some(player) = self.world.player() {
            if let Ok(mut delay) = self.world.ecs.get::<&mut ActionDelay>(player) {
                delay.0 = (delay.0 - dt).max(0.0);
            }
        }

        let mut report = TickReport::default();
        for id in self.world.ai_entities() {
            if !self.world.is_alive(id) {
                continue;
            }
            match self.arbiter.run_turn(&mut self.world, &self.bump, id, dt) {
                TurnOutcome::Waiting => {}
                TurnOutcome::Idle(_) => report.decisions += 1,
                TurnOutcome::Acted(_) => {
                    report.decisions += 1;
                    report.actions += 1;
                }
            }
        }

        self.metrics.record_tick(
            started.elapsed(),
            self.world.creature_count(),
            report.decisions,
            report.actions,
        );
        tracing::trace!(tick = self.world.tick, ?report, "Tick");
        report
    }

    /// Whether `actor` has paid off its last action.
    #[must_use]
    pub fn can_act(&self, actor: Entity) -> bool {
        self.world
            .component::<ActionDelay>(actor)
            .map_or(false, |d| d.0 <= EPSILON)
    }

    /// Bumps on behalf of an external controller and charges the cost to
    /// the actor's delay.
    pub fn bump(&mut self, actor: Entity, side: Side) -> f32 {
        let cost = self.bump.bump(&mut self.world, actor, side);
        self.charge(actor, cost);
        cost
    }

    pub fn bump_toward(&mut self, actor: Entity, target: Position) -> f32 {
        let cost = self.bump.bump_toward(&mut self.world, actor, target);
        self.charge(actor, cost);
        cost
    }

    /// Picks up a stone underfoot on behalf of an external controller.
    pub fn pick_up(&mut self, actor: Entity) -> f32 {
        let cost = ranged::pick_up(&mut self.world, actor);
        self.charge(actor, cost);
        cost
    }

    /// Throws a carried stone at `target` on behalf of an external controller.
    pub fn throw_at(&mut self, actor: Entity, target: Position) -> f32 {
        let cost = ranged::throw_at(&mut self.world, actor, target);
        self.charge(actor, cost);
        cost
    }

    fn charge(&mut self, actor: Entity, cost: f32) {
        if cost <= 0.0 {
            return;
        }
        self.metrics.increment_counter("player_actions");
        if let Ok(mut delay) = self.world.ecs.get::<&mut ActionDelay>(actor) {
            delay.0 += cost;
        }
    }
}

/// Turns wall-clock time into ticks.
#[derive(Debug, Clone)]
pub struct Scheduler {
    tick: Duration,
    max_frame: Duration,
    lag: Duration,
    mode: TimeMode,
    /// Set by the user; stops time in either mode.
    paused: bool,
    /// Simulated seconds of the player's action still to play out. In step
    /// mode time only runs while this is positive.
    player_time: f32,
}

impl Scheduler {
    /// Step mode starts out waiting for the first player action.
    #[must_use]
    pub fn new(config: &SchedulerConfig) -> Self {
        let fps = u64::from(config.fps.max(1));
        let mode = if config.realtime {
            TimeMode::RealTime
        } else {
            TimeMode::Step
        };
        Self {
            tick: Duration::from_nanos(1_000_000_000 / fps),
            max_frame: Duration::from_millis(config.max_frame_ms),
            lag: Duration::ZERO,
            mode,
            paused: false,
            player_time: 0.0,
        }
    }

    /// Feeds `elapsed` wall-clock time in and runs every whole tick it
    /// covers. Returns the number of ticks run.
    ///
    /// Nothing runs while the user has paused, nor in step mode while no
    /// player action is in progress. A user pause keeps the lag; time that
    /// passes while waiting for the player is dropped.
    pub fn advance(&mut self, elapsed: Duration, sim: &mut Simulation) -> u32 {
        let elapsed = if elapsed > self.max_frame {
            tracing::info!(
                elapsed_ms = elapsed.as_millis() as u64,
                cap_ms = self.max_frame.as_millis() as u64,
                "Simulation lagging behind"
            );
            self.max_frame
        } else {
            elapsed
        };
        if self.paused || self.is_waiting_for_player() {
            return 0;
        }
        self.lag += elapsed;

        let dt = self.tick_seconds();
        let mut ran = 0;
        while self.lag >= self.tick && !self.is_waiting_for_player() {
            sim.tick(dt);
            self.lag -= self.tick;
            ran += 1;

            if self.mode == TimeMode::Step {
                self.player_time -= dt;
                if self.player_time <= EPSILON {
                    self.player_time = 0.0;
                }
            }
        }
        ran
    }

    /// Records the cost of an action the player just took. In step mode a
    /// positive cost lets time run for that long; a user pause still holds.
    pub fn submit_player_action(&mut self, cost: f32) {
        if cost > 0.0 {
            self.player_time += cost;
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the user has paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Step mode with no player action left to play out.
    #[must_use]
    pub fn is_waiting_for_player(&self) -> bool {
        self.mode == TimeMode::Step && self.player_time <= EPSILON
    }

    #[must_use]
    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TimeMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        self.tick
    }

    /// Length of one tick in simulated seconds.
    #[must_use]
    pub fn tick_seconds(&self) -> f32 {
        self.tick.as_secs_f32()
    }

    /// Wall-clock time accumulated but not yet simulated.
    #[must_use]
    pub fn lag(&self) -> Duration {
        self.lag
    }

    /// Simulated seconds of the player's action still outstanding.
    #[must_use]
    pub fn player_time(&self) -> f32 {
        self.player_time
    }
}
