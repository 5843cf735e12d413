//! # Hinterland Core
//!
//! The simulation engine behind Hinterland, a tile-based wilderness where
//! creatures take turns of varying length on a fixed-timestep clock.
//!
//! This crate contains:
//! - Terrain storage and height-field generation
//! - Sparse occupancy grids for creatures and items
//! - Field of view, line of sight and radius-bounded pathfinding
//! - The bump resolver that turns "act toward that cell" into moves and attacks
//! - Utility-based behaviour arbitration for AI creatures
//! - The fixed-timestep scheduler that hands out turns
//!
//! ## Architecture
//!
//! - **Entities**: a `hecs::World` arena; every attribute is its own component
//! - **Grids**: keyed by packed coordinates (`hinterland_data::pack`)
//! - **Single thread**: one tick runs to completion before the next starts
//! - **Deterministic**: seeded `ChaCha8Rng`, ordered entity iteration
//!
//! ## Example
//!
//! ```
//! use hinterland_core::config::AppConfig;
//! use hinterland_core::scheduler::{Scheduler, Simulation};
//! use hinterland_core::world::World;
//! use std::time::Duration;
//!
//! let mut config = AppConfig::default();
//! config.world.width = 40;
//! config.world.height = 30;
//! config.world.seed = Some(7);
//! config.scheduler.realtime = true;
//!
//! let world = World::new(config.clone()).unwrap();
//! let mut sim = Simulation::new(world);
//! let mut scheduler = Scheduler::new(&config.scheduler);
//!
//! let ticks = scheduler.advance(Duration::from_millis(100), &mut sim);
//! assert!(ticks > 0);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Error types for world construction and content validation
pub mod error;
/// World events reported to the presentation layer
pub mod events;
/// Performance metrics collection and structured logging
pub mod metrics;
/// Sparse occupancy grids keyed by packed coordinates
pub mod occupancy;
/// Radius-bounded A* over the obstacle predicate
pub mod pathfinding;
/// Fixed-timestep scheduler and the per-tick simulation driver
pub mod scheduler;
/// Behaviours, arbitration, interactions and the bump resolver
pub mod systems;
/// Terrain grid with height-field generation
pub mod terrain;
/// Field of view and line of sight
pub mod visibility;
/// World state: terrain, grids and the entity arena
pub mod world;

pub use error::WorldError;
pub use hecs::Entity;
pub use metrics::{init_logging, Metrics};
pub use systems::behaviour::BehaviourLogic;
pub use terrain::{CellLogic, TerrainGrid};
pub use visibility::Board;
