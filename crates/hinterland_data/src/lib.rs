//! # Hinterland Data
//!
//! Plain data shared by every Hinterland crate: grid coordinates and their
//! packed 64-bit form, compass directions, terrain cell types, the ECS
//! components attached to creatures and the external creature records the
//! content loader hands over.
//!
//! Nothing in here knows about the simulation rules; see `hinterland_core`.

pub mod data;

pub use data::coords::{
    distance_block, distance_chebyshev, distance_pseudo_euclidean, pack, unpack, Coord, Position,
};
pub use data::entity::{
    ActionDelay, Agility, Ai, Ammo, BehaviourKind, Carnivore, Corpse, Crushable, Group, Health, Herbivore, Name, Obstacle,
    Player, Sight, Speed, Strength, Tree, TurnPhase, Underwater,
};
pub use data::side::Side;
pub use data::template::{CreatureTemplate, Diet};
pub use data::terrain::Cell;
