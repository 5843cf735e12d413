//! Core data structures for the Hinterland simulation.

pub mod coords;
pub mod entity;
pub mod side;
pub mod template;
pub mod terrain;
