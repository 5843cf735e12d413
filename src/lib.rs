//! # Hinterland
//!
//! A headless wilderness simulation: creatures on a generated terrain grid
//! take turns paid for in simulated time, choosing between competing
//! behaviours each time their delay runs out.
//!
//! The rules live in `hinterland_core`; this crate wires them to a
//! command-line driver.

pub mod app;
pub mod model;
