pub mod ai;
pub mod behaviour;
pub mod bump;
pub mod interaction;
pub mod ranged;

pub use ai::{Arbiter, Decision, TurnOutcome};
pub use behaviour::{BehaviourLogic, Evaluation, Intent};
pub use bump::BumpResolver;
pub use interaction::{Attack, Crush, Harvest, Interaction, MoveHandler, Movement};
pub use ranged::Inventory;

/// Delays at or below this count as elapsed.
pub const EPSILON: f32 = 1e-4;
