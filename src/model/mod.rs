pub use hinterland_core::{BehaviourLogic, Board, CellLogic, Entity, WorldError};

pub mod config {
    pub use hinterland_core::config::*;
}
pub mod error {
    pub use hinterland_core::error::*;
}
pub mod events {
    pub use hinterland_core::events::*;
}
pub mod metrics {
    pub use hinterland_core::metrics::*;
}
pub mod occupancy {
    pub use hinterland_core::occupancy::*;
}
pub mod pathfinding {
    pub use hinterland_core::pathfinding::*;
}
pub mod scheduler {
    pub use hinterland_core::scheduler::*;
}
pub mod systems {
    pub use hinterland_core::systems::*;
}
pub mod terrain {
    pub use hinterland_core::terrain::*;
}
pub mod visibility {
    pub use hinterland_core::visibility::*;
}
pub mod world {
    pub use hinterland_core::world::*;
}
pub mod data {
    pub use hinterland_data::*;
}
