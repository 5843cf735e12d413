use serde::{Deserialize, Serialize};

/// Terrain type of a world cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    /// Returned for coordinates outside the grid.
    #[default]
    Empty,
    DeepWater,
    Water,
    Sand,
    Grass,
    /// Grass on a slope; grazeable.
    HillGrass,
    Hill,
    Mountain,
    HighMountain,
    /// Blocks movement and sight.
    Wall,
    /// Blocks movement and sight.
    ClosedDoor,
    OpenDoor,
}
