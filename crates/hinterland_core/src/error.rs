//! Error types for hinterland_core.
//!
//! Gameplay queries never fail: out-of-bounds coordinates are sentinels and
//! missing paths are `None`. These errors cover construction-time mistakes
//! only.

use thiserror::Error;

/// Main error type for hinterland_core operations.
#[derive(Error, Debug)]
pub enum WorldError {
    /// Grid dimensions must both be positive
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// Configuration values outside their valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Creature record rejected by validation
    #[error("Invalid creature template '{name}': {reason}")]
    Template { name: String, reason: String },

    /// Placement target is off the map, blocked or taken
    #[error("Cannot place at ({x}, {y}): {reason}")]
    CellUnavailable { x: i32, y: i32, reason: &'static str },

    /// The entity is not alive in the arena
    #[error("No such entity: {0:?}")]
    NoSuchEntity(hecs::Entity),
}

/// Result type alias for hinterland_core operations.
pub type Result<T> = std::result::Result<T, WorldError>;

impl WorldError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Creates a new template error.
    #[must_use]
    pub fn template<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Self::Template {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WorldError::InvalidDimensions {
            width: -1,
            height: 10,
        };
        assert_eq!(err.to_string(), "Invalid grid dimensions: -1x10");
    }

    #[test]
    fn test_template_error() {
        let err = WorldError::template("wolf", "sight must be positive");
        assert!(err.to_string().contains("wolf"));
        assert!(err.to_string().contains("sight"));
    }
}
