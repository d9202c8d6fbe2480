//! # Mapweave Common
//!
//! Common types, utilities, and shared abstractions for Mapweave.
//!
//! This crate provides foundational types used across all Mapweave crates:
//! - Identifier types (TerrainId, RuleId)
//! - Grid positions and terrain colors
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod color;
pub mod coords;
pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::color::*;
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_distance() {
        let a = GridPos::new(0, 0);
        let b = GridPos::new(3, 4);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
    }

    #[test]
    fn test_terrain_id_generation() {
        let id1 = TerrainId::new();
        let id2 = TerrainId::new();
        assert_ne!(id1, id2);
        assert!(!id1.is_blank());
    }

    #[test]
    fn test_blank_color_round_trip() {
        let parsed: TerrainColor = "#ffffff".parse().expect("valid color");
        assert_eq!(parsed, TerrainColor::BLANK);
        assert_eq!(parsed.to_string(), "#FFFFFF");
    }
}
