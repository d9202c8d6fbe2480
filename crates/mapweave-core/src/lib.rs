//! # Mapweave Core
//!
//! Weighted-random terrain grid generation for Mapweave.
//!
//! This crate handles:
//! - Terrain catalogs and the blank sentinel terrain
//! - Interaction rules (restrictions and linear modifications)
//! - Distance-based rule evaluation over the committed grid prefix
//! - Row-major grid generation from an injectable random source

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod distance;
pub mod evaluator;
pub mod generation;
pub mod grid;
pub mod interaction;
pub mod rng;
pub mod terrain;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::distance::*;
    pub use crate::evaluator::*;
    pub use crate::generation::*;
    pub use crate::grid::*;
    pub use crate::interaction::*;
    pub use crate::rng::*;
    pub use crate::terrain::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use mapweave_common::{GridPos, TerrainColor, TerrainId};

    #[test]
    fn test_catalog_to_grid() {
        let mut catalog = TerrainCatalog::new();
        let grass = catalog.add_terrain(TerrainType::new(
            "Grass",
            TerrainColor::rgb(0, 160, 0),
            1.0,
        ));
        let sand = catalog.add_terrain(TerrainType::new(
            "Sand",
            TerrainColor::rgb(230, 210, 160),
            0.0,
        ));

        let mut grid = MapGenerator::new(ReplaySource::constant(0.0)).generate(3, 3, &catalog);
        assert_eq!(grid.count_of(grass), 9);

        assert!(grid.update_tile(GridPos::new(1, 1), sand));
        assert_eq!(grid.count_of(grass), 8);
        assert_eq!(
            catalog
                .resolve(grid.get(GridPos::new(1, 1)).unwrap_or(TerrainId::BLANK))
                .name,
            "Sand"
        );
    }

    #[test]
    fn test_grid_serialization() {
        let grid = Grid::filled(2, 2, TerrainId::from_raw(7));
        let json = serde_json::to_string(&grid).expect("serialize failed");
        let loaded: Grid = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(loaded, grid);
    }
}
