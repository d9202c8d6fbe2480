//! The terrain grid.

use mapweave_common::{GridPos, TerrainId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Row-major grid of terrain IDs.
///
/// Grids narrower or shorter than [`Grid::MIN_SIZE`] keep their dimensions
/// but hold no cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Vec<TerrainId>>,
    show_grid_lines: bool,
}

impl Grid {
    /// Smallest width and height that gets cells.
    pub const MIN_SIZE: u32 = 2;

    /// Width and height of the starting grid.
    pub const INITIAL_SIZE: u32 = 10;

    /// Checks if the given dimensions are too small to hold cells.
    #[must_use]
    pub const fn is_degenerate_size(width: u32, height: u32) -> bool {
        width < Self::MIN_SIZE || height < Self::MIN_SIZE
    }

    /// Creates a grid where every cell holds `terrain`.
    #[must_use]
    pub fn filled(width: u32, height: u32, terrain: TerrainId) -> Self {
        let cells = if Self::is_degenerate_size(width, height) {
            Vec::new()
        } else {
            vec![vec![terrain; width as usize]; height as usize]
        };
        Self {
            width,
            height,
            cells,
            show_grid_lines: true,
        }
    }

    /// Creates a grid of blank cells.
    #[must_use]
    pub fn blank(width: u32, height: u32) -> Self {
        Self::filled(width, height, TerrainId::BLANK)
    }

    /// The all-blank starting grid, shown before any terrain exists.
    #[must_use]
    pub fn initial() -> Self {
        Self::blank(Self::INITIAL_SIZE, Self::INITIAL_SIZE)
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether grid lines should be drawn.
    #[must_use]
    pub const fn show_grid_lines(&self) -> bool {
        self.show_grid_lines
    }

    /// Sets the grid-line display flag.
    pub fn set_grid_lines(&mut self, show: bool) {
        self.show_grid_lines = show;
    }

    /// Flips the grid-line display flag and returns the new value.
    ///
    /// Cells are untouched.
    pub fn toggle_grid_lines(&mut self) -> bool {
        self.show_grid_lines = !self.show_grid_lines;
        self.show_grid_lines
    }

    /// Checks if the grid holds no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All rows, top to bottom.
    #[must_use]
    pub fn cells(&self) -> &[Vec<TerrainId>] {
        &self.cells
    }

    /// Iterates rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[TerrainId]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Iterates every cell with its position, in fill order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, TerrainId)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, id)| (GridPos::new(row as u32, col as u32), *id))
        })
    }

    /// Terrain at `pos`, if the position is inside the grid.
    #[must_use]
    pub fn get(&self, pos: GridPos) -> Option<TerrainId> {
        self.cells
            .get(pos.row as usize)?
            .get(pos.col as usize)
            .copied()
    }

    /// Number of cells holding `terrain`.
    #[must_use]
    pub fn count_of(&self, terrain: TerrainId) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|id| **id == terrain)
            .count()
    }

    /// Overwrites a single cell.
    ///
    /// No interaction rule is re-evaluated, neither for this cell nor for any
    /// neighbor. Returns `false` (and leaves the grid alone) when `pos` is
    /// outside the grid.
    pub fn update_tile(&mut self, pos: GridPos, terrain: TerrainId) -> bool {
        if self.set(pos, terrain) {
            true
        } else {
            warn!(
                "Ignoring tile update at {pos}, outside {}x{} grid",
                self.width, self.height
            );
            false
        }
    }

    pub(crate) fn set(&mut self, pos: GridPos, terrain: TerrainId) -> bool {
        match self
            .cells
            .get_mut(pos.row as usize)
            .and_then(|row| row.get_mut(pos.col as usize))
        {
            Some(cell) => {
                *cell = terrain;
                true
            },
            None => false,
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_sizes_have_no_cells() {
        for (w, h) in [(0, 0), (1, 10), (10, 1), (1, 1)] {
            let grid = Grid::blank(w, h);
            assert!(grid.is_empty(), "{w}x{h}");
            assert_eq!(grid.width(), w);
            assert_eq!(grid.height(), h);
        }
    }

    #[test]
    fn test_shape_is_height_rows_by_width_columns() {
        let grid = Grid::blank(4, 3);
        assert_eq!(grid.cells().len(), 3);
        assert!(grid.rows().all(|row| row.len() == 4));
        assert_eq!(grid.iter().count(), 12);
    }

    #[test]
    fn test_initial_grid() {
        let grid = Grid::initial();
        assert_eq!((grid.width(), grid.height()), (10, 10));
        assert!(grid.show_grid_lines());
        assert_eq!(grid.count_of(TerrainId::BLANK), 100);
    }

    #[test]
    fn test_update_tile_touches_only_target() {
        let mut grid = Grid::blank(3, 3);
        let before = grid.clone();
        let terrain = TerrainId::new();
        let target = GridPos::new(1, 2);

        assert!(grid.update_tile(target, terrain));
        for (pos, id) in grid.iter() {
            if pos == target {
                assert_eq!(id, terrain);
            } else {
                assert_eq!(Some(id), before.get(pos));
            }
        }
    }

    #[test]
    fn test_update_tile_out_of_bounds() {
        let mut grid = Grid::blank(3, 3);
        let before = grid.clone();
        assert!(!grid.update_tile(GridPos::new(3, 0), TerrainId::new()));
        assert!(!grid.update_tile(GridPos::new(0, 3), TerrainId::new()));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_toggle_grid_lines_keeps_cells() {
        let mut grid = Grid::filled(3, 2, TerrainId::new());
        let cells = grid.cells().to_vec();
        assert!(!grid.toggle_grid_lines());
        assert!(grid.toggle_grid_lines());
        assert_eq!(grid.cells(), cells.as_slice());
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = Grid::blank(2, 2);
        let order: Vec<_> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(
            order,
            vec![
                GridPos::new(0, 0),
                GridPos::new(0, 1),
                GridPos::new(1, 0),
                GridPos::new(1, 1)
            ]
        );
    }
}
