//! Grid coordinate types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a cell in a grid.
///
/// Rows grow downward and are filled first-to-last; columns grow to the
/// right. Ordering is row-major, matching the generation fill order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct GridPos {
    /// Row index
    pub row: u32,
    /// Column index
    pub col: u32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Euclidean distance to another position, in cells.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        let dr = f64::from(self.row) - f64::from(other.row);
        let dc = f64::from(self.col) - f64::from(other.col);
        (dr * dr + dc * dc).sqrt()
    }

    /// Converts to linear row-major index for a grid of the given width.
    #[must_use]
    pub const fn to_index(self, width: u32) -> usize {
        (self.row as usize) * (width as usize) + (self.col as usize)
    }

    /// Creates from a linear row-major index.
    #[must_use]
    pub const fn from_index(index: usize, width: u32) -> Self {
        let width = width as usize;
        Self {
            row: (index / width) as u32,
            col: (index % width) as u32,
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_conversion() {
        let pos = GridPos::new(2, 3);
        let index = pos.to_index(5);
        assert_eq!(index, 13);
        assert_eq!(GridPos::from_index(index, 5), pos);
    }

    #[test]
    fn test_row_major_ordering() {
        assert!(GridPos::new(0, 9) < GridPos::new(1, 0));
        assert!(GridPos::new(1, 0) < GridPos::new(1, 1));
    }

    #[test]
    fn test_distance_diagonal() {
        let d = GridPos::new(1, 1).distance_to(GridPos::new(0, 0));
        assert!((d - std::f64::consts::SQRT_2).abs() < 1e-12);
    }
}
