//! Interaction evaluation.
//!
//! For a candidate terrain at a target cell, the evaluator walks the cells
//! already committed by the row-major fill and folds every matching rule's
//! factor into one multiplier.
//!
//! Only the rectangle of rows `[0, row)` and columns `[0, col)` is scanned.
//! Cells on the current row, and cells right of the current column on
//! earlier rows, never contribute. Later decisions therefore cannot change
//! earlier weights.
//!
//! Once the multiplier reaches zero the rest of the current row is skipped;
//! every following row is entered and skipped at its first column, so the
//! result stays zero.

use mapweave_common::GridPos;

use crate::distance::distance;
use crate::grid::Grid;
use crate::interaction::InteractionRule;
use crate::terrain::{TerrainCatalog, TerrainType};

/// Neutral multiplier of a terrain without rules.
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Work done by one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    /// Cells whose terrain was checked against the rules
    pub cells_visited: usize,
    /// Rows the scan started
    pub rows_entered: usize,
}

/// Result of scanning the committed prefix for one terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scan {
    /// Combined factor of all applicable rules
    pub multiplier: f64,
    /// Work done
    pub stats: ScanStats,
}

/// Computes interaction multipliers against a catalog's rule table.
#[derive(Debug, Clone, Copy)]
pub struct InteractionEvaluator<'a> {
    catalog: &'a TerrainCatalog,
}

impl<'a> InteractionEvaluator<'a> {
    /// Creates an evaluator resolving rules through `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a TerrainCatalog) -> Self {
        Self { catalog }
    }

    /// Combined multiplier for placing `terrain` at `pos`.
    #[must_use]
    pub fn compute_multiplier(&self, terrain: &TerrainType, grid: &Grid, pos: GridPos) -> f64 {
        self.scan(terrain, grid, pos).multiplier
    }

    /// Base probability scaled by the interaction multiplier.
    #[must_use]
    pub fn final_probability(&self, terrain: &TerrainType, grid: &Grid, pos: GridPos) -> f64 {
        terrain.base_probability * self.compute_multiplier(terrain, grid, pos)
    }

    /// Scans the committed prefix and reports the multiplier with its cost.
    #[must_use]
    pub fn scan(&self, terrain: &TerrainType, grid: &Grid, pos: GridPos) -> Scan {
        let mut stats = ScanStats::default();
        if terrain.rule_ids.is_empty() {
            return Scan {
                multiplier: NEUTRAL_MULTIPLIER,
                stats,
            };
        }

        let rules: Vec<&InteractionRule> = self.catalog.rules_of(terrain).collect();
        let mut multiplier = NEUTRAL_MULTIPLIER;

        for row in 0..pos.row {
            stats.rows_entered += 1;
            for col in 0..pos.col {
                if multiplier == 0.0 {
                    break;
                }
                let scanned = GridPos::new(row, col);
                let Some(neighbor) = grid.get(scanned) else {
                    continue;
                };
                stats.cells_visited += 1;

                let d = distance(pos, scanned);
                for rule in rules.iter().filter(|rule| rule.affects(neighbor)) {
                    if let Some(factor) = rule.factor_at(d) {
                        multiplier *= factor;
                    }
                }
            }
        }

        Scan { multiplier, stats }
    }
}
