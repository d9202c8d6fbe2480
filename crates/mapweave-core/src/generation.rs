//! Procedural map generation.
//!
//! Cells are filled in row-major order. For each cell every catalog terrain
//! gets a weight of `base_probability * multiplier`; terrains with a positive
//! weight form the probability pool and one of them is drawn. The choice is
//! written before the next cell is considered, so later cells see it.
//!
//! Each cell scans the whole committed prefix, which makes a full pass
//! quadratic in the number of cells. On large grids, modification factors
//! above 1 compound across that prefix and can reach infinity; the pool
//! rescales its weights in that case instead of dropping the cell to blank.

use std::time::Instant;

use mapweave_common::{GridPos, TerrainId};
use tracing::{debug, info, warn};

use crate::evaluator::InteractionEvaluator;
use crate::grid::Grid;
use crate::rng::RandomSource;
use crate::terrain::TerrainCatalog;

/// Cell count above which a generation pass logs a cost warning.
pub const LARGE_GRID_CELLS: u64 = 250_000;

/// Terrains eligible for one cell, with their weights in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbabilityPool {
    candidates: Vec<(TerrainId, f64)>,
    total: f64,
}

impl ProbabilityPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a candidate; weights that are not strictly positive are dropped.
    pub fn push(&mut self, terrain: TerrainId, weight: f64) -> bool {
        if weight > 0.0 {
            self.candidates.push((terrain, weight));
            self.total += weight;
            true
        } else {
            false
        }
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Checks if no terrain is eligible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Sum of all candidate weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Candidates with their weights.
    #[must_use]
    pub fn candidates(&self) -> &[(TerrainId, f64)] {
        &self.candidates
    }

    /// Selects the candidate whose interval `[running, running + weight)`
    /// contains `unit * total`.
    ///
    /// Long chains of factors above 1 can overflow weights, or their sum, to
    /// infinity. The draw then runs over weights scaled by the largest one;
    /// if that is itself infinite, the infinite candidates share the draw
    /// evenly.
    ///
    /// Returns `None` for an empty pool, or when rounding pushes the draw
    /// past the last interval.
    #[must_use]
    pub fn pick(&self, unit: f64) -> Option<TerrainId> {
        if self.total.is_finite() {
            return draw_interval(self.candidates.iter().copied(), self.total, unit);
        }

        let largest = self
            .candidates
            .iter()
            .map(|&(_, weight)| weight)
            .fold(0.0, f64::max);
        let scaled: Vec<(TerrainId, f64)> = self
            .candidates
            .iter()
            .map(|&(terrain, weight)| {
                let weight = if largest.is_infinite() {
                    if weight.is_infinite() { 1.0 } else { 0.0 }
                } else {
                    weight / largest
                };
                (terrain, weight)
            })
            .collect();
        let total = scaled.iter().map(|&(_, weight)| weight).sum();
        draw_interval(scaled.into_iter(), total, unit)
    }
}

fn draw_interval(
    candidates: impl Iterator<Item = (TerrainId, f64)>,
    total: f64,
    unit: f64,
) -> Option<TerrainId> {
    let draw = unit * total;
    let mut running = 0.0;
    for (terrain, weight) in candidates {
        if draw >= running && draw < running + weight {
            return Some(terrain);
        }
        running += weight;
    }
    None
}

/// Weighted-random grid generator.
///
/// The random source is injected so passes can be reproduced from a seed or
/// a recorded draw sequence.
#[derive(Debug, Clone)]
pub struct MapGenerator<R = fastrand::Rng> {
    rng: R,
}

impl MapGenerator<fastrand::Rng> {
    /// Creates a generator with a seeded random source.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(fastrand::Rng::with_seed(seed))
    }

    /// Creates a generator seeded from system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(fastrand::Rng::new())
    }
}

impl<R: RandomSource> MapGenerator<R> {
    /// Creates a generator drawing from `rng`.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the random source.
    #[must_use]
    pub const fn rng(&self) -> &R {
        &self.rng
    }

    /// Consumes the generator, returning its random source.
    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Generates a `width` x `height` grid from `catalog`.
    ///
    /// Never fails: degenerate sizes give an empty grid, and cells with an
    /// empty pool get the blank terrain.
    pub fn generate(&mut self, width: u32, height: u32, catalog: &TerrainCatalog) -> Grid {
        if Grid::is_degenerate_size(width, height) {
            debug!("Degenerate map size {width}x{height}, no cells generated");
            return Grid::blank(width, height);
        }

        let cells = u64::from(width) * u64::from(height);
        if cells > LARGE_GRID_CELLS {
            warn!("Generating {cells} cells; interaction scans grow quadratically with cell count");
        }
        info!(
            "Generating {width}x{height} map from {} terrains",
            catalog.len()
        );

        let start = Instant::now();
        let evaluator = InteractionEvaluator::new(catalog);
        let mut grid = Grid::blank(width, height);
        let mut blanks = 0usize;

        for row in 0..height {
            for col in 0..width {
                let pos = GridPos::new(row, col);
                let chosen = self.pick_terrain(&evaluator, catalog, &grid, pos);
                if chosen.is_blank() {
                    blanks += 1;
                }
                grid.set(pos, chosen);
            }
        }

        if blanks > 0 {
            debug!("{blanks} cells fell back to the blank terrain");
        }
        info!(
            "Generated {width}x{height} map in {:.2?}",
            start.elapsed()
        );
        grid
    }

    /// Generates a fresh grid at `grid`'s dimensions, keeping its grid-line flag.
    pub fn regenerate(&mut self, grid: &Grid, catalog: &TerrainCatalog) -> Grid {
        self.resize(grid, grid.width(), grid.height(), catalog)
    }

    /// Generates a fresh grid at new dimensions, keeping `grid`'s grid-line flag.
    pub fn resize(
        &mut self,
        grid: &Grid,
        width: u32,
        height: u32,
        catalog: &TerrainCatalog,
    ) -> Grid {
        let mut next = self.generate(width, height, catalog);
        next.set_grid_lines(grid.show_grid_lines());
        next
    }

    /// Builds the pool for `pos` and draws from it.
    fn pick_terrain(
        &mut self,
        evaluator: &InteractionEvaluator<'_>,
        catalog: &TerrainCatalog,
        grid: &Grid,
        pos: GridPos,
    ) -> TerrainId {
        let mut pool = ProbabilityPool::new();
        for terrain in catalog.iter() {
            // A non-positive base weight stays non-positive whatever the rules say.
            if terrain.base_probability > 0.0 {
                pool.push(terrain.id, evaluator.final_probability(terrain, grid, pos));
            }
        }

        if pool.is_empty() {
            return TerrainId::BLANK;
        }
        pool.pick(self.rng.next_unit()).unwrap_or(TerrainId::BLANK)
    }
}
