//! Grid output formats.

use anyhow::{Context, Result};
use clap::ValueEnum;
use mapweave_common::{TerrainColor, TerrainId};
use mapweave_core::{Grid, TerrainCatalog};
use serde::Serialize;
use std::fmt::Write as _;

/// Label used for blank cells in legends.
const BLANK_LABEL: &str = "(blank)";

/// How the generated grid is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One symbol per cell plus a legend
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// One legend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry<'a> {
    /// Terrain ID as stored in cells
    pub id: TerrainId,
    /// Display name
    pub name: &'a str,
    /// Display color
    pub color: TerrainColor,
    /// Preview symbol
    pub symbol: char,
    /// Number of cells holding this terrain
    pub cells: usize,
}

#[derive(Serialize)]
struct MapReport<'a> {
    width: u32,
    height: u32,
    show_grid_lines: bool,
    legend: Vec<LegendEntry<'a>>,
    cells: &'a [Vec<TerrainId>],
}

/// Legend for every catalog terrain, plus the blank terrain if it occurs.
pub fn legend<'a>(grid: &Grid, catalog: &'a TerrainCatalog) -> Vec<LegendEntry<'a>> {
    let mut entries: Vec<_> = catalog
        .iter()
        .map(|terrain| LegendEntry {
            id: terrain.id,
            name: terrain.name.as_str(),
            color: terrain.color,
            symbol: terrain.symbol(),
            cells: grid.count_of(terrain.id),
        })
        .collect();

    let blanks = grid.count_of(TerrainId::BLANK);
    if blanks > 0 {
        let blank = TerrainCatalog::blank_terrain();
        entries.push(LegendEntry {
            id: blank.id,
            name: BLANK_LABEL,
            color: blank.color,
            symbol: blank.symbol(),
            cells: blanks,
        });
    }
    entries
}

/// Render the grid as text, one line per row.
///
/// Cells are separated by a space while grid lines are shown.
pub fn render_text(grid: &Grid, catalog: &TerrainCatalog) -> String {
    let mut out = String::new();
    if grid.is_empty() {
        let _ = writeln!(out, "({}x{} map has no cells)", grid.width(), grid.height());
        return out;
    }

    let separator = if grid.show_grid_lines() { " " } else { "" };
    for row in grid.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|id| catalog.resolve(*id).symbol().to_string())
            .collect();
        out.push_str(&line.join(separator));
        out.push('\n');
    }

    out.push('\n');
    for entry in legend(grid, catalog) {
        let _ = writeln!(
            out,
            "{}  {:<12} {}  {}",
            entry.symbol, entry.name, entry.color, entry.cells
        );
    }
    out
}

/// Render the grid and its legend as pretty JSON.
pub fn render_json(grid: &Grid, catalog: &TerrainCatalog) -> Result<String> {
    let report = MapReport {
        width: grid.width(),
        height: grid.height(),
        show_grid_lines: grid.show_grid_lines(),
        legend: legend(grid, catalog),
        cells: grid.cells(),
    };
    serde_json::to_string_pretty(&report).context("failed to serialize map")
}

/// Render in the requested format.
pub fn render(format: OutputFormat, grid: &Grid, catalog: &TerrainCatalog) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(grid, catalog)),
        OutputFormat::Json => render_json(grid, catalog),
    }
}
