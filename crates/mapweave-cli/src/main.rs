//! # Mapweave
//!
//! Command line entry point for Mapweave - weighted-random terrain grids
//! shaped by distance-based interaction rules.
//!
//! This binary ties the pieces together:
//! - Config: TOML scenarios describing terrains and rules
//! - Core: catalog construction and grid generation
//! - Output: text previews and JSON dumps

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod output;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mapweave_core::MapGenerator;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ScenarioConfig;
use crate::output::OutputFormat;

/// Generate a terrain grid from a scenario.
#[derive(Debug, Parser)]
#[command(name = "mapweave", version, about)]
struct Cli {
    /// Scenario file (TOML); the built-in scenario is used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the scenario width
    #[arg(long)]
    width: Option<u32>,

    /// Override the scenario height
    #[arg(long)]
    height: Option<u32>,

    /// Override the scenario seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Hide grid lines in the text preview
    #[arg(long)]
    no_grid_lines: bool,

    /// Write the built-in scenario to this path and exit
    #[arg(long, value_name = "PATH")]
    write_default: Option<PathBuf>,
}

impl Cli {
    /// Load the scenario and apply command line overrides.
    fn scenario(&self) -> Result<ScenarioConfig> {
        let mut config = match &self.config {
            Some(path) => ScenarioConfig::load_from(path)?,
            None => ScenarioConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_grid_lines {
            config.show_grid_lines = false;
        }
        Ok(config)
    }
}

/// Main entry point.
fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("mapweave=info".parse()?))
        .init();

    let cli = Cli::parse();

    if let Some(path) = &cli.write_default {
        ScenarioConfig::default().save_to(path)?;
        return Ok(());
    }

    let scenario = cli.scenario()?;
    let catalog = scenario.build_catalog()?;

    let mut generator = match scenario.seed {
        Some(seed) => {
            info!("Using seed {seed}");
            MapGenerator::with_seed(seed)
        },
        None => MapGenerator::from_entropy(),
    };
    let mut grid = generator.generate(scenario.width, scenario.height, &catalog);
    grid.set_grid_lines(scenario.show_grid_lines);

    let rendered = output::render(cli.format, &grid, &catalog)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write map")?;
    stdout.flush().context("failed to flush output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "mapweave",
            "--width",
            "24",
            "--seed",
            "7",
            "--no-grid-lines",
            "--format",
            "json",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);

        let scenario = cli.scenario().expect("built-in scenario");
        assert_eq!(scenario.width, 24);
        assert_eq!(scenario.height, 10);
        assert_eq!(scenario.seed, Some(7));
        assert!(!scenario.show_grid_lines);
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let cli = Cli::parse_from(["mapweave", "--config", "/nonexistent/scenario.toml"]);
        assert!(cli.scenario().is_err());
    }

    #[test]
    fn test_seeded_runs_match() {
        let scenario = ScenarioConfig {
            seed: Some(2024),
            ..ScenarioConfig::default()
        };
        let catalog = scenario.build_catalog().expect("catalog");
        let a = MapGenerator::with_seed(2024).generate(scenario.width, scenario.height, &catalog);
        let b = MapGenerator::with_seed(2024).generate(scenario.width, scenario.height, &catalog);
        assert_eq!(
            output::render_text(&a, &catalog),
            output::render_text(&b, &catalog)
        );
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
