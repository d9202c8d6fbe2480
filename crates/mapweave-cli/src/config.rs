//! Scenario configuration.
//!
//! A scenario names the grid size, the random seed, the terrains and the
//! interaction rules between them. Scenarios are TOML files; the core only
//! checks rule-local invariants, so the terrain-level policy (unique names
//! and colors, probability range, size range) is enforced here.

use std::fs;
use std::path::Path;

use ahash::AHashSet;
use anyhow::{bail, Context, Result};
use mapweave_common::{TerrainColor, TerrainId};
use mapweave_core::{InteractionKind, InteractionRule, TerrainCatalog, TerrainType};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Smallest accepted grid side.
pub const MIN_SIZE: u32 = 2;
/// Largest accepted grid side.
pub const MAX_SIZE: u32 = 1500;
/// Largest accepted base probability.
pub const MAX_PROBABILITY: f64 = 1000.0;

/// One terrain entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Display name
    pub name: String,
    /// `#RRGGBB` color
    pub color: TerrainColor,
    /// Base selection weight
    pub probability: f64,
}

/// One interaction rule entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Rule kind
    pub kind: InteractionKind,
    /// Names of the terrains the rule reacts to
    pub terrains: Vec<String>,
    /// Distance range `[min, max]`
    pub range: [f64; 2],
    /// Multiplier range `[min, max]`, modifications only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multipliers: Option<[f64; 2]>,
    /// Names of the terrains carrying the rule (defaults to `terrains`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_to: Option<Vec<String>>,
}

/// A complete generation scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Grid width in cells
    pub width: u32,
    /// Grid height in cells
    pub height: u32,
    /// Random seed (None = fresh entropy)
    pub seed: Option<u64>,
    /// Draw grid lines in previews
    pub show_grid_lines: bool,
    /// Terrains, in draw order
    pub terrains: Vec<TerrainConfig>,
    /// Interaction rules
    pub rules: Vec<RuleConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: None,
            show_grid_lines: true,
            terrains: vec![
                TerrainConfig {
                    name: "Grass".to_string(),
                    color: TerrainColor::rgb(0x4C, 0xAF, 0x50),
                    probability: 60.0,
                },
                TerrainConfig {
                    name: "Sand".to_string(),
                    color: TerrainColor::rgb(0xE6, 0xD6, 0x90),
                    probability: 25.0,
                },
                TerrainConfig {
                    name: "Water".to_string(),
                    color: TerrainColor::rgb(0x21, 0x96, 0xF3),
                    probability: 15.0,
                },
            ],
            rules: vec![
                // Water off the edges needs Water at its upper-left diagonal.
                RuleConfig {
                    kind: InteractionKind::Restriction,
                    terrains: vec!["Grass".to_string(), "Sand".to_string()],
                    range: [0.0, 1.5],
                    multipliers: None,
                    attach_to: Some(vec!["Water".to_string()]),
                },
                // Sand clusters around nearby Water and Sand.
                RuleConfig {
                    kind: InteractionKind::LinearDecrease,
                    terrains: vec!["Water".to_string(), "Sand".to_string()],
                    range: [0.0, 4.0],
                    multipliers: Some([1.0, 3.0]),
                    attach_to: Some(vec!["Sand".to_string()]),
                },
            ],
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from `path`.
    /// The file was named explicitly, so a missing file is an error.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            bail!("scenario {} not found", path.display());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse scenario {}", path.display()))?;
        info!("Loaded scenario from {}", path.display());
        Ok(config)
    }

    /// Save the scenario to `path`.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("failed to serialize scenario")?;
        fs::write(path, contents)
            .with_context(|| format!("failed to write scenario {}", path.display()))?;

        info!("Saved scenario to {}", path.display());
        Ok(())
    }

    /// Check the terrain-level rules the core leaves to its callers.
    pub fn validate(&self) -> Result<()> {
        for (label, side) in [("width", self.width), ("height", self.height)] {
            if !(MIN_SIZE..=MAX_SIZE).contains(&side) {
                bail!("{label} {side} is outside {MIN_SIZE}..={MAX_SIZE}");
            }
        }

        let mut names = AHashSet::new();
        let mut colors = AHashSet::new();
        for terrain in &self.terrains {
            if terrain.name.trim().is_empty() {
                bail!("terrain names must not be empty");
            }
            if !names.insert(terrain.name.as_str()) {
                bail!("terrain name {:?} is used twice", terrain.name);
            }
            if terrain.color.is_blank() {
                bail!(
                    "terrain {:?} uses {}, which is reserved for blank cells",
                    terrain.name,
                    TerrainColor::BLANK
                );
            }
            if !colors.insert(terrain.color) {
                bail!("color {} is used twice", terrain.color);
            }
            if !(terrain.probability > 0.0 && terrain.probability <= MAX_PROBABILITY) {
                bail!(
                    "terrain {:?} probability {} is outside (0, {MAX_PROBABILITY}]",
                    terrain.name,
                    terrain.probability
                );
            }
        }
        Ok(())
    }

    /// Build a catalog from the scenario, creating and attaching every rule.
    pub fn build_catalog(&self) -> Result<TerrainCatalog> {
        self.validate()?;

        let mut catalog = TerrainCatalog::new();
        for terrain in &self.terrains {
            catalog.add_terrain(TerrainType::new(
                terrain.name.clone(),
                terrain.color,
                terrain.probability,
            ));
        }

        for (index, rule) in self.rules.iter().enumerate() {
            let affected = resolve_names(&catalog, &rule.terrains)
                .with_context(|| format!("rule {index}"))?;
            let carriers = match &rule.attach_to {
                Some(names) => {
                    resolve_names(&catalog, names).with_context(|| format!("rule {index}"))?
                },
                None => affected.clone(),
            };

            let [min, max] = rule.range;
            let built = match rule.kind {
                InteractionKind::Restriction => {
                    InteractionRule::create_restriction(&affected, (min, max))
                },
                kind => {
                    let Some([low, high]) = rule.multipliers else {
                        bail!("rule {index}: {kind:?} needs `multipliers = [min, max]`");
                    };
                    InteractionRule::create_modification(kind, &affected, (min, max), (low, high))
                },
            }
            .with_context(|| format!("rule {index} is invalid"))?;

            catalog.add_interaction_rule(built, &carriers);
        }

        info!(
            "Built catalog with {} terrains and {} rules",
            catalog.len(),
            catalog.rule_count()
        );
        Ok(catalog)
    }
}

fn resolve_names(catalog: &TerrainCatalog, names: &[String]) -> Result<Vec<TerrainId>> {
    names
        .iter()
        .map(|name| {
            catalog
                .find_by_name(name)
                .map(|t| t.id)
                .with_context(|| format!("unknown terrain {name:?}"))
        })
        .collect()
}
