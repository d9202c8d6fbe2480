//! Interaction rules and their factory.
//!
//! A rule relates the terrain it is attached to with a set of other terrains
//! by distance. Restrictions zero out the selection weight inside their
//! range; modifications scale it by a factor blended linearly across the
//! range.

use mapweave_common::{InteractionResult, InvalidInteraction, RuleId, TerrainId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::distance::Bounds;

/// Kind of interaction, as requested by callers of the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Factor grows from the low to the high multiplier across the range.
    LinearIncrease,
    /// Factor shrinks from the high to the low multiplier across the range.
    LinearDecrease,
    /// Weight forced to zero inside the range.
    Restriction,
}

/// Direction of a modification blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `min` multiplier at the near edge, `max` at the far edge
    LinearIncrease,
    /// `max` multiplier at the near edge, `min` at the far edge
    LinearDecrease,
}

impl From<Direction> for InteractionKind {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::LinearIncrease => Self::LinearIncrease,
            Direction::LinearDecrease => Self::LinearDecrease,
        }
    }
}

/// What a rule does once the distance falls inside its range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleEffect {
    /// Multiply by zero.
    Restriction,
    /// Multiply by a linearly blended factor.
    Modification {
        /// Blend direction
        direction: Direction,
        /// Factor bounds
        multipliers: Bounds,
    },
}

/// Validated, immutable spatial modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRule {
    id: RuleId,
    range: Bounds,
    affected: BTreeSet<TerrainId>,
    effect: RuleEffect,
}

impl InteractionRule {
    /// Creates a restriction rule.
    pub fn create_restriction(
        terrain_ids: &[TerrainId],
        range: (f64, f64),
    ) -> InteractionResult<Self> {
        let affected = affected_terrains(terrain_ids)?;
        let range = validate_range(range)?;
        Ok(Self {
            id: RuleId::new(),
            range,
            affected,
            effect: RuleEffect::Restriction,
        })
    }

    /// Creates a linear modification rule.
    ///
    /// `kind` must be one of the linear kinds; restrictions have their own
    /// constructor.
    pub fn create_modification(
        kind: InteractionKind,
        terrain_ids: &[TerrainId],
        range: (f64, f64),
        multiplier_range: (f64, f64),
    ) -> InteractionResult<Self> {
        let direction = match kind {
            InteractionKind::LinearIncrease => Direction::LinearIncrease,
            InteractionKind::LinearDecrease => Direction::LinearDecrease,
            InteractionKind::Restriction => {
                return Err(InvalidInteraction::RestrictionAsModification)
            },
        };
        let affected = affected_terrains(terrain_ids)?;
        let range = validate_range(range)?;
        let multipliers = validate_multipliers(multiplier_range)?;
        Ok(Self {
            id: RuleId::new(),
            range,
            affected,
            effect: RuleEffect::Modification {
                direction,
                multipliers,
            },
        })
    }

    /// Rule identifier.
    #[must_use]
    pub const fn id(&self) -> RuleId {
        self.id
    }

    /// Distance range the rule is active in.
    #[must_use]
    pub const fn range(&self) -> Bounds {
        self.range
    }

    /// Terrains this rule reacts to.
    #[must_use]
    pub const fn affected(&self) -> &BTreeSet<TerrainId> {
        &self.affected
    }

    /// What the rule does inside its range.
    #[must_use]
    pub const fn effect(&self) -> RuleEffect {
        self.effect
    }

    /// Kind of this rule.
    #[must_use]
    pub fn kind(&self) -> InteractionKind {
        match self.effect {
            RuleEffect::Restriction => InteractionKind::Restriction,
            RuleEffect::Modification { direction, .. } => direction.into(),
        }
    }

    /// Checks if a cell holding `terrain` triggers this rule.
    #[must_use]
    pub fn affects(&self, terrain: TerrainId) -> bool {
        self.affected.contains(&terrain)
    }

    /// Factor this rule applies at `distance`, or `None` outside its range.
    #[must_use]
    pub fn factor_at(&self, distance: f64) -> Option<f64> {
        if !self.range.contains(distance) {
            return None;
        }
        let factor = match self.effect {
            RuleEffect::Restriction => 0.0,
            RuleEffect::Modification {
                direction,
                multipliers,
            } => {
                let t = self.range.fraction(distance);
                match direction {
                    Direction::LinearIncrease => multipliers.ascending(t),
                    Direction::LinearDecrease => multipliers.descending(t),
                }
            },
        };
        Some(factor)
    }
}

fn affected_terrains(terrain_ids: &[TerrainId]) -> InteractionResult<BTreeSet<TerrainId>> {
    if terrain_ids.len() < 2 {
        return Err(InvalidInteraction::TooFewTerrains(terrain_ids.len()));
    }
    Ok(terrain_ids.iter().copied().collect())
}

fn validate_range((min, max): (f64, f64)) -> InteractionResult<Bounds> {
    if min.is_nan() || max.is_nan() {
        return Err(InvalidInteraction::NotANumber("range"));
    }
    if min < 0.0 || max < 0.0 {
        return Err(InvalidInteraction::NegativeRange { min, max });
    }
    if min > max {
        return Err(InvalidInteraction::InvertedRange { min, max });
    }
    Ok(Bounds::new(min, max))
}

fn validate_multipliers((min, max): (f64, f64)) -> InteractionResult<Bounds> {
    if min.is_nan() || max.is_nan() {
        return Err(InvalidInteraction::NotANumber("multiplier"));
    }
    if min < 0.0 || max < 0.0 {
        return Err(InvalidInteraction::NegativeMultiplier { min, max });
    }
    if min > max {
        return Err(InvalidInteraction::InvertedMultiplier { min, max });
    }
    Ok(Bounds::new(min, max))
}
