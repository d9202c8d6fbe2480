//! ID types for terrains and interaction rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for terrain IDs.
static TERRAIN_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Global counter for rule IDs.
static RULE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of a terrain type.
///
/// Grid cells store these instead of terrain records, so editing the catalog
/// never aliases into an already generated grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainId(u64);

impl TerrainId {
    /// Reserved ID of the blank sentinel terrain.
    pub const BLANK: Self = Self(0);

    /// Creates a new unique terrain ID.
    #[must_use]
    pub fn new() -> Self {
        Self(TERRAIN_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a terrain ID from a raw value (for deserialization).
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Checks if this is the blank sentinel ID.
    #[must_use]
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }
}

impl Default for TerrainId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TerrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "terrain#{}", self.0)
    }
}

/// Identifier of an interaction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(u64);

impl RuleId {
    /// Creates a new unique rule ID.
    #[must_use]
    pub fn new() -> Self {
        Self(RULE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a rule ID from a raw value.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule#{}", self.0)
    }
}
