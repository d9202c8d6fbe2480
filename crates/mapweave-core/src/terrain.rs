//! Terrain types and the terrain catalog.
//!
//! The catalog owns terrain definitions (in draw order) and the table of
//! interaction rules they reference. Name and color uniqueness is a caller
//! contract: the catalog stores whatever it is given, the way the rule
//! factory only checks rule-local invariants.

use ahash::AHashMap;
use mapweave_common::{RuleId, TerrainColor, TerrainId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::interaction::InteractionRule;

/// The shared blank sentinel.
static BLANK_TERRAIN: TerrainType = TerrainType {
    id: TerrainId::BLANK,
    name: String::new(),
    color: TerrainColor::BLANK,
    base_probability: 0.0,
    rule_ids: Vec::new(),
};

/// A named, colored terrain category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainType {
    /// Stable identifier
    pub id: TerrainId,
    /// Display name, unique within a catalog
    pub name: String,
    /// Display color, unique within a catalog; `#FFFFFF` is reserved
    pub color: TerrainColor,
    /// Base selection weight, `0 < p <= 1000` for user terrains
    pub base_probability: f64,
    /// Attached interaction rules, in evaluation order
    pub rule_ids: Vec<RuleId>,
}

impl TerrainType {
    /// Creates a terrain with a fresh ID and no rules.
    #[must_use]
    pub fn new(name: impl Into<String>, color: TerrainColor, base_probability: f64) -> Self {
        Self {
            id: TerrainId::new(),
            name: name.into(),
            color,
            base_probability,
            rule_ids: Vec::new(),
        }
    }

    /// Checks if this is the blank sentinel.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.id.is_blank()
    }

    /// Character used for text previews.
    #[must_use]
    pub fn symbol(&self) -> char {
        self.name.chars().next().unwrap_or('.')
    }
}

/// Ordered collection of terrain types plus the rules they reference.
///
/// Callers must not mutate a catalog while a generation pass reads it;
/// clone it first to take a snapshot.
#[derive(Debug, Clone, Default)]
pub struct TerrainCatalog {
    terrains: Vec<TerrainType>,
    rules: AHashMap<RuleId, InteractionRule>,
}

impl TerrainCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared blank sentinel terrain.
    #[must_use]
    pub fn blank_terrain() -> &'static TerrainType {
        &BLANK_TERRAIN
    }

    /// Appends a terrain and returns its ID.
    pub fn add_terrain(&mut self, terrain: TerrainType) -> TerrainId {
        let id = terrain.id;
        debug!("Adding terrain {:?} as {id}", terrain.name);
        self.terrains.push(terrain);
        id
    }

    /// Removes a terrain, dropping rules nothing references anymore.
    pub fn remove_terrain(&mut self, id: TerrainId) -> Option<TerrainType> {
        let index = self.terrains.iter().position(|t| t.id == id)?;
        let removed = self.terrains.remove(index);
        for rule_id in &removed.rule_ids {
            self.prune_rule(*rule_id);
        }
        Some(removed)
    }

    /// Replaces the terrain with the same ID, keeping its draw position.
    ///
    /// Rule references the catalog does not know are dropped, and rules the
    /// old record referenced but the new one does not are pruned.
    pub fn update_terrain(&mut self, mut terrain: TerrainType) -> bool {
        let Some(index) = self.terrains.iter().position(|t| t.id == terrain.id) else {
            warn!("Cannot update unknown terrain {}", terrain.id);
            return false;
        };

        let rules = &self.rules;
        let mut seen = Vec::with_capacity(terrain.rule_ids.len());
        terrain.rule_ids.retain(|rule_id| {
            if !rules.contains_key(rule_id) {
                warn!("Dropping unknown {rule_id} from terrain {}", terrain.id);
                return false;
            }
            if seen.contains(rule_id) {
                return false;
            }
            seen.push(*rule_id);
            true
        });

        let old = std::mem::replace(&mut self.terrains[index], terrain);
        for rule_id in old.rule_ids {
            self.prune_rule(rule_id);
        }
        true
    }

    /// Looks up a terrain by ID.
    #[must_use]
    pub fn get(&self, id: TerrainId) -> Option<&TerrainType> {
        self.terrains.iter().find(|t| t.id == id)
    }

    /// Looks up a terrain by name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&TerrainType> {
        self.terrains.iter().find(|t| t.name == name)
    }

    /// Looks up a terrain, falling back to the blank sentinel.
    #[must_use]
    pub fn resolve(&self, id: TerrainId) -> &TerrainType {
        self.get(id).unwrap_or(&BLANK_TERRAIN)
    }

    /// Iterates terrains in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &TerrainType> {
        self.terrains.iter()
    }

    /// Number of terrains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terrains.len()
    }

    /// Checks if the catalog holds no terrains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terrains.is_empty()
    }

    /// Registers `rule` and attaches it to every terrain in `terrain_ids`.
    ///
    /// Unknown IDs are skipped. A terrain already carrying the rule is not
    /// given a second reference.
    pub fn add_interaction_rule(
        &mut self,
        rule: InteractionRule,
        terrain_ids: &[TerrainId],
    ) -> RuleId {
        let rule_id = rule.id();
        self.rules.insert(rule_id, rule);

        for id in terrain_ids {
            match self.terrains.iter_mut().find(|t| t.id == *id) {
                Some(terrain) if !terrain.rule_ids.contains(&rule_id) => {
                    terrain.rule_ids.push(rule_id);
                },
                Some(_) => {},
                None => warn!("Skipping {rule_id} attachment to unknown terrain {id}"),
            }
        }

        self.prune_rule(rule_id);
        rule_id
    }

    /// Detaches `rule_id` from one terrain only.
    pub fn remove_interaction_rule(&mut self, terrain_id: TerrainId, rule_id: RuleId) -> bool {
        let Some(terrain) = self.terrains.iter_mut().find(|t| t.id == terrain_id) else {
            return false;
        };
        let Some(index) = terrain.rule_ids.iter().position(|r| *r == rule_id) else {
            return false;
        };
        terrain.rule_ids.remove(index);
        self.prune_rule(rule_id);
        true
    }

    /// Looks up a rule by ID.
    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<&InteractionRule> {
        self.rules.get(&id)
    }

    /// Number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Rules attached to `terrain`, in attachment order.
    pub fn rules_of<'a>(
        &'a self,
        terrain: &'a TerrainType,
    ) -> impl Iterator<Item = &'a InteractionRule> + 'a {
        terrain.rule_ids.iter().filter_map(move |id| self.rules.get(id))
    }

    fn prune_rule(&mut self, rule_id: RuleId) {
        let referenced = self
            .terrains
            .iter()
            .any(|t| t.rule_ids.contains(&rule_id));
        if !referenced && self.rules.remove(&rule_id).is_some() {
            debug!("Dropped unreferenced {rule_id}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionKind;

    fn catalog() -> (TerrainCatalog, TerrainId, TerrainId, TerrainId) {
        let mut catalog = TerrainCatalog::new();
        let grass = catalog.add_terrain(TerrainType::new(
            "Grass",
            TerrainColor::rgb(0x3A, 0x9D, 0x23),
            10.0,
        ));
        let sand = catalog.add_terrain(TerrainType::new(
            "Sand",
            TerrainColor::rgb(0xE1, 0xC6, 0x99),
            5.0,
        ));
        let water = catalog.add_terrain(TerrainType::new(
            "Water",
            TerrainColor::rgb(0x1E, 0x5A, 0xC8),
            3.0,
        ));
        (catalog, grass, sand, water)
    }

    #[test]
    fn test_blank_terrain() {
        let blank = TerrainCatalog::blank_terrain();
        assert!(blank.is_blank());
        assert_eq!(blank.name, "");
        assert_eq!(blank.color, TerrainColor::BLANK);
        assert_eq!(blank.base_probability, 0.0);
        assert!(blank.rule_ids.is_empty());
        assert!(std::ptr::eq(blank, TerrainCatalog::blank_terrain()));
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let (catalog, grass, sand, water) = catalog();
        let order: Vec<_> = catalog.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![grass, sand, water]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_add_rule_fans_out() {
        let (mut catalog, grass, sand, water) = catalog();
        let rule = InteractionRule::create_restriction(&[sand, water], (0.0, 2.0)).expect("valid");
        let rule_id = catalog.add_interaction_rule(rule, &[grass, sand]);

        assert_eq!(catalog.get(grass).expect("grass").rule_ids, vec![rule_id]);
        assert_eq!(catalog.get(sand).expect("sand").rule_ids, vec![rule_id]);
        assert!(catalog.get(water).expect("water").rule_ids.is_empty());
        assert!(catalog.rule(rule_id).is_some());
    }

    #[test]
    fn test_add_rule_no_duplicate_reference() {
        let (mut catalog, grass, sand, _) = catalog();
        let rule = InteractionRule::create_restriction(&[grass, sand], (0.0, 2.0)).expect("valid");
        let rule_id = catalog.add_interaction_rule(rule, &[grass, grass]);
        assert_eq!(catalog.get(grass).expect("grass").rule_ids, vec![rule_id]);
    }

    #[test]
    fn test_add_rule_to_unknown_terrain_only() {
        let (mut catalog, grass, sand, _) = catalog();
        let rule = InteractionRule::create_restriction(&[grass, sand], (0.0, 2.0)).expect("valid");
        let rule_id = catalog.add_interaction_rule(rule, &[TerrainId::from_raw(u64::MAX)]);
        assert!(catalog.rule(rule_id).is_none());
    }

    #[test]
    fn test_remove_rule_is_local() {
        let (mut catalog, grass, sand, water) = catalog();
        let rule = InteractionRule::create_modification(
            InteractionKind::LinearDecrease,
            &[grass, water],
            (0.0, 3.0),
            (0.5, 1.5),
        )
        .expect("valid");
        let rule_id = catalog.add_interaction_rule(rule, &[grass, sand]);

        assert!(catalog.remove_interaction_rule(grass, rule_id));
        assert!(catalog.get(grass).expect("grass").rule_ids.is_empty());
        assert_eq!(catalog.get(sand).expect("sand").rule_ids, vec![rule_id]);
        assert!(catalog.rule(rule_id).is_some());

        assert!(!catalog.remove_interaction_rule(grass, rule_id));
        assert!(catalog.remove_interaction_rule(sand, rule_id));
        assert!(catalog.rule(rule_id).is_none());
    }

    #[test]
    fn test_remove_and_update_terrain() {
        let (mut catalog, grass, sand, water) = catalog();
        let mut updated = catalog.get(sand).expect("sand").clone();
        updated.base_probability = 42.0;
        assert!(catalog.update_terrain(updated));
        assert_eq!(catalog.get(sand).expect("sand").base_probability, 42.0);

        let removed = catalog.remove_terrain(grass).expect("grass present");
        assert_eq!(removed.name, "Grass");
        let order: Vec<_> = catalog.iter().map(|t| t.id).collect();
        assert_eq!(order, vec![sand, water]);
        assert!(catalog.remove_terrain(grass).is_none());
        assert!(!catalog.update_terrain(removed));
    }

    #[test]
    fn test_update_terrain_reconciles_rules() {
        let (mut catalog, grass, sand, water) = catalog();
        let rule = InteractionRule::create_restriction(&[sand, water], (0.0, 2.0)).expect("valid");
        let rule_id = catalog.add_interaction_rule(rule, &[grass]);
        let unknown = RuleId::new();

        let mut updated = catalog.get(grass).expect("grass").clone();
        updated.rule_ids.push(unknown);
        updated.rule_ids.push(rule_id);
        assert!(catalog.update_terrain(updated));
        assert_eq!(catalog.get(grass).expect("grass").rule_ids, vec![rule_id]);
        assert!(catalog.rule(rule_id).is_some());

        let mut detached = catalog.get(grass).expect("grass").clone();
        detached.rule_ids.clear();
        assert!(catalog.update_terrain(detached));
        assert!(catalog.rule(rule_id).is_none());
        assert_eq!(catalog.rule_count(), 0);
    }

    #[test]
    fn test_resolve_falls_back_to_blank() {
        let (catalog, grass, _, _) = catalog();
        assert_eq!(catalog.resolve(grass).name, "Grass");
        assert!(catalog.resolve(TerrainId::BLANK).is_blank());
        assert!(catalog.resolve(TerrainId::from_raw(u64::MAX)).is_blank());
        assert_eq!(catalog.find_by_name("Water").map(|t| t.symbol()), Some('W'));
    }
}
