//! Enemy archetypes that encounters are drawn from.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::CombatStats;
use crate::error::CatalogError;

/// Template for enemies of one kind, before level and rarity scaling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyArchetype {
    /// Display name, also the archetype identifier.
    pub name: String,
    /// Base hit points at level 1.
    pub base_hp: u32,
    /// Base attack at level 1.
    pub base_attack: u32,
    /// Base defense at level 1.
    pub base_defense: u32,
    /// Speed, never scaled.
    pub base_speed: u32,
}

impl EnemyArchetype {
    /// Create an archetype.
    #[must_use]
    pub fn new(name: impl Into<String>, base: CombatStats) -> Self {
        Self {
            name: name.into(),
            base_hp: base.hp,
            base_attack: base.attack,
            base_defense: base.defense,
            base_speed: base.speed,
        }
    }

    /// Base stats as a stat block.
    #[must_use]
    pub const fn base_stats(&self) -> CombatStats {
        CombatStats::new(
            self.base_hp,
            self.base_attack,
            self.base_defense,
            self.base_speed,
        )
    }
}

/// Ordered list of archetypes.
///
/// Order matters: the first archetype is the one new spawn points link to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchetypeCatalog {
    archetypes: Vec<EnemyArchetype>,
}

impl Default for ArchetypeCatalog {
    /// The stock catalog every new world starts with.
    fn default() -> Self {
        Self::new(vec![
            EnemyArchetype::new("Goblin", CombatStats::new(60, 10, 4, 2)),
            EnemyArchetype::new("Bandit", CombatStats::new(80, 14, 5, 3)),
            EnemyArchetype::new("Wolf", CombatStats::new(70, 12, 4, 4)),
            EnemyArchetype::new("Orc", CombatStats::new(120, 18, 8, 2)),
            EnemyArchetype::new("Shaman", CombatStats::new(90, 16, 6, 3)),
        ])
    }
}

impl ArchetypeCatalog {
    /// Create a catalog from archetypes, keeping their order.
    #[must_use]
    pub const fn new(archetypes: Vec<EnemyArchetype>) -> Self {
        Self { archetypes }
    }

    /// A catalog with no archetypes. Produces no spawns and no encounters.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Parse a catalog from a JSON array of archetypes.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the JSON does not describe a catalog.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// All archetypes, in order.
    #[must_use]
    pub fn archetypes(&self) -> &[EnemyArchetype] {
        &self.archetypes
    }

    /// The archetype new spawn points are linked to.
    #[must_use]
    pub fn first(&self) -> Option<&EnemyArchetype> {
        self.archetypes.first()
    }

    /// Find an archetype by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EnemyArchetype> {
        self.archetypes.iter().find(|a| a.name == name)
    }

    /// Number of archetypes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Check if the catalog has no archetypes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = ArchetypeCatalog::default();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.first().unwrap().name, "Goblin");
        let orc = catalog.get("Orc").unwrap();
        assert_eq!(orc.base_stats(), CombatStats::new(120, 18, 8, 2));
        assert!(catalog.get("Dragon").is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "Slime", "base_hp": 30, "base_attack": 4, "base_defense": 1, "base_speed": 1}
        ]"#;
        let catalog = ArchetypeCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.archetypes()[0].base_hp, 30);

        assert!(ArchetypeCatalog::from_json("[]").unwrap().is_empty());
        assert!(matches!(
            ArchetypeCatalog::from_json("{\"name\": 1}"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = ArchetypeCatalog::default();
        fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();
        assert_eq!(ArchetypeCatalog::load(&path).unwrap(), catalog);

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            ArchetypeCatalog::load(&missing),
            Err(CatalogError::Io { .. })
        ));
    }
}
