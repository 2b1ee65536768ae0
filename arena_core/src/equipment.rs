//! Equipment catalog - weapons and armors loaded from a data file

use crate::config::{self, ConfigError};
use crate::error::{ArenaError, EntryKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A weapon definition
///
/// Unknown fields in the source data are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub min_damage: f64,
    pub max_damage: f64,
    /// Stamina the wielder spends on every landed or attempted hit
    pub stamina_per_hit: f64,
}

impl Weapon {
    /// Roll damage uniformly within `[min_damage, max_damage]`
    pub fn roll_damage(&self, rng: &mut impl Rng) -> f64 {
        if self.max_damage <= self.min_damage {
            return self.min_damage;
        }
        rng.gen_range(self.min_damage..=self.max_damage)
    }
}

/// An armor definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    pub defence: f64,
    /// Stamina the wearer spends when the armor absorbs part of a hit
    pub stamina_per_turn: f64,
}

/// Read-only catalog of all available equipment, in source order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentCatalog {
    weapons: Vec<Weapon>,
    armors: Vec<Armor>,
}

impl EquipmentCatalog {
    /// Build a catalog from already-parsed records
    pub fn new(weapons: Vec<Weapon>, armors: Vec<Armor>) -> Result<Self, ConfigError> {
        let catalog = EquipmentCatalog { weapons, armors };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load equipment from a file; `.toml` files are read as TOML, anything else as JSON
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = if config::is_toml(path) {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };
        tracing::info!(
            "Loaded {} weapons and {} armors from {}",
            catalog.weapons.len(),
            catalog.armors.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse a JSON document `{ "weapons": [...], "armors": [...] }`
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let EquipmentCatalog { weapons, armors } =
            config::parse_json(content).map_err(invalid_data)?;
        Self::new(weapons, armors)
    }

    /// Parse a TOML document with `[[weapons]]` and `[[armors]]` tables
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let EquipmentCatalog { weapons, armors } =
            config::parse_toml(content).map_err(invalid_data)?;
        Self::new(weapons, armors)
    }

    /// The catalog bundled with the crate
    pub fn builtin() -> Self {
        let json = include_str!("../config/equipment.json");
        Self::from_json_str(json).unwrap_or_else(|e| {
            tracing::error!("Bundled equipment data is invalid: {}", e);
            Self::default()
        })
    }

    pub fn weapon(&self, name: &str) -> Result<&Weapon, ArenaError> {
        self.weapons
            .iter()
            .find(|w| w.name == name)
            .ok_or_else(|| ArenaError::not_found(EntryKind::Weapon, name))
    }

    pub fn armor(&self, name: &str) -> Result<&Armor, ArenaError> {
        self.armors
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| ArenaError::not_found(EntryKind::Armor, name))
    }

    /// Weapon names in catalog order
    pub fn weapon_names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.weapons.iter().map(|w| w.name.as_str())
    }

    /// Armor names in catalog order
    pub fn armor_names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.armors.iter().map(|a| a.name.as_str())
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn armors(&self) -> &[Armor] {
        &self.armors
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for weapon in &self.weapons {
            check_name("weapon", &weapon.name, &mut seen)?;
            check_amount(&weapon.name, "min_damage", weapon.min_damage)?;
            check_amount(&weapon.name, "max_damage", weapon.max_damage)?;
            check_amount(&weapon.name, "stamina_per_hit", weapon.stamina_per_hit)?;
            if weapon.min_damage > weapon.max_damage {
                return Err(ConfigError::ValidationError(format!(
                    "weapon '{}': min_damage {} exceeds max_damage {}",
                    weapon.name, weapon.min_damage, weapon.max_damage
                )));
            }
        }

        seen.clear();
        for armor in &self.armors {
            check_name("armor", &armor.name, &mut seen)?;
            check_amount(&armor.name, "defence", armor.defence)?;
            check_amount(&armor.name, "stamina_per_turn", armor.stamina_per_turn)?;
        }
        Ok(())
    }
}

/// Structural problems in equipment data are reported as validation failures
fn invalid_data(err: ConfigError) -> ConfigError {
    match err {
        ConfigError::ParseError(e) => {
            ConfigError::ValidationError(format!("Invalid equipment data: {}", e))
        }
        ConfigError::JsonError(e) => {
            ConfigError::ValidationError(format!("Invalid equipment data: {}", e))
        }
        other => other,
    }
}

fn check_name<'a>(kind: &str, name: &'a str, seen: &mut HashSet<&'a str>) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!("{} with an empty name", kind)));
    }
    if !seen.insert(name) {
        return Err(ConfigError::ValidationError(format!(
            "duplicate {} name '{}'",
            kind, name
        )));
    }
    Ok(())
}

fn check_amount(item: &str, field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "'{}': {} must be a non-negative number, got {}",
            item, field, value
        )));
    }
    Ok(())
}
