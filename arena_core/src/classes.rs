//! Unit classes - archetypes a combatant is built from

use crate::config::{self, ConfigError};
use crate::error::{ArenaError, EntryKind};
use crate::skill::Skill;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Immutable archetype shared by every combatant of that class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitClass {
    /// Display name, also the registry key
    pub name: String,
    pub max_health: f64,
    pub max_stamina: f64,
    /// Multiplier applied to rolled weapon damage
    pub attack: f64,
    /// Stamina multiplier (carried for presentation)
    pub stamina: f64,
    /// Multiplier applied to equipped armor defence
    pub armor: f64,
    pub skill: Skill,
    /// Portrait path used by front-ends
    pub image: String,
}

impl UnitClass {
    pub fn warrior() -> Self {
        UnitClass {
            name: "Воин".to_string(),
            max_health: 60.0,
            max_stamina: 30.0,
            attack: 0.8,
            stamina: 0.9,
            armor: 1.2,
            skill: Skill::FuryPunch,
            image: "../static/warrior.png".to_string(),
        }
    }

    pub fn thief() -> Self {
        UnitClass {
            name: "Вор".to_string(),
            max_health: 50.0,
            max_stamina: 25.0,
            attack: 1.5,
            stamina: 1.2,
            armor: 1.0,
            skill: Skill::HardShot,
            image: "../static/assassin.png".to_string(),
        }
    }

    pub fn mage() -> Self {
        UnitClass {
            name: "Маг".to_string(),
            max_health: 30.0,
            max_stamina: 50.0,
            attack: 2.0,
            stamina: 1.5,
            armor: 0.8,
            skill: Skill::FireballShot,
            image: "../static/mage.png".to_string(),
        }
    }

    /// All numeric fields must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "unit class with an empty name".to_string(),
            ));
        }
        let fields = [
            ("max_health", self.max_health),
            ("max_stamina", self.max_stamina),
            ("attack", self.attack),
            ("stamina", self.stamina),
            ("armor", self.armor),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "class '{}': {} must be positive, got {}",
                    self.name, field, value
                )));
            }
        }
        Ok(())
    }
}

/// Container for class configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassesConfig {
    pub classes: Vec<UnitClass>,
}

/// Ordered registry of unit classes, keyed by name
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: Vec<Arc<UnitClass>>,
}

impl ClassRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ClassRegistry {
            classes: Vec::new(),
        }
    }

    /// Registry with the built-in archetypes
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(UnitClass::thief());
        registry.register(UnitClass::warrior());
        registry.register(UnitClass::mage());
        registry
    }

    /// Register a class, replacing any class with the same name in place
    pub fn register(&mut self, class: UnitClass) {
        let class = Arc::new(class);
        match self.classes.iter_mut().find(|c| c.name == class.name) {
            Some(existing) => *existing = class,
            None => self.classes.push(class),
        }
    }

    pub fn get(&self, name: &str) -> Result<Arc<UnitClass>, ArenaError> {
        self.classes
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .ok_or_else(|| ArenaError::not_found(EntryKind::UnitClass, name))
    }

    /// Class names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.classes.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Add every class from a parsed config
    pub fn extend_from_config(&mut self, config: ClassesConfig) -> Result<(), ConfigError> {
        for class in &config.classes {
            class.validate()?;
        }
        for class in config.classes {
            tracing::debug!("Registered unit class '{}'", class.name);
            self.register(class);
        }
        Ok(())
    }
}

/// Load extra unit classes from a TOML file
pub fn load_class_configs(path: &Path) -> Result<ClassesConfig, ConfigError> {
    let config: ClassesConfig = config::load_toml(path)?;
    for class in &config.classes {
        class.validate()?;
    }
    Ok(config)
}

/// Load extra unit classes from a TOML string
pub fn parse_class_configs(content: &str) -> Result<ClassesConfig, ConfigError> {
    let config: ClassesConfig = config::parse_toml(content)?;
    for class in &config.classes {
        class.validate()?;
    }
    Ok(config)
}
