//! Front-end settings loaded from an optional TOML file

use arena_core::classes::{load_class_configs, ClassRegistry};
use arena_core::config::{self, ArenaConstants, ConfigError};
use arena_core::{ArenaError, EquipmentCatalog, Game, Narrator};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that stop the front-end from starting
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Arena(#[from] ArenaError),
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Narration language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Ru,
    En,
}

/// Contents of `arena.toml`; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Equipment file replacing the bundled catalog
    #[serde(default)]
    pub equipment: Option<PathBuf>,
    /// TOML file with extra `[[classes]]`
    #[serde(default)]
    pub classes: Option<PathBuf>,
    /// TOML file overriding narration templates
    #[serde(default)]
    pub narration: Option<PathBuf>,
    #[serde(default)]
    pub language: Language,
    /// Fixed seed for reproducible battles
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub constants: ArenaConstants,
}

impl Settings {
    /// Read settings from `path`, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let settings: Settings = config::load_toml(path)?;
        settings.constants.validate()?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Build the game data these settings describe
    pub fn build_game(&self) -> Result<Game, AppError> {
        let catalog = match &self.equipment {
            Some(path) => EquipmentCatalog::load(path)?,
            None => EquipmentCatalog::builtin(),
        };

        let mut classes = ClassRegistry::with_defaults();
        if let Some(path) = &self.classes {
            classes.extend_from_config(load_class_configs(path)?)?;
        }

        let narrator = match (&self.narration, self.language) {
            (Some(path), _) => Narrator::load(path)?,
            (None, Language::En) => Narrator::english(),
            (None, Language::Ru) => Narrator::russian(),
        };

        Ok(Game::new(catalog, classes, narrator, self.constants.clone()))
    }
}
