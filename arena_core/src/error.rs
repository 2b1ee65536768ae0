//! Error types surfaced to collaborators

use crate::config::ConfigError;
use std::fmt;
use thiserror::Error;

/// What kind of catalog entry a lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Weapon,
    Armor,
    UnitClass,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Weapon => "weapon",
            EntryKind::Armor => "armor",
            EntryKind::UnitClass => "unit class",
        };
        f.write_str(name)
    }
}

/// Errors returned by the arena API
///
/// In-battle conditions such as running out of stamina are not errors; they
/// come back as narrated outcomes.
#[derive(Error, Debug)]
pub enum ArenaError {
    /// Equipment or class data failed to load
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A collaborator asked for a name that does not exist
    #[error("Unknown {kind}: {name}")]
    NotFound { kind: EntryKind, name: String },
    /// An action was invoked on an object in the wrong state
    #[error("Precondition failed: {0}")]
    Precondition(String),
}

impl ArenaError {
    pub fn not_found(kind: EntryKind, name: impl Into<String>) -> Self {
        ArenaError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        ArenaError::Precondition(message.into())
    }
}
